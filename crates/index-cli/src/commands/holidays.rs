//! 휴장일 목록 커맨드.

use anyhow::{bail, Result};
use chrono::Datelike;
use serde_json::json;

use index_data::KrxCalendar;

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "table" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// 해당 연도의 주말 외 휴장일을 출력용 문자열로 만듭니다.
pub fn render_holidays(calendar: &KrxCalendar, year: i32, format: OutputFormat) -> Result<String> {
    if !(1990..=2100).contains(&year) {
        bail!("지원하지 않는 연도: {}", year);
    }
    let holidays = calendar.holidays_in_year(year);

    let out = match format {
        OutputFormat::Text => {
            let mut lines = vec![format!("{}년 KRX 휴장일 ({}일)", year, holidays.len())];
            lines.extend(holidays.iter().map(|(date, kind)| {
                format!("{}  {}  {}", date, weekday_ko(date.weekday()), kind)
            }));
            lines.join("\n")
        }
        OutputFormat::Json => {
            let items: Vec<_> = holidays
                .iter()
                .map(|(date, kind)| json!({ "date": date.to_string(), "name": kind.to_string() }))
                .collect();
            serde_json::to_string_pretty(&json!({ "year": year, "holidays": items }))?
        }
    };
    Ok(out)
}

fn weekday_ko(weekday: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;
    match weekday {
        Mon => "월",
        Tue => "화",
        Wed => "수",
        Thu => "목",
        Fri => "금",
        Sat => "토",
        Sun => "일",
    }
}
