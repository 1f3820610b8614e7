//! CLI 서브커맨드 구현.

pub mod calculate;
pub mod compare;
pub mod holidays;
pub mod show_config;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use chrono_tz::Asia::Seoul;
use indicatif::{ProgressBar, ProgressStyle};

/// 날짜 문자열 파싱 (YYYY-MM-DD).
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
}

/// 서울 기준 오늘 날짜.
pub fn today_in_seoul() -> NaiveDate {
    Utc::now().with_timezone(&Seoul).date_naive()
}

/// 막대형 진행률 표시줄.
pub(crate) fn progress_bar(len: u64, message: &str, enabled: bool) -> Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .context("진행률 템플릿 오류")?
            .progress_chars("=>-"),
    );
    pb.set_message(message.to_string());
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-06-19").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 19).unwrap()
        );
        assert!(parse_date("20250619").is_err());
        assert!(parse_date("invalid").is_err());
    }
}
