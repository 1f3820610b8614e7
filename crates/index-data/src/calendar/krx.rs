//! 한국거래소(KRX) 휴장일 달력.
//!
//! 다음을 휴장일로 봅니다:
//! - 주말
//! - 양력 고정 공휴일과 그 대체공휴일
//! - 음력 공휴일, 선거일, 임시공휴일 (내장 표, 2023~2026)
//! - 거래소 자체 휴장일: 근로자의 날(5/1), 연말 휴장일 (설정으로 끌 수 있음)
//! - 설정 파일의 추가 휴장일
//!
//! 내장 표에 없는 연도의 음력 공휴일은 `calendar.extra_holidays`로 보충해야 합니다.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::BTreeSet;
use std::fmt;

use index_core::CalendarConfig;

use super::HolidayCalendar;

/// 휴장 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayKind {
    Weekend,
    NewYear,
    IndependenceMovement,
    ChildrensDay,
    MemorialDay,
    Liberation,
    NationalFoundation,
    Hangul,
    Christmas,
    Seollal,
    Chuseok,
    BuddhasBirthday,
    Substitute,
    Election,
    Temporary,
    WorkersDay,
    YearEndClosing,
    Configured,
}

impl fmt::Display for HolidayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HolidayKind::Weekend => "주말",
            HolidayKind::NewYear => "신정",
            HolidayKind::IndependenceMovement => "삼일절",
            HolidayKind::ChildrensDay => "어린이날",
            HolidayKind::MemorialDay => "현충일",
            HolidayKind::Liberation => "광복절",
            HolidayKind::NationalFoundation => "개천절",
            HolidayKind::Hangul => "한글날",
            HolidayKind::Christmas => "성탄절",
            HolidayKind::Seollal => "설날",
            HolidayKind::Chuseok => "추석",
            HolidayKind::BuddhasBirthday => "부처님오신날",
            HolidayKind::Substitute => "대체공휴일",
            HolidayKind::Election => "선거일",
            HolidayKind::Temporary => "임시공휴일",
            HolidayKind::WorkersDay => "근로자의 날",
            HolidayKind::YearEndClosing => "연말 휴장일",
            HolidayKind::Configured => "추가 휴장일",
        };
        write!(f, "{}", name)
    }
}

/// 양력 고정 공휴일: (월, 일, 사유, 대체공휴일 적용 시작 연도).
const FIXED_HOLIDAYS: &[(u32, u32, HolidayKind, Option<i32>)] = &[
    (1, 1, HolidayKind::NewYear, None),
    (3, 1, HolidayKind::IndependenceMovement, Some(2021)),
    (5, 5, HolidayKind::ChildrensDay, Some(2014)),
    (6, 6, HolidayKind::MemorialDay, None),
    (8, 15, HolidayKind::Liberation, Some(2021)),
    (10, 3, HolidayKind::NationalFoundation, Some(2021)),
    (10, 9, HolidayKind::Hangul, Some(2021)),
    (12, 25, HolidayKind::Christmas, Some(2023)),
];

/// 음력 공휴일, 선거일, 임시공휴일, 음력 공휴일 대체휴일.
const TABLE_HOLIDAYS: &[((i32, u32, u32), HolidayKind)] = &[
    // 2023
    ((2023, 1, 21), HolidayKind::Seollal),
    ((2023, 1, 22), HolidayKind::Seollal),
    ((2023, 1, 23), HolidayKind::Seollal),
    ((2023, 1, 24), HolidayKind::Substitute),
    ((2023, 5, 27), HolidayKind::BuddhasBirthday),
    ((2023, 5, 29), HolidayKind::Substitute),
    ((2023, 9, 28), HolidayKind::Chuseok),
    ((2023, 9, 29), HolidayKind::Chuseok),
    ((2023, 9, 30), HolidayKind::Chuseok),
    ((2023, 10, 2), HolidayKind::Temporary),
    // 2024
    ((2024, 2, 9), HolidayKind::Seollal),
    ((2024, 2, 10), HolidayKind::Seollal),
    ((2024, 2, 11), HolidayKind::Seollal),
    ((2024, 2, 12), HolidayKind::Substitute),
    ((2024, 4, 10), HolidayKind::Election),
    ((2024, 5, 15), HolidayKind::BuddhasBirthday),
    ((2024, 9, 16), HolidayKind::Chuseok),
    ((2024, 9, 17), HolidayKind::Chuseok),
    ((2024, 9, 18), HolidayKind::Chuseok),
    ((2024, 10, 1), HolidayKind::Temporary),
    // 2025
    ((2025, 1, 27), HolidayKind::Temporary),
    ((2025, 1, 28), HolidayKind::Seollal),
    ((2025, 1, 29), HolidayKind::Seollal),
    ((2025, 1, 30), HolidayKind::Seollal),
    ((2025, 5, 5), HolidayKind::BuddhasBirthday),
    ((2025, 5, 6), HolidayKind::Substitute),
    ((2025, 6, 3), HolidayKind::Election),
    ((2025, 10, 5), HolidayKind::Chuseok),
    ((2025, 10, 6), HolidayKind::Chuseok),
    ((2025, 10, 7), HolidayKind::Chuseok),
    ((2025, 10, 8), HolidayKind::Substitute),
    // 2026
    ((2026, 2, 16), HolidayKind::Seollal),
    ((2026, 2, 17), HolidayKind::Seollal),
    ((2026, 2, 18), HolidayKind::Seollal),
    ((2026, 5, 24), HolidayKind::BuddhasBirthday),
    ((2026, 5, 25), HolidayKind::Substitute),
    ((2026, 6, 3), HolidayKind::Election),
    ((2026, 9, 24), HolidayKind::Chuseok),
    ((2026, 9, 25), HolidayKind::Chuseok),
    ((2026, 9, 26), HolidayKind::Chuseok),
];

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// KRX 휴장일 달력.
#[derive(Debug, Clone)]
pub struct KrxCalendar {
    exchange_closures: bool,
    extra: BTreeSet<NaiveDate>,
}

impl Default for KrxCalendar {
    fn default() -> Self {
        Self::new()
    }
}

impl KrxCalendar {
    /// 거래소 휴장일을 포함한 기본 달력.
    pub fn new() -> Self {
        Self {
            exchange_closures: true,
            extra: BTreeSet::new(),
        }
    }

    /// `[calendar]` 설정으로 달력을 생성합니다.
    pub fn from_config(config: &CalendarConfig) -> Self {
        Self::new()
            .with_exchange_closures(config.exchange_closures)
            .with_extra_holidays(config.extra_holidays.iter().copied())
    }

    /// 근로자의 날, 연말 휴장일 포함 여부를 설정합니다.
    pub fn with_exchange_closures(mut self, enabled: bool) -> Self {
        self.exchange_closures = enabled;
        self
    }

    /// 추가 휴장일을 등록합니다.
    pub fn with_extra_holidays(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.extra.extend(dates);
        self
    }

    /// 휴장 사유를 반환합니다. 거래일이면 `None`.
    pub fn holiday_kind(&self, date: NaiveDate) -> Option<HolidayKind> {
        if let Some(kind) = self.public_holiday(date) {
            return Some(kind);
        }
        if self.extra.contains(&date) {
            return Some(HolidayKind::Configured);
        }
        if self.exchange_closures {
            if date.month() == 5 && date.day() == 1 {
                return Some(HolidayKind::WorkersDay);
            }
            if Some(date) == Self::year_end_closing(date.year()) {
                return Some(HolidayKind::YearEndClosing);
            }
        }
        if is_weekend(date) {
            return Some(HolidayKind::Weekend);
        }
        None
    }

    /// 주말을 제외한 해당 연도의 휴장일 목록.
    pub fn holidays_in_year(&self, year: i32) -> Vec<(NaiveDate, HolidayKind)> {
        let (Some(start), Some(end)) = (ymd(year, 1, 1), ymd(year, 12, 31)) else {
            return Vec::new();
        };
        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter_map(|d| match self.holiday_kind(d) {
                Some(HolidayKind::Weekend) | None => None,
                Some(kind) => Some((d, kind)),
            })
            .collect()
    }

    /// 양력 고정 공휴일, 대체공휴일, 내장 표 공휴일.
    fn public_holiday(&self, date: NaiveDate) -> Option<HolidayKind> {
        if let Some(kind) = Self::base_holiday(date) {
            return Some(kind);
        }
        if !is_weekend(date) && Self::is_fixed_substitute(date) {
            return Some(HolidayKind::Substitute);
        }
        None
    }

    fn base_holiday(date: NaiveDate) -> Option<HolidayKind> {
        FIXED_HOLIDAYS
            .iter()
            .find(|(m, d, _, _)| date.month() == *m && date.day() == *d)
            .map(|(_, _, kind, _)| *kind)
            .or_else(|| {
                TABLE_HOLIDAYS
                    .iter()
                    .find(|((y, m, d), _)| ymd(*y, *m, *d) == Some(date))
                    .map(|(_, kind)| *kind)
            })
    }

    /// 주말과 겹친 고정 공휴일의 대체공휴일인지 확인.
    ///
    /// 대체공휴일은 공휴일이 아닌 첫 평일입니다.
    fn is_fixed_substitute(date: NaiveDate) -> bool {
        FIXED_HOLIDAYS.iter().any(|(m, d, _, since)| {
            let Some(since) = since else {
                return false;
            };
            if date.year() < *since {
                return false;
            }
            let Some(holiday) = ymd(date.year(), *m, *d) else {
                return false;
            };
            if !is_weekend(holiday) {
                return false;
            }
            Self::first_free_weekday_after(holiday) == Some(date)
        })
    }

    fn first_free_weekday_after(date: NaiveDate) -> Option<NaiveDate> {
        (1..=10)
            .map(|offset| date + Duration::days(offset))
            .find(|d| !is_weekend(*d) && Self::base_holiday(*d).is_none())
    }

    /// 연말 휴장일: 12월 31일 이전(포함)의 마지막 평일.
    fn year_end_closing(year: i32) -> Option<NaiveDate> {
        let dec31 = ymd(year, 12, 31)?;
        (0..7)
            .map(|back| dec31 - Duration::days(back))
            .find(|d| !is_weekend(*d))
    }
}

impl HolidayCalendar for KrxCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_kind(date).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_weekend_is_holiday() {
        let calendar = KrxCalendar::new();
        assert_eq!(calendar.holiday_kind(d(2025, 1, 4)), Some(HolidayKind::Weekend));
        assert_eq!(calendar.holiday_kind(d(2025, 1, 5)), Some(HolidayKind::Weekend));
        assert!(!calendar.is_holiday(d(2025, 1, 6)));
    }

    #[test]
    fn test_fixed_and_lunar_holidays() {
        let calendar = KrxCalendar::new();
        assert_eq!(calendar.holiday_kind(d(2025, 1, 1)), Some(HolidayKind::NewYear));
        assert_eq!(calendar.holiday_kind(d(2025, 1, 29)), Some(HolidayKind::Seollal));
        assert_eq!(calendar.holiday_kind(d(2025, 10, 6)), Some(HolidayKind::Chuseok));
        assert_eq!(calendar.holiday_kind(d(2025, 6, 3)), Some(HolidayKind::Election));
        assert_eq!(calendar.holiday_kind(d(2025, 1, 27)), Some(HolidayKind::Temporary));
    }

    #[test]
    fn test_fixed_holiday_substitutes() {
        let calendar = KrxCalendar::new();
        // 2025-03-01 토요일 → 3월 3일 월요일
        assert_eq!(calendar.holiday_kind(d(2025, 3, 3)), Some(HolidayKind::Substitute));
        // 2024-05-05 일요일 → 5월 6일 월요일
        assert_eq!(calendar.holiday_kind(d(2024, 5, 6)), Some(HolidayKind::Substitute));
        // 2026-08-15 토요일 → 8월 17일 월요일
        assert_eq!(calendar.holiday_kind(d(2026, 8, 17)), Some(HolidayKind::Substitute));
        // 2026-10-03 토요일 → 10월 5일 월요일
        assert_eq!(calendar.holiday_kind(d(2026, 10, 5)), Some(HolidayKind::Substitute));
        // 현충일은 대체공휴일이 없다: 2026-06-06 토요일, 6월 8일은 거래일
        assert!(!calendar.is_holiday(d(2026, 6, 8)));
        // 2022년 성탄절은 대체공휴일 적용 이전
        assert!(!calendar.is_holiday(d(2022, 12, 26)));
    }

    #[test]
    fn test_exchange_closures() {
        let calendar = KrxCalendar::new();
        assert_eq!(calendar.holiday_kind(d(2025, 5, 1)), Some(HolidayKind::WorkersDay));
        assert_eq!(
            calendar.holiday_kind(d(2025, 12, 31)),
            Some(HolidayKind::YearEndClosing)
        );
        // 2023-12-31 일요일 → 12월 29일 금요일
        assert_eq!(
            calendar.holiday_kind(d(2023, 12, 29)),
            Some(HolidayKind::YearEndClosing)
        );

        let without = KrxCalendar::new().with_exchange_closures(false);
        assert!(!without.is_holiday(d(2025, 5, 1)));
        assert!(!without.is_holiday(d(2025, 12, 31)));
    }

    #[test]
    fn test_extra_holidays() {
        let calendar = KrxCalendar::new().with_extra_holidays([d(2027, 2, 8)]);
        assert_eq!(calendar.holiday_kind(d(2027, 2, 8)), Some(HolidayKind::Configured));
    }

    #[test]
    fn test_holidays_in_year_excludes_weekends() {
        let calendar = KrxCalendar::new();
        let holidays = calendar.holidays_in_year(2025);
        assert!(holidays.iter().all(|(_, kind)| *kind != HolidayKind::Weekend));
        assert!(holidays.contains(&(d(2025, 10, 8), HolidayKind::Substitute)));
        // 2025-03-01은 토요일이지만 공휴일 사유가 우선한다
        assert!(holidays.contains(&(d(2025, 3, 1), HolidayKind::IndependenceMovement)));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(HolidayKind::Chuseok.to_string(), "추석");
        assert_eq!(HolidayKind::YearEndClosing.to_string(), "연말 휴장일");
    }
}
