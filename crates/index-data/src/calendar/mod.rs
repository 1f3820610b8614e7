//! 휴장일 달력.
//!
//! 인덱스 엔진은 [`HolidayCalendar`]를 통해서만 휴장 여부를 묻습니다.
//! 기본 구현은 [`KrxCalendar`]이며, 테스트에서는 클로저를 그대로 넘길 수 있습니다.

mod krx;

pub use krx::{HolidayKind, KrxCalendar};

use chrono::NaiveDate;

/// 날짜별 휴장 여부 조회.
pub trait HolidayCalendar {
    /// 해당 날짜에 시장이 휴장이면 `true`.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

impl<F> HolidayCalendar for F
where
    F: Fn(NaiveDate) -> bool,
{
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Weekday};

    fn weekends(date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    #[test]
    fn test_closure_calendar() {
        let calendar = weekends;
        assert!(calendar.is_holiday(NaiveDate::from_ymd_opt(2025, 1, 4).unwrap()));
        assert!(!calendar.is_holiday(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()));
    }
}
