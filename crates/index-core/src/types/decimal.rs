//! 시가총액과 인덱스 값을 위한 Decimal 유틸리티.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::str::FromStr;

/// 시가총액 (원).
pub type MarketCap = Decimal;

/// 인덱스 값.
pub type IndexValue = Decimal;

/// 종가 (원).
pub type Price = Decimal;

/// 1억 원.
pub const WON_PER_EOK: Decimal = dec!(100_000_000);

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 원 단위를 억 원 단위로 변환합니다.
    fn to_eok(&self) -> Decimal;

    /// 지정된 소수점 자릿수로 반올림합니다 (사사오입).
    fn round_half_up(&self, dp: u32) -> Decimal;
}

impl DecimalExt for Decimal {
    fn to_eok(&self) -> Decimal {
        *self / WON_PER_EOK
    }

    fn round_half_up(&self, dp: u32) -> Decimal {
        self.round_dp_with_strategy(dp, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
    }
}

/// KRX 내보내기 파일의 숫자 필드를 파싱합니다.
///
/// 천 단위 구분 쉼표, 따옴표, 공백을 허용합니다. 빈 문자열과 "-"는 `None`입니다.
/// 지수 표기(예: "1.2e+13")도 허용합니다.
pub fn parse_krx_number(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .trim()
        .trim_matches('"')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
