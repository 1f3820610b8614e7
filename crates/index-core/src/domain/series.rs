//! 비교용 시계열 포인트.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{IndexValue, MarketCap, Price};

/// 코스닥 종합지수 하루치 데이터.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkPoint {
    pub date: NaiveDate,
    /// 지수 종가
    pub close: Option<Price>,
    /// 상장 시가총액
    pub listed_market_cap: Option<MarketCap>,
}

/// 저장된 인덱스 결과 파일에서 읽은 한 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexPoint {
    pub date: NaiveDate,
    pub index_value: Option<IndexValue>,
    pub aggregate_market_cap: Option<MarketCap>,
}

/// 대전 인덱스와 코스닥 지수의 날짜별 비교 행.
///
/// 한쪽 시계열에만 있는 날짜는 다른 쪽 값이 `None`입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub date: NaiveDate,
    pub index_value: Option<IndexValue>,
    /// 구간 첫 값을 100으로 맞춘 대전 인덱스
    pub index_normalized: Option<Decimal>,
    pub benchmark_close: Option<Price>,
    /// 구간 첫 값을 100으로 맞춘 코스닥 지수
    pub benchmark_normalized: Option<Decimal>,
    /// 대전 인덱스 시가총액 (억 원)
    pub index_market_cap_eok: Option<Decimal>,
    /// 코스닥 상장 시가총액 (억 원)
    pub benchmark_market_cap_eok: Option<Decimal>,
}
