//! 기준 상태와 일별 인덱스 결과.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{IndexValue, MarketCap, Ticker};

/// 기준일의 인덱스 값.
pub const BASE_INDEX_VALUE: IndexValue = dec!(100.0);

/// 실행당 한 번 산출되는 기준 상태.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseState {
    /// 기준일 (데이터가 존재하는 가장 이른 날짜)
    pub base_date: NaiveDate,
    /// 기준일 구성 종목 시가총액 합
    pub base_market_cap: MarketCap,
    /// 기준 인덱스 값 (항상 100)
    pub base_index_value: IndexValue,
}

impl BaseState {
    pub fn new(base_date: NaiveDate, base_market_cap: MarketCap) -> Self {
        Self {
            base_date,
            base_market_cap,
            base_index_value: BASE_INDEX_VALUE,
        }
    }

    /// 현재 시가총액 합으로 인덱스 값을 계산합니다.
    ///
    /// `기준 인덱스 × (현재 시가총액 합 / 기준 시가총액 합)`.
    /// 기준 시가총액이 0이면 기준 인덱스 값을 그대로 반환합니다.
    /// 계산이 `Decimal` 표현 범위를 넘으면 `None`입니다.
    pub fn index_for(&self, aggregate_market_cap: MarketCap) -> Option<IndexValue> {
        if self.base_market_cap.is_zero() {
            return Some(self.base_index_value);
        }
        aggregate_market_cap
            .checked_div(self.base_market_cap)
            .and_then(|ratio| self.base_index_value.checked_mul(ratio))
    }
}

/// 일별 특이사항 항목.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tickers", rename_all = "snake_case")]
pub enum NoteEntry {
    /// 휴장일
    Holiday,
    /// 휴장일인데 데이터가 존재하는 종목
    HolidayData(Vec<Ticker>),
    /// 첫 등장 이후 데이터가 누락된 종목
    Missing(Ticker),
    /// 분석 기간 내 한 번도 등장하지 않은 구성 종목
    Unlisted(Ticker),
    /// 인덱스 값이 표현 범위를 넘어 산출하지 못함
    IndexOverflow,
}

impl fmt::Display for NoteEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteEntry::Holiday => write!(f, "holiday"),
            NoteEntry::HolidayData(tickers) => {
                write!(f, "holiday data present: {}", tickers.join(", "))
            }
            NoteEntry::Missing(ticker) => write!(f, "missing: {}", ticker),
            NoteEntry::Unlisted(ticker) => write!(f, "unlisted: {}", ticker),
            NoteEntry::IndexOverflow => write!(f, "index overflow"),
        }
    }
}

/// 하루치 인덱스 산출 결과.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyResult {
    pub date: NaiveDate,
    /// 인덱스 값 (`None` = 아직 데이터 없음)
    pub index_value: Option<IndexValue>,
    /// 구성 종목 시가총액 합 (`None` = 아직 데이터 없음)
    pub aggregate_market_cap: Option<MarketCap>,
    /// 특이사항
    pub notes: Vec<NoteEntry>,
}

impl DailyResult {
    /// 특이사항 없는 빈 결과를 생성합니다.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            index_value: None,
            aggregate_market_cap: None,
            notes: Vec::new(),
        }
    }

    /// 특이사항을 공백으로 이어 붙인 문자열.
    pub fn note(&self) -> String {
        self.notes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 휴장일 행인지 여부.
    pub fn is_holiday(&self) -> bool {
        self.notes
            .iter()
            .any(|n| matches!(n, NoteEntry::Holiday | NoteEntry::HolidayData(_)))
    }
}

/// 분석 기간 내 한 번도 등장하지 않은 구성 종목의 처리 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlistedPolicy {
    /// 미상장으로 간주하고 누락 검사에서 제외 (보고서에만 기록)
    #[default]
    Ignore,
    /// 모든 거래일에 `unlisted: <ticker>`로 표시
    Flag,
}

/// 인덱스 엔진의 전체 산출물.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexReport {
    pub base: BaseState,
    /// 기준일부터 실행일까지 날짜당 한 행
    pub rows: Vec<DailyResult>,
    /// 입력에 한 번도 등장하지 않은 구성 종목
    pub unlisted: Vec<Ticker>,
}

impl IndexReport {
    /// 마지막으로 산출된 인덱스 값.
    pub fn latest_index(&self) -> Option<Decimal> {
        self.rows.iter().rev().find_map(|r| r.index_value)
    }

    /// 누락 표시가 하나라도 있는 행의 수.
    pub fn days_with_gaps(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.notes.iter().any(|n| matches!(n, NoteEntry::Missing(_))))
            .count()
    }
}
