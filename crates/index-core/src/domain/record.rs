//! 일별 시세 레코드.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{MarketCap, Price, Ticker};

/// 한 종목의 하루치 종가/거래량/시가총액.
///
/// (date, ticker) 쌍은 입력 전체에서 유일해야 합니다. 중복 제거는 로더의 책임입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// 거래일
    pub date: NaiveDate,
    /// 종목 코드
    pub ticker: Ticker,
    /// 종가
    #[serde(rename = "close")]
    pub closing_price: Price,
    /// 거래량
    pub volume: u64,
    /// 시가총액
    pub market_cap: MarketCap,
}

impl PriceRecord {
    /// 새 레코드를 생성합니다.
    pub fn new(
        date: NaiveDate,
        ticker: impl Into<Ticker>,
        closing_price: Price,
        volume: u64,
        market_cap: MarketCap,
    ) -> Self {
        Self {
            date,
            ticker: ticker.into(),
            closing_price,
            volume,
            market_cap,
        }
    }

    /// 정렬 키 (date, ticker).
    pub fn sort_key(&self) -> (NaiveDate, &str) {
        (self.date, self.ticker.as_str())
    }
}
