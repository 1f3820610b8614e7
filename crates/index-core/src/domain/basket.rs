//! 인덱스 구성 종목 바스켓.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::{normalize_ticker, Ticker};

/// 대전 인덱스 기본 구성 종목 (코스닥 상장 대전 지역 기업).
pub const DEFAULT_BASKET: &[&str] = &[
    "287840", "435570", "475830", "475960", "044990", "457370", "469750", "431190", "460470",
    "452200", "360350", "452190", "338840", "451760", "372320", "417010", "405000", "363250",
    "277810", "368770", "335810", "348350", "318410", "336570", "226330", "256150", "253840",
    "228760", "208340", "269620", "214430", "087010", "187420", "208370", "196170", "105550",
    "171120", "141080", "143160", "064290", "099320", "092070", "065150", "092730", "064550",
    "082210", "082270", "069540", "072020", "060380", "054800", "046210", "023760",
];

/// 실행 동안 변하지 않는 구성 종목 집합.
///
/// 종목 코드는 생성 시 정규화되며 정렬된 순서로 순회됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Basket {
    tickers: BTreeSet<Ticker>,
}

impl Basket {
    /// 종목 코드 목록으로 바스켓을 생성합니다.
    pub fn new<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            tickers: tickers
                .into_iter()
                .map(|t| normalize_ticker(t.as_ref()))
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    /// 기본 구성 종목으로 바스켓을 생성합니다.
    pub fn deajeon() -> Self {
        Self::new(DEFAULT_BASKET.iter().copied())
    }

    /// 종목 포함 여부.
    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.contains(ticker)
    }

    /// 정렬된 종목 코드 순회.
    pub fn iter(&self) -> impl Iterator<Item = &Ticker> {
        self.tickers.iter()
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

impl Default for Basket {
    fn default() -> Self {
        Self::deajeon()
    }
}

impl From<Vec<String>> for Basket {
    fn from(tickers: Vec<String>) -> Self {
        Self::new(tickers)
    }
}

impl From<Basket> for Vec<String> {
    fn from(basket: Basket) -> Self {
        basket.tickers.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_basket_size() {
        let basket = Basket::deajeon();
        assert_eq!(basket.len(), 53);
        assert!(basket.contains("023760"));
    }

    #[test]
    fn test_basket_normalizes_and_dedups() {
        let basket = Basket::new(["23760", "023760", " 46210", ""]);
        assert_eq!(basket.len(), 2);
        let tickers: Vec<_> = basket.iter().cloned().collect();
        assert_eq!(tickers, vec!["023760".to_string(), "046210".to_string()]);
    }
}
