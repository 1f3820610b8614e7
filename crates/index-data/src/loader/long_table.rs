//! 긴 형식(long table) CSV 로더.
//!
//! 헤더: `date,ticker,close,volume,market_cap`

use std::path::Path;
use tracing::{debug, info};

use index_core::{normalize_ticker, PriceRecord};

use super::columns::{cell, line_of, required_date, required_decimal, required_volume, HeaderMap};
use super::open_csv;
use crate::error::{DataError, Result};

/// 긴 형식 CSV에서 시세 레코드를 읽습니다.
///
/// 시가총액이나 종가가 비어 있는 행은 행 번호와 함께 [`DataError::Parse`]로 거부합니다.
pub fn load_long_table(path: impl AsRef<Path>) -> Result<Vec<PriceRecord>> {
    let path = path.as_ref();
    let mut reader = open_csv(path)?;
    let headers = HeaderMap::new(reader.headers()?);

    let date_col = headers.require(path, &["date", "날짜"])?;
    let ticker_col = headers.require(path, &["ticker", "종목코드"])?;
    let close_col = headers.require(path, &["close", "종가"])?;
    let volume_col = headers.require(path, &["volume", "거래량"])?;
    let cap_col = headers.require(path, &["market_cap", "시가총액"])?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let ticker = normalize_ticker(cell(&row, ticker_col));
        if ticker.is_empty() {
            return Err(DataError::parse(path, line_of(&row), "empty ticker"));
        }
        records.push(PriceRecord::new(
            required_date(path, &row, date_col)?,
            ticker,
            required_decimal(path, &row, close_col, "close")?,
            required_volume(path, &row, volume_col)?,
            required_decimal(path, &row, cap_col, "market_cap")?,
        ));
    }

    records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    debug!(path = %path.display(), "긴 형식 CSV 파싱 완료");
    info!(records = records.len(), path = %path.display(), "시세 레코드 로드");
    Ok(records)
}
