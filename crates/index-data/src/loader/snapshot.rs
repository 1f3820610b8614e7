//! 스냅샷 매니페스트 기반 로더.
//!
//! 매니페스트는 종목별로 어느 시점(`as_of`)에 받아 둔 파일 쌍을 쓸지 명시합니다:
//!
//! ```text
//! ticker,as_of,ohlcv_path,marcap_path
//! 287840,2025-06-19,ohlcv/ohlcv_287840.csv,marcap/marcap_287840.csv
//! ```
//!
//! 상대 경로는 매니페스트 파일이 있는 디렉토리를 기준으로 해석합니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use index_core::{normalize_ticker, Basket, MarketCap, Price, PriceRecord, Ticker};

use super::columns::{
    cell, required_date, required_decimal, required_volume, HeaderMap,
};
use super::open_csv;
use crate::error::{DataError, Result};

/// 매니페스트 한 행.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub ticker: Ticker,
    /// 스냅샷 기준일
    pub as_of: NaiveDate,
    /// 일별 시세(OHLCV) 파일
    pub ohlcv_path: PathBuf,
    /// 일별 시가총액 파일
    pub marcap_path: PathBuf,
}

/// 매니페스트를 읽습니다. 상대 경로는 매니페스트 디렉토리 기준으로 바꿉니다.
pub fn read_manifest(path: impl AsRef<Path>) -> Result<Vec<SnapshotEntry>> {
    let path = path.as_ref();
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut reader = open_csv(path)?;
    let headers = HeaderMap::new(reader.headers()?);

    let ticker_col = headers.require(path, &["ticker"])?;
    let as_of_col = headers.require(path, &["as_of"])?;
    let ohlcv_col = headers.require(path, &["ohlcv_path"])?;
    let marcap_col = headers.require(path, &["marcap_path"])?;

    let resolve = |raw: &str| {
        let p = PathBuf::from(raw);
        if p.is_absolute() {
            p
        } else {
            base_dir.join(p)
        }
    };

    let mut entries = Vec::new();
    for row in reader.records() {
        let row = row?;
        let ticker = normalize_ticker(cell(&row, ticker_col));
        if ticker.is_empty() {
            return Err(DataError::Manifest(format!(
                "{}: empty ticker",
                path.display()
            )));
        }
        entries.push(SnapshotEntry {
            ticker,
            as_of: required_date(path, &row, as_of_col)?,
            ohlcv_path: resolve(cell(&row, ohlcv_col)),
            marcap_path: resolve(cell(&row, marcap_col)),
        });
    }

    debug!(entries = entries.len(), path = %path.display(), "매니페스트 로드");
    Ok(entries)
}

/// 종목별로 `as_of`가 가장 늦은 항목을 고릅니다.
pub fn latest_entries(entries: &[SnapshotEntry]) -> BTreeMap<Ticker, SnapshotEntry> {
    let mut latest: BTreeMap<Ticker, SnapshotEntry> = BTreeMap::new();
    for entry in entries {
        match latest.get(&entry.ticker) {
            Some(current) if current.as_of >= entry.as_of => {}
            _ => {
                latest.insert(entry.ticker.clone(), entry.clone());
            }
        }
    }
    latest
}

/// 매니페스트에 등록된 종목별 파일 쌍을 읽어 시세 레코드로 합칩니다.
#[derive(Debug, Clone)]
pub struct SnapshotLoader {
    entries: Vec<SnapshotEntry>,
}

impl SnapshotLoader {
    /// 매니페스트 파일로부터 로더를 생성합니다.
    pub fn from_manifest(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            entries: read_manifest(path)?,
        })
    }

    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    /// 바스켓 전 종목을 로드합니다.
    pub fn load(&self, basket: &Basket, run_date: NaiveDate) -> Vec<PriceRecord> {
        self.load_with_progress(basket, run_date, |_| {})
    }

    /// 바스켓 전 종목을 로드하며 종목 하나를 처리할 때마다 `on_ticker`를 호출합니다.
    ///
    /// - 매니페스트에 없는 종목은 경고 후 건너뜁니다.
    /// - 파일을 읽지 못한 종목은 에러 로그를 남기고 건너뜁니다.
    /// - 선택된 스냅샷의 기준일이 `run_date`와 다르면 경고합니다.
    pub fn load_with_progress<F>(
        &self,
        basket: &Basket,
        run_date: NaiveDate,
        mut on_ticker: F,
    ) -> Vec<PriceRecord>
    where
        F: FnMut(&str),
    {
        let latest = latest_entries(&self.entries);
        let mut records = Vec::new();
        let mut loaded = 0usize;

        for ticker in basket.iter() {
            on_ticker(ticker.as_str());

            let Some(entry) = latest.get(ticker) else {
                warn!(ticker = %ticker, "매니페스트에 종목 데이터가 없습니다");
                continue;
            };

            if entry.as_of != run_date {
                warn!(
                    ticker = %ticker,
                    as_of = %entry.as_of,
                    run_date = %run_date,
                    "스냅샷 기준일이 실행일과 다릅니다"
                );
            }

            match load_pair(entry) {
                Ok(mut rows) => {
                    debug!(ticker = %ticker, rows = rows.len(), "종목 로드");
                    loaded += 1;
                    records.append(&mut rows);
                }
                Err(e) => {
                    error!(ticker = %ticker, error = %e, "종목 파일 처리 중 오류 발생");
                }
            }
        }

        records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        info!(
            tickers = loaded,
            basket = basket.len(),
            records = records.len(),
            "스냅샷 로드 완료"
        );
        records
    }
}

/// OHLCV 파일과 시가총액 파일을 날짜 기준으로 내부 조인합니다.
pub fn load_pair(entry: &SnapshotEntry) -> Result<Vec<PriceRecord>> {
    let ohlcv = read_ohlcv(&entry.ohlcv_path)?;
    let caps = read_market_caps(&entry.marcap_path)?;

    let records = ohlcv
        .into_iter()
        .filter_map(|(date, (close, volume))| {
            caps.get(&date)
                .map(|cap| PriceRecord::new(date, entry.ticker.clone(), close, volume, *cap))
        })
        .collect();
    Ok(records)
}

/// 날짜 → (종가, 거래량)
fn read_ohlcv(path: &Path) -> Result<BTreeMap<NaiveDate, (Price, u64)>> {
    let mut reader = open_csv(path)?;
    let headers = HeaderMap::new(reader.headers()?);
    let date_col = headers.require(path, &["날짜", "date"])?;
    let close_col = headers.require(path, &["종가", "close"])?;
    let volume_col = headers.require(path, &["거래량", "volume"])?;

    let mut rows = BTreeMap::new();
    for row in reader.records() {
        let row = row?;
        let date = required_date(path, &row, date_col)?;
        let close = required_decimal(path, &row, close_col, "close")?;
        let volume = required_volume(path, &row, volume_col)?;
        rows.insert(date, (close, volume));
    }
    Ok(rows)
}

/// 날짜 → 시가총액
fn read_market_caps(path: &Path) -> Result<HashMap<NaiveDate, MarketCap>> {
    let mut reader = open_csv(path)?;
    let headers = HeaderMap::new(reader.headers()?);
    let date_col = headers.require(path, &["날짜", "date"])?;
    let cap_col = headers.require(path, &["시가총액", "market_cap"])?;

    let mut rows = HashMap::new();
    for row in reader.records() {
        let row = row?;
        let date = required_date(path, &row, date_col)?;
        let cap = required_decimal(path, &row, cap_col, "market_cap")?;
        rows.insert(date, cap);
    }
    Ok(rows)
}
