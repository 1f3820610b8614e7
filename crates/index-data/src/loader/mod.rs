//! 입력 CSV 로더.
//!
//! 모든 로더는 `(date, ticker)` 순으로 정렬된 [`PriceRecord`](index_core::PriceRecord)
//! 목록 또는 날짜순 벤치마크 포인트를 반환합니다.

mod benchmark;
mod columns;
mod long_table;
mod snapshot;

pub use benchmark::read_benchmark_csv;
pub use columns::parse_date;
pub(crate) use columns::{cell, required_date, HeaderMap};
pub use long_table::load_long_table;
pub use snapshot::{latest_entries, load_pair, read_manifest, SnapshotEntry, SnapshotLoader};

use std::fs::File;
use std::path::Path;

use crate::error::{DataError, Result};

/// CSV 리더를 엽니다. 필드는 양쪽 공백을 제거하고 행 길이 차이를 허용합니다.
pub(crate) fn open_csv(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|e| DataError::io(path, e))?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file))
}
