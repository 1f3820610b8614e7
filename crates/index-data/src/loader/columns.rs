//! 컬럼 이름 해석과 셀 파싱 도우미.

use chrono::NaiveDate;
use csv::StringRecord;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::Path;

use index_core::parse_krx_number;

use crate::error::{DataError, Result};

const BOM: char = '\u{feff}';

/// 정규화된 헤더 이름 → 컬럼 위치.
#[derive(Debug, Clone)]
pub(crate) struct HeaderMap {
    columns: HashMap<String, usize>,
}

fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches(BOM).trim().to_lowercase()
}

impl HeaderMap {
    pub(crate) fn new(headers: &StringRecord) -> Self {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (normalize_header(h), i))
            .collect();
        Self { columns }
    }

    /// 별칭 중 처음 일치하는 컬럼 위치.
    pub(crate) fn find(&self, aliases: &[&str]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| self.columns.get(&normalize_header(alias)).copied())
    }

    /// 필수 컬럼 위치. 없으면 첫 번째 별칭 이름으로 오류를 만듭니다.
    pub(crate) fn require(&self, path: &Path, aliases: &[&str]) -> Result<usize> {
        self.find(aliases).ok_or_else(|| DataError::MissingColumn {
            path: path.to_path_buf(),
            column: aliases.first().copied().unwrap_or_default().to_string(),
        })
    }
}

/// 날짜 문자열 파싱.
///
/// `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYYMMDD`를 허용하며 뒤에 붙은 시각(`2025-01-02 00:00:00`)은 무시합니다.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim_start_matches(BOM).trim();
    let day = raw.split([' ', 'T']).next().unwrap_or(raw);
    ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(day, fmt).ok())
}

/// 행 번호 (헤더가 1행).
pub(crate) fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or_default()
}

pub(crate) fn cell<'a>(record: &'a StringRecord, index: usize) -> &'a str {
    record.get(index).unwrap_or_default()
}

pub(crate) fn required_date(path: &Path, record: &StringRecord, index: usize) -> Result<NaiveDate> {
    let raw = cell(record, index);
    parse_date(raw)
        .ok_or_else(|| DataError::parse(path, line_of(record), format!("invalid date '{}'", raw)))
}

pub(crate) fn required_decimal(
    path: &Path,
    record: &StringRecord,
    index: usize,
    column: &str,
) -> Result<Decimal> {
    let raw = cell(record, index);
    parse_krx_number(raw).ok_or_else(|| {
        DataError::parse(
            path,
            line_of(record),
            format!("invalid {} '{}'", column, raw),
        )
    })
}

pub(crate) fn required_volume(path: &Path, record: &StringRecord, index: usize) -> Result<u64> {
    let value = required_decimal(path, record, index, "volume")?;
    value.trunc().to_u64().ok_or_else(|| {
        DataError::parse(
            path,
            line_of(record),
            format!("volume out of range '{}'", value),
        )
    })
}
