//! 산출 결과 CSV 저장/로드.
//!
//! 결과 파일 형식 (UTF-8 BOM 포함, 값이 없으면 빈 칸):
//!
//! ```text
//! date,index_value,aggregate_market_cap,note
//! 2025-01-02,100,5500000000000,
//! 2025-01-04,,,holiday
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use index_core::{parse_krx_number, ComparisonRow, DailyResult, IndexPoint};

use crate::error::{DataError, Result};
use crate::loader::open_csv;
use crate::loader::{cell, required_date, HeaderMap};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 결과 파일 이름: `deajeon_index_<YYYYMMDD>.csv`.
pub fn result_file_name(run_date: NaiveDate) -> String {
    format!("deajeon_index_{}.csv", run_date.format("%Y%m%d"))
}

/// 비교 파일 이름: `comparison_<YYYYMMDD>.csv`.
pub fn comparison_file_name(run_date: NaiveDate) -> String {
    format!("comparison_{}.csv", run_date.format("%Y%m%d"))
}

fn fmt_decimal(value: Option<Decimal>) -> Option<String> {
    value.map(|v| v.normalize().to_string())
}

#[derive(Serialize)]
struct IndexCsvRow<'a> {
    date: NaiveDate,
    index_value: Option<String>,
    aggregate_market_cap: Option<String>,
    note: &'a str,
}

#[derive(Serialize)]
struct ComparisonCsvRow {
    date: NaiveDate,
    index_value: Option<String>,
    index_normalized: Option<String>,
    benchmark_close: Option<String>,
    benchmark_normalized: Option<String>,
    index_market_cap_eok: Option<String>,
    benchmark_market_cap_eok: Option<String>,
}

fn create_writer(path: &Path) -> Result<csv::Writer<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DataError::io(parent, e))?;
    }
    let mut file = File::create(path).map_err(|e| DataError::io(path, e))?;
    // 엑셀에서 한글이 깨지지 않도록 BOM을 붙인다.
    file.write_all(UTF8_BOM).map_err(|e| DataError::io(path, e))?;
    Ok(csv::Writer::from_writer(file))
}

/// 일별 결과를 CSV로 저장합니다.
pub fn write_index_csv(path: impl AsRef<Path>, rows: &[DailyResult]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = create_writer(path)?;
    for row in rows {
        let note = row.note();
        writer.serialize(IndexCsvRow {
            date: row.date,
            index_value: fmt_decimal(row.index_value),
            aggregate_market_cap: fmt_decimal(row.aggregate_market_cap),
            note: &note,
        })?;
    }
    writer.flush().map_err(|e| DataError::io(path, e))?;
    Ok(())
}

/// 비교 결과를 CSV로 저장합니다.
pub fn write_comparison_csv(path: impl AsRef<Path>, rows: &[ComparisonRow]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = create_writer(path)?;
    for row in rows {
        writer.serialize(ComparisonCsvRow {
            date: row.date,
            index_value: fmt_decimal(row.index_value),
            index_normalized: fmt_decimal(row.index_normalized),
            benchmark_close: fmt_decimal(row.benchmark_close),
            benchmark_normalized: fmt_decimal(row.benchmark_normalized),
            index_market_cap_eok: fmt_decimal(row.index_market_cap_eok),
            benchmark_market_cap_eok: fmt_decimal(row.benchmark_market_cap_eok),
        })?;
    }
    writer.flush().map_err(|e| DataError::io(path, e))?;
    Ok(())
}

/// 저장된 결과 파일을 읽습니다. 비고 컬럼은 무시합니다.
pub fn read_index_csv(path: impl AsRef<Path>) -> Result<Vec<IndexPoint>> {
    let path = path.as_ref();
    let mut reader = open_csv(path)?;
    let headers = HeaderMap::new(reader.headers()?);
    let date_col = headers.require(path, &["date", "날짜"])?;
    let index_col = headers.require(path, &["index_value", "deajeon_index"])?;
    let cap_col = headers.require(path, &["aggregate_market_cap", "total_market_cap", "시가총액"])?;

    let mut points = Vec::new();
    for row in reader.records() {
        let row = row?;
        points.push(IndexPoint {
            date: required_date(path, &row, date_col)?,
            index_value: parse_krx_number(cell(&row, index_col)),
            aggregate_market_cap: parse_krx_number(cell(&row, cap_col)),
        });
    }
    points.sort_by_key(|p| p.date);
    Ok(points)
}

/// 출력 디렉토리에 실행일 기준 파일명으로 결과를 저장합니다.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    output_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 일별 결과 저장. 저장된 파일 경로를 반환합니다.
    pub fn write_index(&self, rows: &[DailyResult], run_date: NaiveDate) -> Result<PathBuf> {
        let path = self.output_dir.join(result_file_name(run_date));
        write_index_csv(&path, rows)?;
        info!(path = %path.display(), rows = rows.len(), "인덱스 결과 저장");
        Ok(path)
    }

    /// 비교 결과 저장. 저장된 파일 경로를 반환합니다.
    pub fn write_comparison(&self, rows: &[ComparisonRow], run_date: NaiveDate) -> Result<PathBuf> {
        let path = self.output_dir.join(comparison_file_name(run_date));
        write_comparison_csv(&path, rows)?;
        info!(path = %path.display(), rows = rows.len(), "비교 결과 저장");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use index_core::NoteEntry;
    use rust_decimal_macros::dec;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_file_names() {
        assert_eq!(result_file_name(d("2025-06-19")), "deajeon_index_20250619.csv");
        assert_eq!(comparison_file_name(d("2025-06-19")), "comparison_20250619.csv");
    }

    #[test]
    fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ResultWriter::new(dir.path().join("nested"));

        let mut holiday = DailyResult::empty(d("2025-01-04"));
        holiday.notes.push(NoteEntry::Holiday);
        let rows = vec![
            DailyResult {
                date: d("2025-01-03"),
                index_value: Some(dec!(100.0)),
                aggregate_market_cap: Some(dec!(400)),
                notes: vec![NoteEntry::Missing("950130".to_string())],
            },
            holiday,
        ];

        let path = writer.write_index(&rows, d("2025-01-04")).unwrap();
        assert!(path.ends_with("deajeon_index_20250104.csv"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with('\u{feff}'));
        assert!(content.contains("2025-01-03,100,400,missing: 950130"));
        assert!(content.contains("2025-01-04,,,holiday"));

        let points = read_index_csv(&path).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].index_value, Some(dec!(100)));
        assert_eq!(points[1].index_value, None);
        assert_eq!(points[1].aggregate_market_cap, None);
    }

    #[test]
    fn test_read_korean_header_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deajeon_index_20250619.csv");
        std::fs::write(
            &path,
            "\u{feff}날짜,deajeon_index,시가총액,특이사항\n\
             2025-01-03,100.0,\"400,000,000,000\",\n\
             2025-01-02,,,holiday\n",
        )
        .unwrap();

        let points = read_index_csv(&path).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, d("2025-01-02"));
        assert_eq!(points[1].index_value, Some(dec!(100)));
        assert_eq!(points[1].aggregate_market_cap, Some(dec!(400000000000)));
    }
}
