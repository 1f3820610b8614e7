//! 코스닥 종합지수(벤치마크) CSV 로더.

use std::path::Path;
use tracing::info;

use index_core::{parse_krx_number, BenchmarkPoint};

use super::columns::{cell, required_date, HeaderMap};
use super::open_csv;
use crate::error::Result;

/// 벤치마크 CSV를 읽어 날짜순으로 반환합니다.
///
/// 컬럼: `날짜`/`일자`/`date`, `종가`/`close`, `상장시가총액`/`market_cap`.
/// 종가나 시가총액이 비어 있으면 해당 값은 `None`으로 둡니다.
pub fn read_benchmark_csv(path: impl AsRef<Path>) -> Result<Vec<BenchmarkPoint>> {
    let path = path.as_ref();
    let mut reader = open_csv(path)?;
    let headers = HeaderMap::new(reader.headers()?);

    let date_col = headers.require(path, &["날짜", "일자", "date"])?;
    let close_col = headers.require(path, &["종가", "close"])?;
    let cap_col = headers.require(path, &["상장시가총액", "market_cap"])?;

    let mut points = Vec::new();
    for row in reader.records() {
        let row = row?;
        points.push(BenchmarkPoint {
            date: required_date(path, &row, date_col)?,
            close: parse_krx_number(cell(&row, close_col)),
            listed_market_cap: parse_krx_number(cell(&row, cap_col)),
        });
    }

    points.sort_by_key(|p| p.date);
    info!(rows = points.len(), path = %path.display(), "벤치마크 로드");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_krx_export() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "\u{feff}일자,종가,대비,등락률,상장시가총액\n\
             2025/01/03,\"700.10\",1.2,0.17,\"350,000,000,000,000\"\n\
             2025/01/02,695.50,-3.1,-0.44,\n"
        )
        .unwrap();

        let points = read_benchmark_csv(file.path()).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date.to_string(), "2025-01-02");
        assert_eq!(points[0].close, Some(dec!(695.50)));
        assert_eq!(points[0].listed_market_cap, None);
        assert_eq!(points[1].listed_market_cap, Some(dec!(350000000000000)));
    }
}
