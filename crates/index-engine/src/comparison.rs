//! 대전 인덱스와 코스닥 종합지수 비교.
//!
//! 두 시계열을 구간 첫 값 = 100으로 정규화하고, 시가총액은 억 원 단위로 바꾼 뒤
//! 날짜 기준 외부 조인합니다.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use tracing::info;

use index_core::{BenchmarkPoint, ComparisonRow, DecimalExt, IndexPoint, IndexValue, MarketCap, Price};

use crate::error::{EngineError, Result};

/// 기본 비교 구간 (약 2년).
pub const DEFAULT_WINDOW_DAYS: i64 = 730;

const NORMALIZED_BASE: Decimal = dec!(100);

/// 비교 구간 `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ComparisonWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(EngineError::InvalidRange {
                base_date: start,
                run_date: end,
            });
        }
        Ok(Self { start, end })
    }

    /// `end`에서 `days`일 전부터 `end`까지.
    pub fn trailing(end: NaiveDate, days: i64) -> Self {
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// 첫 값을 100으로 하는 정규화. 첫 값이 0이면 정규화 값은 모두 `None`입니다.
/// 표현 범위를 넘는 값도 `None`입니다.
pub fn normalize_series(values: &[(NaiveDate, Decimal)]) -> Vec<(NaiveDate, Option<Decimal>)> {
    let first = values.first().map(|(_, v)| *v).filter(|v| !v.is_zero());
    values
        .iter()
        .map(|(date, v)| {
            let normalized = first
                .and_then(|base| v.checked_div(base))
                .and_then(|ratio| ratio.checked_mul(NORMALIZED_BASE));
            (*date, normalized)
        })
        .collect()
}

#[derive(Default)]
struct Side {
    value: Option<Decimal>,
    normalized: Option<Decimal>,
    market_cap_eok: Option<Decimal>,
}

/// 정렬된 (날짜, 값, 시가총액) 목록을 정규화/억 원 변환한 날짜별 값으로 만듭니다.
fn prepare(series: Vec<(NaiveDate, Decimal, MarketCap)>) -> BTreeMap<NaiveDate, Side> {
    let values: Vec<(NaiveDate, Decimal)> = series.iter().map(|(d, v, _)| (*d, *v)).collect();
    normalize_series(&values)
        .into_iter()
        .zip(series)
        .map(|((date, normalized), (_, value, cap))| {
            (
                date,
                Side {
                    value: Some(value),
                    normalized,
                    market_cap_eok: Some(cap.to_eok()),
                },
            )
        })
        .collect()
}

/// 비교 테이블을 만듭니다.
///
/// 인덱스 값이나 시가총액이 비어 있는 행, 종가나 상장시가총액이 비어 있는 벤치마크 행은 제외합니다.
/// 구간 내 한쪽 시계열이 비어 있으면 [`EngineError::InsufficientData`].
pub fn build_comparison(
    index: &[IndexPoint],
    benchmark: &[BenchmarkPoint],
    window: ComparisonWindow,
) -> Result<Vec<ComparisonRow>> {
    let mut index_series: Vec<(NaiveDate, IndexValue, MarketCap)> = index
        .iter()
        .filter(|p| window.contains(p.date))
        .filter_map(|p| Some((p.date, p.index_value?, p.aggregate_market_cap?)))
        .collect();
    index_series.sort_by_key(|(d, _, _)| *d);

    let mut benchmark_series: Vec<(NaiveDate, Price, MarketCap)> = benchmark
        .iter()
        .filter(|p| window.contains(p.date))
        .filter_map(|p| Some((p.date, p.close?, p.listed_market_cap?)))
        .collect();
    benchmark_series.sort_by_key(|(d, _, _)| *d);

    if index_series.is_empty() {
        return Err(EngineError::InsufficientData(format!(
            "{} ~ {} 구간에 대전 인덱스 값이 없습니다",
            window.start, window.end
        )));
    }
    if benchmark_series.is_empty() {
        return Err(EngineError::InsufficientData(format!(
            "{} ~ {} 구간에 코스닥 지수 값이 없습니다",
            window.start, window.end
        )));
    }

    let mut index_side = prepare(index_series);
    let mut benchmark_side = prepare(benchmark_series);

    let dates: Vec<NaiveDate> = index_side
        .keys()
        .chain(benchmark_side.keys())
        .copied()
        .collect::<std::collections::BTreeSet<_>>()
        .into_iter()
        .collect();

    let rows: Vec<ComparisonRow> = dates
        .into_iter()
        .map(|date| {
            let idx = index_side.remove(&date).unwrap_or_default();
            let bm = benchmark_side.remove(&date).unwrap_or_default();
            ComparisonRow {
                date,
                index_value: idx.value,
                index_normalized: idx.normalized,
                benchmark_close: bm.value,
                benchmark_normalized: bm.normalized,
                index_market_cap_eok: idx.market_cap_eok,
                benchmark_market_cap_eok: bm.market_cap_eok,
            }
        })
        .collect();

    info!(
        start = %window.start,
        end = %window.end,
        rows = rows.len(),
        "비교 테이블 생성"
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn ip(date: &str, value: Option<Decimal>, cap: Option<Decimal>) -> IndexPoint {
        IndexPoint {
            date: d(date),
            index_value: value,
            aggregate_market_cap: cap,
        }
    }

    fn bp(date: &str, close: Option<Decimal>, cap: Option<Decimal>) -> BenchmarkPoint {
        BenchmarkPoint {
            date: d(date),
            close,
            listed_market_cap: cap,
        }
    }

    #[test]
    fn test_normalize_series() {
        let values = vec![(d("2025-01-02"), dec!(200)), (d("2025-01-03"), dec!(250))];
        let normalized = normalize_series(&values);
        assert_eq!(normalized[0].1, Some(dec!(100)));
        assert_eq!(normalized[1].1, Some(dec!(125)));

        let zero = normalize_series(&[(d("2025-01-02"), Decimal::ZERO)]);
        assert_eq!(zero[0].1, None);

        let huge = Decimal::from_i128_with_scale(10_i128.pow(27), 0);
        let overflow = normalize_series(&[(d("2025-01-02"), dec!(0.001)), (d("2025-01-03"), huge)]);
        assert_eq!(overflow[0].1, Some(dec!(100)));
        assert_eq!(overflow[1].1, None);
    }

    #[test]
    fn test_window() {
        let window = ComparisonWindow::trailing(d("2025-06-19"), DEFAULT_WINDOW_DAYS);
        assert_eq!(window.start, d("2023-06-20"));
        assert!(window.contains(d("2025-06-19")));
        assert!(!window.contains(d("2023-06-19")));
        assert!(ComparisonWindow::new(d("2025-01-02"), d("2025-01-01")).is_err());
    }

    #[test]
    fn test_build_comparison_outer_join() {
        let index = vec![
            ip("2024-12-31", Some(dec!(90)), Some(dec!(1))),
            ip("2025-01-02", Some(dec!(100)), Some(dec!(500_000_000_000))),
            ip("2025-01-03", Some(dec!(110)), Some(dec!(550_000_000_000))),
            ip("2025-01-04", None, None),
        ];
        let benchmark = vec![
            bp("2025-01-03", Some(dec!(700)), Some(dec!(350_000_000_000_000))),
            bp("2025-01-06", Some(dec!(714)), Some(dec!(357_000_000_000_000))),
            bp("2025-01-07", None, Some(dec!(1))),
        ];
        let window = ComparisonWindow::new(d("2025-01-01"), d("2025-01-10")).unwrap();

        let rows = build_comparison(&index, &benchmark, window).unwrap();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].date, d("2025-01-02"));
        assert_eq!(rows[0].index_normalized, Some(dec!(100)));
        assert_eq!(rows[0].index_market_cap_eok, Some(dec!(5000)));
        assert_eq!(rows[0].benchmark_close, None);

        assert_eq!(rows[1].index_normalized, Some(dec!(110)));
        assert_eq!(rows[1].benchmark_normalized, Some(dec!(100)));
        assert_eq!(rows[1].benchmark_market_cap_eok, Some(dec!(3_500_000)));

        assert_eq!(rows[2].date, d("2025-01-06"));
        assert_eq!(rows[2].index_value, None);
        assert_eq!(rows[2].benchmark_normalized, Some(dec!(102)));
    }

    #[test]
    fn test_insufficient_data() {
        let index = vec![ip("2025-01-02", Some(dec!(100)), Some(dec!(1)))];
        let window = ComparisonWindow::new(d("2025-01-01"), d("2025-01-10")).unwrap();
        assert!(matches!(
            build_comparison(&index, &[], window),
            Err(EngineError::InsufficientData(_))
        ));
        assert!(matches!(
            build_comparison(&[], &[bp("2025-01-02", Some(dec!(1)), Some(dec!(1)))], window),
            Err(EngineError::InsufficientData(_))
        ));
    }
}
