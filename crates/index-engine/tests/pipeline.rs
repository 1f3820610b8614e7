//! 로딩 → 산출 → 저장 → 비교 전체 흐름 통합 테스트.

use chrono::NaiveDate;
use index_core::{Basket, UnlistedPolicy};
use index_data::{
    load_long_table, read_benchmark_csv, read_index_csv, KrxCalendar, ResultWriter,
};
use index_engine::{build_comparison, ComparisonWindow, IndexEngine};
use rust_decimal_macros::dec;
use std::fs;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// 2025년 설 연휴(1/27~1/30) 전후 3종목 데이터. 950130은 1/24부터 상장.
const LONG_TABLE: &str = "date,ticker,close,volume,market_cap
2025-01-23,000250,50000,100,200000000000
2025-01-23,287840,20000,100,200000000000
2025-01-24,000250,51000,100,220000000000
2025-01-24,287840,20000,100,200000000000
2025-01-24,950130,8000,100,80000000000
2025-01-28,000250,52000,100,999
2025-01-31,000250,52000,100,240000000000
2025-01-31,287840,21000,100,210000000000
2025-02-03,000250,52000,100,240000000000
2025-02-03,287840,21000,100,210000000000
2025-02-03,950130,8100,100,90000000000
";

#[test]
fn test_calculate_with_krx_calendar() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prices.csv");
    fs::write(&input, LONG_TABLE).unwrap();

    let records = load_long_table(&input).unwrap();
    let basket = Basket::new(["000250", "287840", "950130", "035720"]);
    let engine = IndexEngine::new(basket, KrxCalendar::new())
        .with_unlisted_policy(UnlistedPolicy::Ignore);
    let report = engine.run(&records, d("2025-02-03")).unwrap();

    assert_eq!(report.base.base_date, d("2025-01-23"));
    assert_eq!(report.base.base_market_cap, dec!(400000000000));
    assert_eq!(report.unlisted, vec!["035720".to_string()]);
    assert_eq!(report.rows.len(), 12);

    let row = |date: &str| {
        report
            .rows
            .iter()
            .find(|r| r.date == d(date))
            .unwrap()
            .clone()
    };

    // 950130은 첫 등장(1/24) 전이므로 1/23에 누락으로 표시되지 않는다
    assert_eq!(row("2025-01-23").note(), "");
    assert!(!row("2025-01-23").note().contains("950130"));

    // 1/24: 3종목 합 5,000억 → 125
    assert_eq!(row("2025-01-24").index_value, Some(dec!(125)));
    assert_eq!(row("2025-01-24").note(), "");

    // 1/27 임시공휴일, 1/28 설날에 데이터 존재
    assert_eq!(row("2025-01-27").note(), "holiday");
    assert_eq!(row("2025-01-28").note(), "holiday data present: 000250");
    // 채우기 후 휴장일도 직전 값
    assert_eq!(row("2025-01-28").index_value, Some(dec!(125)));

    // 1/31: 950130 누락, 합 4,500억 → 112.5
    assert_eq!(row("2025-01-31").index_value, Some(dec!(112.5)));
    assert_eq!(row("2025-01-31").note(), "missing: 950130");

    // 2/3: 합 5,400억 → 135
    assert_eq!(row("2025-02-03").index_value, Some(dec!(135)));
    assert_eq!(report.latest_index(), Some(dec!(135)));
    assert_eq!(report.days_with_gaps(), 1);
}

#[test]
fn test_saved_result_feeds_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("prices.csv");
    fs::write(&input, LONG_TABLE).unwrap();
    let benchmark_path = dir.path().join("kosdaq.csv");
    fs::write(
        &benchmark_path,
        "일자,종가,대비,상장시가총액\n\
         2025/01/23,700.00,0,\"350,000,000,000,000\"\n\
         2025/01/24,728.00,28,\"364,000,000,000,000\"\n\
         2025/01/31,714.00,-14,\"357,000,000,000,000\"\n",
    )
    .unwrap();

    let records = load_long_table(&input).unwrap();
    let engine = IndexEngine::new(Basket::new(["000250", "287840", "950130"]), KrxCalendar::new());
    let report = engine.run(&records, d("2025-02-03")).unwrap();

    let writer = ResultWriter::new(dir.path().join("out"));
    let saved = writer.write_index(&report.rows, d("2025-02-03")).unwrap();

    let index = read_index_csv(&saved).unwrap();
    let benchmark = read_benchmark_csv(&benchmark_path).unwrap();
    let window = ComparisonWindow::new(d("2025-01-23"), d("2025-02-03")).unwrap();
    let rows = build_comparison(&index, &benchmark, window).unwrap();

    // 인덱스는 매일 값이 있으므로 조인 결과는 구간 전체 날짜
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0].index_normalized, Some(dec!(100)));
    assert_eq!(rows[0].benchmark_normalized, Some(dec!(100)));
    assert_eq!(rows[0].index_market_cap_eok, Some(dec!(4000)));
    assert_eq!(rows[1].benchmark_normalized, Some(dec!(104)));
    assert_eq!(rows[2].benchmark_close, None);

    let out = writer.write_comparison(&rows, d("2025-02-03")).unwrap();
    assert!(out.ends_with("comparison_20250203.csv"));
    assert!(out.exists());
}
