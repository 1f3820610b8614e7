//! 대전 인덱스와 코스닥 지수 비교 커맨드.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

use index_core::{ComparisonRow, DecimalExt};
use index_data::{read_benchmark_csv, read_index_csv, ResultWriter};
use index_engine::{build_comparison, ComparisonWindow};

/// 비교 설정.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// `calculate`가 저장한 결과 파일
    pub index_path: PathBuf,
    /// 코스닥 종합지수 CSV
    pub benchmark_path: PathBuf,
    pub window: ComparisonWindow,
    pub output_dir: PathBuf,
}

/// 비교 테이블을 만들고 저장합니다. 저장 경로와 행을 반환합니다.
pub fn run_compare(config: &CompareConfig) -> Result<(PathBuf, Vec<ComparisonRow>)> {
    let index = read_index_csv(&config.index_path)
        .with_context(|| format!("인덱스 결과 로드 실패: {}", config.index_path.display()))?;
    let benchmark = read_benchmark_csv(&config.benchmark_path).with_context(|| {
        format!("벤치마크 로드 실패: {}", config.benchmark_path.display())
    })?;

    info!(
        index_rows = index.len(),
        benchmark_rows = benchmark.len(),
        start = %config.window.start,
        end = %config.window.end,
        "비교 시작"
    );

    let rows = build_comparison(&index, &benchmark, config.window).context("비교 계산 실패")?;

    let path = ResultWriter::new(&config.output_dir)
        .write_comparison(&rows, config.window.end)
        .with_context(|| format!("비교 결과 저장 실패: {}", config.output_dir.display()))?;
    Ok((path, rows))
}

/// 구간 마지막 행 기준 요약 출력.
pub fn print_summary(path: &std::path::Path, rows: &[ComparisonRow], start: NaiveDate) {
    println!("\n=== 대전 인덱스 vs 코스닥 ({} 기준 = 100) ===", start);
    let last_index = rows.iter().rev().find_map(|r| r.index_normalized);
    let last_benchmark = rows.iter().rev().find_map(|r| r.benchmark_normalized);
    if let Some(v) = last_index {
        println!("대전 인덱스 (정규화): {}", v.round_half_up(2));
    }
    if let Some(v) = last_benchmark {
        println!("코스닥 지수 (정규화): {}", v.round_half_up(2));
    }
    if let Some(v) = rows.iter().rev().find_map(|r| r.index_market_cap_eok) {
        println!("대전 인덱스 시가총액: {} 억 원", v.round_half_up(0));
    }
    if let Some(v) = rows.iter().rev().find_map(|r| r.benchmark_market_cap_eok) {
        println!("코스닥 상장 시가총액: {} 억 원", v.round_half_up(0));
    }
    println!("비교 일수: {}", rows.len());
    println!("저장 경로: {}", path.display());
}
