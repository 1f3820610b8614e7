//! 대전 인덱스 산출 커맨드.

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use indicatif::ProgressBar;
use std::path::PathBuf;
use tracing::{info, warn};

use index_core::{AppConfig, DecimalExt, IndexError, IndexReport, PriceRecord, UnlistedPolicy};
use index_data::{load_long_table, KrxCalendar, ResultWriter, SnapshotLoader};
use index_engine::{IndexEngine, ProgressObserver};

use super::progress_bar;

/// 시세 입력 경로.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// `date,ticker,close,volume,market_cap` 단일 CSV
    LongTable(PathBuf),
    /// 종목별 스냅샷 매니페스트
    Manifest(PathBuf),
}

impl InputSource {
    /// 명령행 인자가 설정 파일보다 우선합니다.
    pub fn resolve(
        input: Option<PathBuf>,
        manifest: Option<PathBuf>,
        config: &AppConfig,
    ) -> Result<Self> {
        match (input, manifest) {
            (Some(_), Some(_)) => bail!("--input과 --manifest는 함께 지정할 수 없습니다"),
            (Some(path), None) => Ok(Self::LongTable(path)),
            (None, Some(path)) => Ok(Self::Manifest(path)),
            (None, None) => match (&config.data.long_table, &config.data.manifest) {
                (Some(path), _) => Ok(Self::LongTable(path.clone())),
                (None, Some(path)) => Ok(Self::Manifest(path.clone())),
                (None, None) => bail!(
                    "입력 데이터가 없습니다. --input/--manifest 또는 data.long_table/data.manifest를 지정하세요"
                ),
            },
        }
    }
}

/// 산출 설정.
#[derive(Debug, Clone)]
pub struct CalculateConfig {
    pub input: InputSource,
    pub analysis_start: Option<NaiveDate>,
    pub run_date: NaiveDate,
    pub output_dir: PathBuf,
    pub unlisted_policy: UnlistedPolicy,
    pub show_progress: bool,
}

/// 산출 결과 요약.
#[derive(Debug)]
pub struct CalculateOutcome {
    pub report: IndexReport,
    pub output_path: PathBuf,
}

/// 진행률 표시줄을 엔진 진행 상황에 연결합니다.
struct BarObserver(ProgressBar);

impl ProgressObserver for BarObserver {
    fn on_start(&mut self, total_days: u64) {
        self.0.set_length(total_days);
    }

    fn on_day(&mut self, _date: NaiveDate) {
        self.0.inc(1);
    }

    fn on_finish(&mut self) {
        self.0.finish_with_message("산출 완료");
    }
}

fn load_records(
    input: &InputSource,
    app: &AppConfig,
    run_date: NaiveDate,
    show_progress: bool,
) -> Result<Vec<PriceRecord>> {
    match input {
        InputSource::LongTable(path) => load_long_table(path)
            .with_context(|| format!("시세 파일 로드 실패: {}", path.display())),
        InputSource::Manifest(path) => {
            let loader = SnapshotLoader::from_manifest(path)
                .with_context(|| format!("매니페스트 로드 실패: {}", path.display()))?;
            let basket = &app.basket.tickers;
            let pb = progress_bar(basket.len() as u64, "종목 로딩", show_progress)?;
            let records = loader.load_with_progress(basket, run_date, |ticker| {
                pb.set_message(format!("종목 로딩 {}", ticker));
                pb.inc(1);
            });
            pb.finish_and_clear();
            Ok(records)
        }
    }
}

/// 인덱스를 산출하고 결과 파일을 저장합니다.
pub fn run_calculate(app: &AppConfig, config: CalculateConfig) -> Result<CalculateOutcome> {
    if let Some(start) = config.analysis_start {
        if start > config.run_date {
            return Err(IndexError::InvalidRange {
                start,
                end: config.run_date,
            }
            .into());
        }
    }

    info!(
        input = ?config.input,
        run_date = %config.run_date,
        "대전 인덱스 산출 시작"
    );

    let records = load_records(&config.input, app, config.run_date, config.show_progress)?;
    if records.is_empty() {
        warn!("로드된 시세 레코드가 없습니다");
    }

    let calendar = KrxCalendar::from_config(&app.calendar);
    let engine = IndexEngine::new(app.basket.tickers.clone(), calendar)
        .with_unlisted_policy(config.unlisted_policy)
        .with_analysis_start(config.analysis_start);

    let mut observer = BarObserver(progress_bar(0, "인덱스 산출", config.show_progress)?);
    let report = engine
        .run_with_observer(&records, config.run_date, &mut observer)
        .context("인덱스 산출 실패")?;

    let writer = ResultWriter::new(&config.output_dir);
    let output_path = writer
        .write_index(&report.rows, config.run_date)
        .with_context(|| format!("결과 저장 실패: {}", config.output_dir.display()))?;

    Ok(CalculateOutcome {
        report,
        output_path,
    })
}

/// 산출 결과 요약 출력.
pub fn print_summary(outcome: &CalculateOutcome) {
    let report = &outcome.report;
    println!("\n=== 대전 인덱스 산출 결과 ===");
    println!("기준일: {}", report.base.base_date);
    println!("기준 시가총액: {} 원", report.base.base_market_cap);
    println!("기준 인덱스: {}", report.base.base_index_value);
    println!("산출 일수: {}", report.rows.len());
    if let Some(latest) = report.latest_index() {
        println!("최근 인덱스: {}", latest.round_half_up(2));
    }
    println!("누락 발생 일수: {}", report.days_with_gaps());
    if !report.unlisted.is_empty() {
        println!("데이터 없는 구성 종목: {}", report.unlisted.join(", "));
    }
    println!("저장 경로: {}", outcome.output_path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use index_core::Basket;
    use std::fs;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_resolve_input_prefers_cli() {
        let mut app = AppConfig::default();
        app.data.manifest = Some(PathBuf::from("config_manifest.csv"));

        let source = InputSource::resolve(Some(PathBuf::from("long.csv")), None, &app).unwrap();
        assert_eq!(source, InputSource::LongTable(PathBuf::from("long.csv")));

        let source = InputSource::resolve(None, None, &app).unwrap();
        assert_eq!(source, InputSource::Manifest(PathBuf::from("config_manifest.csv")));

        assert!(InputSource::resolve(
            Some(PathBuf::from("a.csv")),
            Some(PathBuf::from("b.csv")),
            &app
        )
        .is_err());
        assert!(InputSource::resolve(None, None, &AppConfig::default()).is_err());
    }

    #[test]
    fn test_run_calculate_writes_result() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("long.csv");
        fs::write(
            &input,
            "date,ticker,close,volume,market_cap\n\
             2025-03-04,000250,1,1,100\n\
             2025-03-04,287840,1,1,300\n\
             2025-03-05,000250,1,1,150\n\
             2025-03-05,287840,1,1,450\n",
        )
        .unwrap();

        let mut app = AppConfig::default();
        app.basket.tickers = Basket::new(["000250", "287840"]);

        let outcome = run_calculate(
            &app,
            CalculateConfig {
                input: InputSource::LongTable(input),
                analysis_start: None,
                run_date: d("2025-03-05"),
                output_dir: dir.path().join("out"),
                unlisted_policy: UnlistedPolicy::Ignore,
                show_progress: false,
            },
        )
        .unwrap();

        assert!(outcome.output_path.ends_with("deajeon_index_20250305.csv"));
        assert_eq!(outcome.report.rows.len(), 2);
        assert_eq!(outcome.report.latest_index(), Some(rust_decimal::Decimal::from(150)));
        assert!(outcome.output_path.exists());
    }
}
