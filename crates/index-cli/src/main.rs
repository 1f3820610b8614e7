//! 대전 인덱스 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 긴 형식 CSV로 오늘까지 인덱스 산출
//! deajeon calculate --input data/prices.csv
//!
//! # 스냅샷 매니페스트로 특정 기간 산출
//! deajeon calculate --manifest data/manifest.csv --from 2025-01-01 --to 2025-06-19
//!
//! # 코스닥 지수와 최근 2년 비교
//! deajeon compare --index data/deajeon_index/deajeon_index_20250619.csv --benchmark data/kosdaq.csv
//!
//! # 2025년 KRX 휴장일
//! deajeon holidays --year 2025
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

mod commands;

use commands::calculate::{print_summary, run_calculate, CalculateConfig, InputSource};
use commands::compare::{run_compare, CompareConfig};
use commands::holidays::{render_holidays, OutputFormat};
use commands::show_config::render_config;
use commands::{parse_date, today_in_seoul};

use index_core::{init_logging, AppConfig, LogConfig, LogFormat, UnlistedPolicy, DEFAULT_CONFIG_PATH};
use index_data::KrxCalendar;
use index_engine::{ComparisonWindow, DEFAULT_WINDOW_DAYS};

#[derive(Parser)]
#[command(name = "deajeon")]
#[command(about = "대전 인덱스 - 대전 소재 코스닥 기업 동일 관심 지수 산출", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// 로그 형식 (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 대전 인덱스 산출
    Calculate {
        /// 긴 형식 시세 CSV (date,ticker,close,volume,market_cap)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 스냅샷 매니페스트 CSV (ticker,as_of,ohlcv_path,marcap_path)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// 분석 시작일 (YYYY-MM-DD, 기본: data.analysis_start)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 실행일 (YYYY-MM-DD, 기본: 오늘)
        #[arg(short, long)]
        to: Option<String>,

        /// 출력 디렉토리 (기본: data.output_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// 데이터가 없는 구성 종목을 매 거래일 특이사항에 표시
        #[arg(long, default_value = "false")]
        flag_unlisted: bool,

        /// 진행률 표시 끄기
        #[arg(long, default_value = "false")]
        no_progress: bool,
    },

    /// 코스닥 종합지수와 비교
    Compare {
        /// 대전 인덱스 결과 CSV
        #[arg(short, long)]
        index: PathBuf,

        /// 코스닥 종합지수 CSV
        #[arg(short, long)]
        benchmark: PathBuf,

        /// 비교 시작일 (YYYY-MM-DD, 기본: 종료일 - 730일)
        #[arg(short = 'f', long)]
        from: Option<String>,

        /// 비교 종료일 (YYYY-MM-DD, 기본: 오늘)
        #[arg(short, long)]
        to: Option<String>,

        /// 출력 디렉토리 (기본: data.output_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// KRX 휴장일 목록
    Holidays {
        /// 연도
        #[arg(short, long)]
        year: i32,

        /// 출력 형식 (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// 적용된 설정 출력 (TOML)
    Config,
}

fn setup_logging(cli: &Cli, config: &AppConfig) -> Result<()> {
    let mut log_config = LogConfig::from_settings(&config.logging);
    if let Some(level) = &cli.log_level {
        log_config.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        let format: LogFormat = format
            .parse()
            .map_err(|e: String| anyhow!("{}", e))?;
        log_config = log_config.with_format(format);
    }
    init_logging(log_config).map_err(|e| anyhow!("로깅 초기화 실패: {}", e))
}

fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("설정 로드 실패: {}", cli.config.display()))?;
    setup_logging(&cli, &config)?;

    match cli.command {
        Commands::Calculate {
            input,
            manifest,
            from,
            to,
            output_dir,
            flag_unlisted,
            no_progress,
        } => {
            let analysis_start = match from {
                Some(s) => Some(parse_date(&s)?),
                None => config.data.analysis_start,
            };
            let run_date = match to {
                Some(s) => parse_date(&s)?,
                None => today_in_seoul(),
            };
            let unlisted_policy = if flag_unlisted {
                UnlistedPolicy::Flag
            } else {
                config.engine.unlisted_policy
            };

            let calc = CalculateConfig {
                input: InputSource::resolve(input, manifest, &config)?,
                analysis_start,
                run_date,
                output_dir: output_dir.unwrap_or_else(|| config.data.output_dir.clone()),
                unlisted_policy,
                show_progress: !no_progress,
            };

            match run_calculate(&config, calc) {
                Ok(outcome) => {
                    info!(path = %outcome.output_path.display(), "인덱스 산출 완료");
                    print_summary(&outcome);
                }
                Err(e) => {
                    error!("인덱스 산출 실패: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Compare {
            index,
            benchmark,
            from,
            to,
            output_dir,
        } => {
            let end = match to {
                Some(s) => parse_date(&s)?,
                None => today_in_seoul(),
            };
            let window = match from {
                Some(s) => ComparisonWindow::new(parse_date(&s)?, end)?,
                None => ComparisonWindow::trailing(end, DEFAULT_WINDOW_DAYS),
            };

            let compare = CompareConfig {
                index_path: index,
                benchmark_path: benchmark,
                window,
                output_dir: output_dir.unwrap_or_else(|| config.data.output_dir.clone()),
            };

            match run_compare(&compare) {
                Ok((path, rows)) => {
                    info!(path = %path.display(), "비교 완료");
                    commands::compare::print_summary(&path, &rows, window.start);
                }
                Err(e) => {
                    error!("비교 실패: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Holidays { year, format } => {
            let format = OutputFormat::from_str(&format).ok_or_else(|| {
                anyhow!("Invalid format: {}. Supported: text, json", format)
            })?;
            let calendar = KrxCalendar::from_config(&config.calendar);
            println!("{}", render_holidays(&calendar, year, format)?);
        }

        Commands::Config => {
            println!("{}", render_config(&config)?);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("오류: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
