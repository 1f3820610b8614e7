//! 설정 관리.
//!
//! 우선순위: 기본값 → 설정 파일(TOML) → 환경 변수(`DEAJEON__<SECTION>__<KEY>`).
//! 환경 변수를 읽기 전에 `.env` 파일이 있으면 로드합니다.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::{Basket, UnlistedPolicy};
use crate::error::{IndexError, IndexResult};

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "DEAJEON";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// 구성 종목
    pub basket: BasketConfig,
    /// 입출력 경로 및 분석 기간
    pub data: DataConfig,
    /// 휴장일 달력
    pub calendar: CalendarConfig,
    /// 인덱스 엔진
    pub engine: EngineConfig,
    /// 로깅
    pub logging: LoggingConfig,
}

/// 구성 종목 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BasketConfig {
    pub tickers: Basket,
}

/// 데이터 경로 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataConfig {
    /// 종목별 스냅샷 매니페스트 (ticker,as_of,ohlcv_path,marcap_path)
    pub manifest: Option<PathBuf>,
    /// 단일 롱 테이블 CSV (date,ticker,close,volume,market_cap)
    pub long_table: Option<PathBuf>,
    /// 결과 저장 디렉토리
    pub output_dir: PathBuf,
    /// 분석 시작일 (없으면 데이터 전체)
    pub analysis_start: Option<NaiveDate>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            manifest: None,
            long_table: None,
            output_dir: PathBuf::from("./data/deajeon_index"),
            analysis_start: None,
        }
    }
}

/// 휴장일 달력 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// 근로자의 날, 연말 휴장일 포함 여부
    pub exchange_closures: bool,
    /// 추가 휴장일 (임시공휴일 등)
    pub extra_holidays: Vec<NaiveDate>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            exchange_closures: true,
            extra_holidays: Vec::new(),
        }
    }
}

/// 인덱스 엔진 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub unlisted_policy: UnlistedPolicy,
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// span 진입/종료 이벤트 출력
    pub span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            span_events: false,
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> IndexResult<Self> {
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("basket.tickers")
                    .with_list_parse_key("calendar.extra_holidays")
                    .try_parsing(true),
            );

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 설정 값의 일관성을 검사합니다.
    pub fn validate(&self) -> IndexResult<()> {
        if self.basket.tickers.is_empty() {
            return Err(IndexError::Config("basket.tickers가 비어 있습니다".to_string()));
        }
        if self.data.manifest.is_some() && self.data.long_table.is_some() {
            return Err(IndexError::Config(
                "data.manifest와 data.long_table은 함께 지정할 수 없습니다".to_string(),
            ));
        }
        Ok(())
    }
}
