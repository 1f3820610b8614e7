//! # Index Engine
//!
//! 대전 인덱스 산출 엔진과 코스닥 비교 계산.
//!
//! 산출은 두 단계의 순수 변환으로 이루어집니다:
//! 1. 날짜별 집계([`group_by_date`]) 후 기준일부터 실행일까지 하루씩 [`step`]을 적용
//! 2. 전체 결과에 [`forward_fill`] 적용
//!
//! ```rust,ignore
//! use index_engine::IndexEngine;
//! use index_data::KrxCalendar;
//!
//! let engine = IndexEngine::new(basket, KrxCalendar::new());
//! let report = engine.run(&records, run_date)?;
//! ```

pub mod comparison;
pub mod engine;
pub mod error;

pub use comparison::{build_comparison, normalize_series, ComparisonWindow, DEFAULT_WINDOW_DAYS};
pub use engine::{
    compute_base, first_appearance, forward_fill, group_by_date, step, DaySnapshot,
    IndexEngine, ProgressObserver, WalkContext,
};
pub use error::{EngineError, Result};
