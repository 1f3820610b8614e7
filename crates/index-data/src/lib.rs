//! # Index Data
//!
//! 대전 인덱스 산출에 필요한 데이터 입출력을 담당합니다.
//!
//! - [`loader`]: 종목별 시세/시가총액 CSV, 스냅샷 매니페스트, 코스닥 벤치마크 로딩
//! - [`calendar`]: KRX 휴장일 달력
//! - [`storage`]: 산출 결과 및 비교 결과 CSV 저장

pub mod calendar;
pub mod error;
pub mod loader;
pub mod storage;

pub use calendar::{HolidayCalendar, HolidayKind, KrxCalendar};
pub use error::{DataError, Result};
pub use loader::{
    latest_entries, load_long_table, parse_date, read_benchmark_csv, read_manifest,
    SnapshotEntry, SnapshotLoader,
};
pub use storage::{
    comparison_file_name, read_index_csv, result_file_name, write_comparison_csv,
    write_index_csv, ResultWriter,
};
