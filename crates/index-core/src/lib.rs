//! # Index Core
//!
//! 대전 인덱스(Deajeon Index)의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 워크스페이스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 종목 코드 및 바스켓 정의
//! - 일별 시세/시가총액 레코드
//! - 기준 상태와 일별 인덱스 결과
//! - 벤치마크(코스닥) 시계열 포인트
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
pub use types::*;
