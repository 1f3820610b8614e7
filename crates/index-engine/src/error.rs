//! 엔진 오류 타입.
//!
//! 산출 도중의 이상 징후(휴장일 데이터, 누락 등)는 오류가 아니라 결과 행의 특이사항으로 기록됩니다.
//! 여기의 오류는 산출 시작 전 전제 조건 위반만 나타냅니다.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// 분석 기간 내 바스켓 종목 레코드가 없음
    #[error("분석 기간 내 구성 종목 데이터가 없습니다")]
    NoData,

    /// 실행일이 기준일보다 이전
    #[error("실행일({run_date})이 기준일({base_date})보다 이전입니다")]
    InvalidRange {
        base_date: NaiveDate,
        run_date: NaiveDate,
    },

    /// 비교 구간 내 한쪽 시계열이 비어 있음
    #[error("비교할 데이터가 부족합니다: {0}")]
    InsufficientData(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
