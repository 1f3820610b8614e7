//! 인덱스 산출을 위한 도메인 모델.

mod basket;
mod daily;
mod record;
mod series;

pub use basket::*;
pub use daily::*;
pub use record::*;
pub use series::*;
