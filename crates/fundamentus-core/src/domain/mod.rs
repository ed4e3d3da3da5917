//! Fundamentus 도메인 모델.
//!
//! - `raw` - 추출 단계의 원시 문자열 레코드
//! - `information` - 변환 단계의 타입 지정 레코드
//! - `listing` - 기업/부동산 펀드 목록 항목
//! - `contract` - 단계 간 전달 봉투 (추출일 포함)

mod contract;
mod information;
mod listing;
mod raw;

pub use contract::*;
pub use information::*;
pub use listing::*;
pub use raw::*;
