//! # Fundamentus Core
//!
//! Fundamentus 파이프라인의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 원시 추출 레코드 (제목, 툴팁, 값 문자열)
//! - 변환된 카테고리별 레코드 (Decimal 값)
//! - 기업/부동산 펀드 목록 항목
//! - 티커 타입
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod logging;
pub mod types;

pub use config::*;
pub use domain::*;
pub use logging::*;
pub use types::*;
