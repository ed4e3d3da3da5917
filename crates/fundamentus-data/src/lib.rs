//! # Fundamentus Data
//!
//! Fundamentus 상세/목록 페이지를 가져와 타입 지정 레코드로 바꾸는 파이프라인.
//!
//! ## 단계
//! 1. `provider` - HTTP 요청 (랜덤 User-Agent, 타임아웃, 선택적 응답 캐시)
//! 2. `extraction` - HTML → 원시 (제목, 툴팁, 값) 문자열
//! 3. `transformation` - 원시 문자열 → 정확한 `Decimal` 값
//!
//! `pipeline::FundamentusPipeline`이 세 단계를 순서대로 묶습니다.
//!
//! ## 사용 예시
//! ```rust,ignore
//! let pipeline = FundamentusPipeline::from_config(&AppConfig::default())?;
//! let ticker: Ticker = "MGLU3".parse()?;
//! let info = pipeline.get_all_information(&ticker).await?;
//! println!("Cotação: {:?}", info.transformed_information.price_information.price.value);
//! ```

pub mod error;
pub mod extraction;
pub mod pipeline;
pub mod provider;
pub mod transformation;

pub use error::*;
pub use extraction::Extractor;
pub use pipeline::FundamentusPipeline;
pub use provider::{
    CachePolicy, HttpRequester, PageRequest, RequestContract, ReqwestRequester, ResponseCache,
};
pub use transformation::{number_processing, string_processing, Transformer};
