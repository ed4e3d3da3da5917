//! 페이지 요청 (파이프라인의 첫 단계).
//!
//! - `request` - 요청 설명, 응답 봉투, `HttpRequester` trait
//! - `http` - reqwest 기반 구현체
//! - `cache` - 명시적으로 주입되는 파일 기반 응답 캐시
//! - `user_agent` - 요청마다 무작위로 고르는 User-Agent 목록

pub mod cache;
pub mod http;
pub mod request;
pub mod user_agent;

pub use cache::{CachePolicy, ResponseCache};
pub use http::ReqwestRequester;
pub use request::{HttpRequester, PageRequest, RequestContract};
pub use user_agent::{random_user_agent, ALL_USER_AGENTS};
