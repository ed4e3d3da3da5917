//! 단계별 오류 타입.
//!
//! 각 단계는 하위 원인을 한 번만 감싸서 상위로 전달합니다.
//! 어떤 단계도 부분 결과를 반환하지 않습니다.

use thiserror::Error;

/// 요청 단계 오류.
#[derive(Debug, Error)]
pub enum FetchError {
    /// 네트워크/타임아웃/클라이언트 오류
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// 2xx가 아닌 응답
    #[error("Unexpected HTTP status {status} for {url}")]
    Status { status: u16, url: String },

    /// URL 조립 실패
    #[error("Invalid request URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl FetchError {
    /// 재시도하면 성공할 수도 있는 오류인지 확인합니다.
    ///
    /// 파이프라인은 재시도하지 않으며, 호출자가 판단할 때 사용합니다.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http(err) => err.is_timeout() || err.is_connect(),
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::InvalidUrl { .. } => false,
        }
    }
}

/// 응답 캐시 I/O 오류.
///
/// 파이프라인을 실패시키지 않고 경고 로그 후 실제 요청으로 대체됩니다.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache entry serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// HTML 구조가 기대한 스키마와 다를 때의 원인.
#[derive(Debug, Error)]
pub enum StructureError {
    #[error("Block '{block}' not found")]
    MissingBlock { block: &'static str },

    #[error("Element '{selector}' #{position} not found in block '{block}'")]
    MissingElement {
        block: &'static str,
        selector: &'static str,
        position: usize,
    },

    #[error("Attribute '{attribute}' not found in block '{block}'")]
    MissingAttribute {
        block: &'static str,
        attribute: &'static str,
    },

    #[error("Unexpected balance sheet shape: {left} and {right} entries per column")]
    UnexpectedBalanceSheetShape { left: usize, right: usize },

    #[error("Results table #{index} not found")]
    MissingTable { index: usize },

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector {
        selector: &'static str,
        reason: String,
    },
}

/// 추출 단계 오류.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// 상세 페이지 대신 목록(디렉터리) 페이지가 전달됨
    #[error("Directory listing page supplied where a stock detail page was expected")]
    DirectoryPage,

    #[error("Page structure mismatch while extracting {section}")]
    Structure {
        section: &'static str,
        #[source]
        source: StructureError,
    },
}

/// 숫자 문자열 정규화 실패 원인.
#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("Invalid decimal '{value}' (raw '{raw}'): {source}")]
    InvalidDecimal {
        raw: String,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// 변환 단계 오류.
#[derive(Debug, Error)]
pub enum TransformationError {
    /// 원시 레코드에 필드가 없음
    #[error("Missing raw field '{key}' in {category}")]
    MissingField {
        category: &'static str,
        key: &'static str,
    },

    #[error("Could not normalize {category}.{key}")]
    Normalization {
        category: &'static str,
        key: &'static str,
        #[source]
        source: NormalizationError,
    },
}

/// 파이프라인 전체 오류.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Transformation(#[from] TransformationError),
}

impl PipelineError {
    /// 알 수 없는 티커로 인한 실패일 가능성이 높은지 확인합니다.
    ///
    /// 존재하지 않는 티커는 상세 레이아웃이 없는 페이지를 돌려받으므로
    /// 추출 오류로 나타납니다.
    pub fn is_unknown_ticker(&self) -> bool {
        matches!(self, PipelineError::Extraction(_))
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            PipelineError::Fetch(err) => err.is_retryable(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
