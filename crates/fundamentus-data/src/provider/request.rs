//! 요청 설명과 응답 봉투.

use async_trait::async_trait;
use fundamentus_core::Ticker;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// 종목 코드 파라미터 키.
pub const TICKER_PARAM: &str = "papel";
/// 레이아웃 선택 파라미터 키.
pub const INTERFACE_PARAM: &str = "interface";

/// GET 요청 하나의 설명 (URL + 쿼리 파라미터).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub url: String,
    pub params: Vec<(String, String)>,
}

impl PageRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            params: Vec::new(),
        }
    }

    /// 쿼리 파라미터를 추가합니다.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// 종목 상세 페이지 요청.
    pub fn detail(detail_url: impl Into<String>, ticker: &Ticker, interface: &str) -> Self {
        Self::new(detail_url)
            .with_param(TICKER_PARAM, ticker.as_str())
            .with_param(INTERFACE_PARAM, interface)
    }

    /// 기업/부동산 펀드 목록 페이지 요청.
    ///
    /// 종목 코드 없이 상세 페이지를 요청하면 사이트가 전체 목록을 돌려줍니다.
    pub fn directory(detail_url: impl Into<String>) -> Self {
        Self::new(detail_url)
    }

    /// 쿼리 문자열까지 인코딩된 전체 URL.
    pub fn full_url(&self) -> Result<Url, FetchError> {
        let parsed = if self.params.is_empty() {
            Url::parse(&self.url)
        } else {
            Url::parse_with_params(&self.url, &self.params)
        };

        parsed.map_err(|e| FetchError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })
    }
}

/// 요청 결과 봉투 (상태 코드, 원래 요청, 응답 본문).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContract {
    pub status_code: u16,
    pub request: PageRequest,
    pub response: String,
}

/// HTML 페이지를 가져오는 요청자.
///
/// 2xx가 아닌 응답은 `FetchError::Status`로 실패해야 합니다.
#[async_trait]
pub trait HttpRequester: Send + Sync {
    async fn make_request(&self, request: &PageRequest) -> Result<RequestContract, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_request_params() {
        let ticker = Ticker::new("mglu3").unwrap();
        let request = PageRequest::detail("https://www.fundamentus.com.br/detalhes.php", &ticker, "mobile");

        let url = request.full_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.fundamentus.com.br/detalhes.php?papel=MGLU3&interface=mobile"
        );
    }

    #[test]
    fn test_directory_request_has_no_query() {
        let request = PageRequest::directory("https://www.fundamentus.com.br/detalhes.php");
        let url = request.full_url().unwrap();
        assert_eq!(url.as_str(), "https://www.fundamentus.com.br/detalhes.php");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_invalid_url() {
        let request = PageRequest::new("not a url").with_param("papel", "MGLU3");
        assert!(matches!(request.full_url(), Err(FetchError::InvalidUrl { .. })));
    }
}
