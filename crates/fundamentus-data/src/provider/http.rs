//! reqwest 기반 HTTP 요청자.
//!
//! 요청마다 User-Agent를 무작위로 고르고, 고정 타임아웃을 적용하며,
//! 2xx가 아닌 응답은 즉시 실패합니다. 재시도는 하지 않습니다.

use async_trait::async_trait;
use fundamentus_core::HttpConfig;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

use super::cache::{CachePolicy, ResponseCache};
use super::request::{HttpRequester, PageRequest, RequestContract};
use super::user_agent::random_user_agent;
use crate::error::FetchError;

/// 기본 요청 타임아웃 (10초).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// `Content-Type`에 charset이 없을 때의 본문 인코딩 (페이지 선언값).
pub const DEFAULT_CHARSET: &str = "ISO-8859-1";

/// reqwest 기반 요청자.
pub struct ReqwestRequester {
    client: Client,
    cache: ResponseCache,
}

impl ReqwestRequester {
    /// 타임아웃과 캐시 정책으로 생성합니다.
    pub fn new(timeout: Duration, cache_policy: CachePolicy) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            cache: ResponseCache::new(cache_policy),
        })
    }

    /// HTTP 설정에서 생성합니다.
    pub fn from_config(http: &HttpConfig, cache_policy: CachePolicy) -> Result<Self, FetchError> {
        Self::new(http.timeout(), cache_policy)
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}

#[async_trait]
impl HttpRequester for ReqwestRequester {
    #[instrument(name = "http_request", skip(self, request), fields(url = %request.url))]
    async fn make_request(&self, request: &PageRequest) -> Result<RequestContract, FetchError> {
        let url = request.full_url()?;

        match self.cache.get(&url).await {
            Ok(Some(cached)) => {
                tracing::debug!(stored_at = %cached.stored_at, "캐시 적중");
                return Ok(RequestContract {
                    status_code: cached.status_code,
                    request: request.clone(),
                    response: cached.body,
                });
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "캐시 조회 실패, 실제 요청으로 대체"),
        }

        let user_agent = random_user_agent();
        tracing::debug!(user_agent, "요청 시작");

        let response = self
            .client
            .get(url.clone())
            .header(USER_AGENT, user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "비정상 응답 상태");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text_with_charset(DEFAULT_CHARSET).await?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "응답 수신");

        if let Err(e) = self.cache.put(&url, status.as_u16(), &body).await {
            tracing::warn!(error = %e, "캐시 저장 실패");
        }

        Ok(RequestContract {
            status_code: status.as_u16(),
            request: request.clone(),
            response: body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundamentus_core::Ticker;
    use mockito::Matcher;

    fn detail_request(server: &mockito::ServerGuard) -> PageRequest {
        let ticker = Ticker::new("MGLU3").unwrap();
        PageRequest::detail(format!("{}/detalhes.php", server.url()), &ticker, "mobile")
    }

    #[tokio::test]
    async fn test_make_request_returns_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/detalhes.php")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("papel".into(), "MGLU3".into()),
                Matcher::UrlEncoded("interface".into(), "mobile".into()),
            ]))
            .match_header("user-agent", Matcher::Regex("^Mozilla/5.0".into()))
            .with_status(200)
            .with_body("<html><h1 class=\"acao-papel\">MGLU3</h1></html>")
            .create_async()
            .await;

        let requester = ReqwestRequester::new(DEFAULT_TIMEOUT, CachePolicy::disabled()).unwrap();
        let request = detail_request(&server);
        let contract = requester.make_request(&request).await.unwrap();

        assert_eq!(contract.status_code, 200);
        assert_eq!(contract.request, request);
        assert!(contract.response.contains("MGLU3"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_fails() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/detalhes.php")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let requester = ReqwestRequester::new(DEFAULT_TIMEOUT, CachePolicy::disabled()).unwrap();
        let err = requester.make_request(&detail_request(&server)).await.unwrap_err();

        assert!(matches!(err, FetchError::Status { status: 503, .. }));
        assert!(err.is_retryable());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_second_request_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/detalhes.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("cached body")
            .expect(1)
            .create_async()
            .await;

        let policy = CachePolicy::new(dir.path(), Duration::from_secs(60));
        let requester = ReqwestRequester::new(DEFAULT_TIMEOUT, policy).unwrap();
        let request = detail_request(&server);

        let first = requester.make_request(&request).await.unwrap();
        let second = requester.make_request(&request).await.unwrap();

        assert_eq!(first.response, "cached body");
        assert_eq!(second.response, "cached body");
        assert_eq!(second.status_code, 200);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_response_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/detalhes.php")
            .match_query(Matcher::Any)
            .with_status(500)
            .expect(2)
            .create_async()
            .await;

        let policy = CachePolicy::new(dir.path(), Duration::from_secs(60));
        let requester = ReqwestRequester::new(DEFAULT_TIMEOUT, policy).unwrap();
        let request = detail_request(&server);

        assert!(requester.make_request(&request).await.is_err());
        assert!(requester.make_request(&request).await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_body_without_charset_is_latin1() {
        let mut server = mockito::Server::new_async().await;
        // "Cotação" / "Comércio" in ISO-8859-1
        let body: Vec<u8> = "<span>Cotação</span><span>Comércio</span>"
            .chars()
            .map(|c| c as u32 as u8)
            .collect();
        let _mock = server
            .mock("GET", "/detalhes.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(body)
            .create_async()
            .await;

        let requester = ReqwestRequester::new(DEFAULT_TIMEOUT, CachePolicy::disabled()).unwrap();
        let contract = requester.make_request(&detail_request(&server)).await.unwrap();

        assert_eq!(contract.response, "<span>Cotação</span><span>Comércio</span>");
        assert!(!contract.response.contains('\u{FFFD}'));
    }

    #[tokio::test]
    async fn test_header_charset_is_honored() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/detalhes.php")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body("<span>Cotação</span>")
            .create_async()
            .await;

        let requester = ReqwestRequester::new(DEFAULT_TIMEOUT, CachePolicy::disabled()).unwrap();
        let contract = requester.make_request(&detail_request(&server)).await.unwrap();

        assert_eq!(contract.response, "<span>Cotação</span>");
    }

    #[tokio::test]
    #[ignore] // 실제 네트워크 테스트는 ignore
    async fn test_fetch_live_page() {
        let requester = ReqwestRequester::new(DEFAULT_TIMEOUT, CachePolicy::disabled()).unwrap();
        let ticker = Ticker::new("MGLU3").unwrap();
        let request = PageRequest::detail("https://www.fundamentus.com.br/detalhes.php", &ticker, "mobile");

        let contract = requester.make_request(&request).await.unwrap();
        assert_eq!(contract.status_code, 200);
        assert!(contract.response.contains("MGLU3"));
    }
}
