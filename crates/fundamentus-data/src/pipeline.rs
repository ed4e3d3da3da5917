//! 요청 → 추출 → 변환 파이프라인.
//!
//! 각 호출은 HTTP 요청을 정확히 한 번 수행하며 재시도하지 않습니다.
//! 여러 종목을 동시에 조회하려면 호출자가 독립적인 호출을 조합합니다.

use fundamentus_core::{
    AppConfig, Company, PropertyFund, Ticker, TransformContract, TransformedInformation,
};
use tracing::{info, instrument};

use crate::error::{FetchError, Result};
use crate::extraction::Extractor;
use crate::provider::{CachePolicy, HttpRequester, PageRequest, ReqwestRequester};
use crate::transformation::Transformer;

/// Fundamentus 파이프라인.
pub struct FundamentusPipeline<R: HttpRequester = ReqwestRequester> {
    requester: R,
    extractor: Extractor,
    transformer: Transformer,
    /// 상세 페이지 URL (목록 요청에도 사용)
    detail_url: String,
    /// 목록 링크의 절대 URL 기준
    base_url: String,
    /// 레이아웃 선택 파라미터 값
    interface: String,
}

impl FundamentusPipeline<ReqwestRequester> {
    /// 설정에서 reqwest 기반 파이프라인을 생성합니다.
    pub fn from_config(config: &AppConfig) -> std::result::Result<Self, FetchError> {
        let requester =
            ReqwestRequester::from_config(&config.http, CachePolicy::from_config(&config.cache))?;

        Ok(Self::new(
            requester,
            config.http.detail_url(),
            config.http.base_url.clone(),
            config.http.interface.clone(),
        ))
    }
}

impl<R: HttpRequester> FundamentusPipeline<R> {
    pub fn new(
        requester: R,
        detail_url: impl Into<String>,
        base_url: impl Into<String>,
        interface: impl Into<String>,
    ) -> Self {
        Self {
            requester,
            extractor: Extractor::new(),
            transformer: Transformer::new(),
            detail_url: detail_url.into(),
            base_url: base_url.into(),
            interface: interface.into(),
        }
    }

    pub fn requester(&self) -> &R {
        &self.requester
    }

    /// 종목 하나의 전체 정보를 조회합니다.
    ///
    /// 존재하지 않는 티커는 상세 레이아웃이 없는 페이지를 받게 되어
    /// 추출 오류가 됩니다 (`PipelineError::is_unknown_ticker`).
    #[instrument(name = "get_all_information", skip_all, fields(ticker = %ticker))]
    pub async fn get_all_information(
        &self,
        ticker: &Ticker,
    ) -> Result<TransformContract<TransformedInformation>> {
        info!("종목 정보 조회 시작");

        let request = PageRequest::detail(self.detail_url.as_str(), ticker, &self.interface);
        let contract = self.requester.make_request(&request).await?;

        let extracted = self.extractor.extract_all_information(&contract.response)?;
        let transformed = self.transformer.transform_all_information(extracted)?;

        info!(
            extraction_date = transformed.extraction_date,
            "종목 정보 조회 완료"
        );
        Ok(transformed)
    }

    /// 상장 기업 목록을 조회합니다.
    #[instrument(name = "list_all_companies", skip(self))]
    pub async fn list_all_companies(&self) -> Result<TransformContract<Vec<Company>>> {
        info!("기업 목록 조회 시작");

        let contract = self.fetch_directory().await?;
        let extracted = self.extractor.extract_companies(&contract)?;
        let transformed = self
            .transformer
            .transform_companies(extracted, &self.base_url)?;

        info!(count = transformed.transformed_information.len(), "기업 목록 조회 완료");
        Ok(transformed)
    }

    /// 부동산 펀드 목록을 조회합니다.
    #[instrument(name = "list_all_property_funds", skip(self))]
    pub async fn list_all_property_funds(&self) -> Result<TransformContract<Vec<PropertyFund>>> {
        info!("부동산 펀드 목록 조회 시작");

        let contract = self.fetch_directory().await?;
        let extracted = self.extractor.extract_property_funds(&contract)?;
        let transformed = self
            .transformer
            .transform_property_funds(extracted, &self.base_url)?;

        info!(
            count = transformed.transformed_information.len(),
            "부동산 펀드 목록 조회 완료"
        );
        Ok(transformed)
    }

    async fn fetch_directory(&self) -> Result<String> {
        let request = PageRequest::directory(self.detail_url.as_str());
        let contract = self.requester.make_request(&request).await?;
        Ok(contract.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::RequestContract;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    const MGLU3: &str = include_str!("../tests/fixtures/mglu3.html");
    const DIRECTORY: &str = include_str!("../tests/fixtures/directory.html");

    /// 고정 본문을 돌려주고 받은 요청을 기록하는 요청자.
    struct StubRequester {
        body: &'static str,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl StubRequester {
        fn new(body: &'static str) -> Self {
            Self {
                body,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<PageRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpRequester for StubRequester {
        async fn make_request(
            &self,
            request: &PageRequest,
        ) -> std::result::Result<RequestContract, FetchError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(RequestContract {
                status_code: 200,
                request: request.clone(),
                response: self.body.to_string(),
            })
        }
    }

    fn pipeline(body: &'static str) -> FundamentusPipeline<StubRequester> {
        FundamentusPipeline::new(
            StubRequester::new(body),
            "https://www.fundamentus.com.br/detalhes.php",
            "https://www.fundamentus.com.br/",
            "mobile",
        )
    }

    #[tokio::test]
    async fn test_get_all_information_sends_ticker_and_interface() {
        let pipeline = pipeline(MGLU3);
        let ticker = Ticker::new("mglu3").unwrap();

        let contract = pipeline.get_all_information(&ticker).await.unwrap();
        let info = contract.transformed_information;
        assert_eq!(info.price_information.price.value.as_decimal(), Some(dec!(4.56)));

        let requests = pipeline.requester().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].params,
            vec![
                ("papel".to_string(), "MGLU3".to_string()),
                ("interface".to_string(), "mobile".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_unknown_ticker_is_extraction_error() {
        let pipeline = pipeline(DIRECTORY);
        let ticker = Ticker::new("XXXX3").unwrap();

        let err = pipeline.get_all_information(&ticker).await.unwrap_err();
        assert!(err.is_unknown_ticker());
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_directory_request_has_no_params() {
        let pipeline = pipeline(DIRECTORY);

        let funds = pipeline.list_all_property_funds().await.unwrap();
        assert_eq!(funds.transformed_information.len(), 26);

        let requests = pipeline.requester().requests();
        assert!(requests[0].params.is_empty());
        assert_eq!(requests[0].url, "https://www.fundamentus.com.br/detalhes.php");
    }
}
