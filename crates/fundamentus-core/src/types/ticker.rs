//! 티커(종목 코드) 타입.
//!
//! 브라질 거래소의 종목 코드는 영문 대문자와 숫자로만 구성됩니다
//! (예: `MGLU3`, `PETR4`, `HGLG11`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 티커 파싱 에러.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickerError {
    #[error("Ticker is empty")]
    Empty,

    #[error("Invalid ticker '{0}': only letters and digits are allowed")]
    InvalidCharacters(String),
}

/// 검증된 종목 코드.
///
/// 입력은 앞뒤 공백을 제거하고 대문자로 정규화됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// 새 티커를 생성합니다.
    pub fn new(code: impl AsRef<str>) -> Result<Self, TickerError> {
        let normalized = code.as_ref().trim().to_uppercase();

        if normalized.is_empty() {
            return Err(TickerError::Empty);
        }
        if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(TickerError::InvalidCharacters(normalized));
        }

        Ok(Self(normalized))
    }

    /// 정규화된 코드 문자열을 반환합니다.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Ticker {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = TickerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
