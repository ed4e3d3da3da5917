//! 설정 관리.
//!
//! 기본값 → 선택적 TOML 파일 → `FUNDAMENTUS__*` 환경 변수 순서로 병합합니다.
//!
//! ```text
//! FUNDAMENTUS__HTTP__TIMEOUT_SECS=20
//! FUNDAMENTUS__CACHE__ENABLED=false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 환경 변수 접두사.
pub const ENV_PREFIX: &str = "FUNDAMENTUS";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

/// HTTP 요청 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 사이트 기준 URL (목록 링크의 절대 경로 변환에도 사용)
    pub base_url: String,
    /// 상세 페이지 경로
    pub detail_path: String,
    /// 레이아웃 선택 파라미터 값 (추출기는 mobile 레이아웃만 지원)
    pub interface: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.fundamentus.com.br/".to_string(),
            detail_path: "detalhes.php".to_string(),
            interface: "mobile".to_string(),
            timeout_secs: 10,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 상세 페이지 전체 URL.
    pub fn detail_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.detail_path.trim_start_matches('/')
        )
    }
}

/// 응답 캐시 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// 캐시 유효 시간 (시간)
    pub ttl_hours: u64,
    pub directory: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_hours: 12,
            directory: PathBuf::from(".fundamentus-cache"),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(60 * 60))
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 주어졌는데 존재하지 않으면 에러입니다.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// 기본 경로(`config/fundamentus.toml`, 없으면 무시)에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        let default_path = Path::new("config/fundamentus.toml");
        if default_path.exists() {
            Self::load(Some(default_path))
        } else {
            Self::load(None)
        }
    }
}
