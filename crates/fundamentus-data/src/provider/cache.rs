//! 파일 기반 HTTP 응답 캐시.
//!
//! 전역 설치 대신 `CachePolicy`를 요청자 생성자에 넘겨 사용합니다.
//! 추출/변환 단계는 캐시 존재를 알지 못합니다.
//!
//! ## 저장 형식
//! - 키: 인코딩된 전체 요청 URL의 SHA-256 hex
//! - 값: `<키>.json` 파일 (상태 코드, URL, 본문, 저장 시각)

use chrono::{DateTime, Utc};
use fundamentus_core::CacheConfig;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CacheError;

/// 기본 캐시 유효 시간 (12시간).
pub const DEFAULT_TTL: Duration = Duration::from_secs(12 * 60 * 60);

const TMP_EXTENSION: &str = "json.tmp";

/// 캐시 정책.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    pub enabled: bool,
    pub ttl: Duration,
    pub directory: PathBuf,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl: DEFAULT_TTL,
            directory: PathBuf::from(".fundamentus-cache"),
        }
    }
}

impl CachePolicy {
    /// 지정한 디렉터리와 유효 시간으로 활성화된 정책.
    pub fn new(directory: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            enabled: true,
            ttl,
            directory: directory.into(),
        }
    }

    /// 캐시를 사용하지 않는 정책.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self {
            enabled: config.enabled,
            ttl: config.ttl(),
            directory: config.directory.clone(),
        }
    }
}

/// 캐시에서 읽은 응답.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResponse {
    pub url: String,
    pub status_code: u16,
    pub body: String,
    pub stored_at: DateTime<Utc>,
}

/// 파일 기반 응답 캐시.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    policy: CachePolicy,
}

impl ResponseCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    pub fn is_enabled(&self) -> bool {
        self.policy.enabled
    }

    /// URL에 대한 캐시 키.
    pub fn cache_key(url: &Url) -> String {
        hex::encode(Sha256::digest(url.as_str().as_bytes()))
    }

    fn entry_path(&self, url: &Url) -> PathBuf {
        self.policy
            .directory
            .join(format!("{}.json", Self::cache_key(url)))
    }

    /// 유효한 캐시 응답을 조회합니다.
    ///
    /// 캐시가 꺼져 있거나, 항목이 없거나, 만료되었으면 `None`입니다.
    pub async fn get(&self, url: &Url) -> Result<Option<CachedResponse>, CacheError> {
        if !self.policy.enabled {
            return Ok(None);
        }

        let path = self.entry_path(url);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry: CachedResponse = serde_json::from_str(&content)?;

        // 키 충돌 방지
        if entry.url != url.as_str() {
            return Ok(None);
        }

        if self.is_expired(&entry, Utc::now()) {
            tracing::debug!(url = %url, stored_at = %entry.stored_at, "캐시 항목 만료");
            return Ok(None);
        }

        Ok(Some(entry))
    }

    /// 응답을 저장합니다. 같은 키의 기존 항목은 교체됩니다.
    pub async fn put(&self, url: &Url, status_code: u16, body: &str) -> Result<(), CacheError> {
        if !self.policy.enabled {
            return Ok(());
        }

        tokio::fs::create_dir_all(&self.policy.directory).await?;

        let entry = CachedResponse {
            url: url.to_string(),
            status_code,
            body: body.to_string(),
            stored_at: Utc::now(),
        };
        let path = self.entry_path(url);
        write_atomic(&path, &serde_json::to_vec(&entry)?).await
    }

    /// 모든 캐시 항목(남은 임시 파일 포함)을 삭제하고 삭제한 개수를 반환합니다.
    pub async fn clear(&self) -> Result<usize, CacheError> {
        let mut entries = match tokio::fs::read_dir(&self.policy.directory).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if is_cache_file(&path) {
                tokio::fs::remove_file(&path).await?;
                removed += 1;
            }
        }

        Ok(removed)
    }

    fn is_expired(&self, entry: &CachedResponse, now: DateTime<Utc>) -> bool {
        // 미래 시각(시계 역행)은 만료로 취급
        match (now - entry.stored_at).to_std() {
            Ok(age) => age > self.policy.ttl,
            Err(_) => true,
        }
    }
}

async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    let tmp = path.with_extension(TMP_EXTENSION);
    let written = match tokio::fs::write(&tmp, bytes).await {
        Ok(()) => tokio::fs::rename(&tmp, path).await,
        Err(e) => Err(e),
    };

    if let Err(e) = written {
        // 실패한 쓰기의 임시 파일 정리
        if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
            if cleanup.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %tmp.display(), error = %cleanup, "임시 캐시 파일 삭제 실패");
            }
        }
        return Err(e.into());
    }
    Ok(())
}

fn is_cache_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|name| name.to_str()).unwrap_or_default();
    name.ends_with(".json") || name.ends_with(&format!(".{TMP_EXTENSION}"))
}
