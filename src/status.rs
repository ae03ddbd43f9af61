//! 依存関係ステータスの取得
//!
//! エンドポイントへの GET 1回で `DependencyStatus` を得る。
//! 非 2xx・本文不正・タイムアウトはすべて失敗として扱う。

use crate::config::HttpConfig;
use crate::error::{DashError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::{de, Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// 依存関係1件の状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub installed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// エンドポイントのレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyStatus {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub dependencies: Vec<Dependency>,
}

/// パース途中の形（`dependencies` の欠落を失敗報告と区別するため）
#[derive(Deserialize)]
struct RawStatus {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    dependencies: Option<Vec<Dependency>>,
}

impl DependencyStatus {
    /// JSON 本文をパース
    ///
    /// - `dependencies` がなく `success: false` + `message` なら `DashError::Backend`
    /// - それ以外の欠落・型違いは `DashError::Malformed`
    pub fn parse(body: &[u8]) -> Result<Self> {
        let raw: RawStatus = serde_json::from_slice(body)?;
        match raw.dependencies {
            Some(dependencies) => Ok(Self {
                success: raw.success,
                message: raw.message,
                dependencies,
            }),
            None => match raw.message.filter(|m| !raw.success && !m.trim().is_empty()) {
                Some(message) => Err(DashError::Backend(message)),
                None => Err(DashError::Malformed(de::Error::missing_field("dependencies"))),
            },
        }
    }

    pub fn missing_count(&self) -> usize {
        self.dependencies.iter().filter(|d| !d.installed).count()
    }
}

/// ステータス取得元 trait
pub trait StatusSource: Send + Sync {
    /// ステータスを1回取得
    fn fetch<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<DependencyStatus>> + Send + 'a>>;
}

/// タイムアウト付きで取得（期限切れは `DashError::Timeout`）
pub async fn fetch_with_timeout(
    source: &dyn StatusSource,
    timeout: Duration,
) -> Result<DependencyStatus> {
    match tokio::time::timeout(timeout, source.fetch()).await {
        Ok(result) => result,
        Err(_) => Err(DashError::Timeout(timeout)),
    }
}

/// HTTP エンドポイントから取得するクライアント
pub struct HttpStatusSource {
    client: Client,
    endpoint: String,
}

impl HttpStatusSource {
    pub fn new(config: &HttpConfig, endpoint: impl Into<String>) -> Self {
        Self {
            client: config.build_client(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_status(&self) -> Result<DependencyStatus> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Accept", "application/json")
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = response.text().await.unwrap_or_default();
            return Err(DashError::Status {
                status: status.as_u16(),
                message: error_message(status, content_type.as_deref(), &body),
            });
        }

        let body = response.bytes().await?;
        DependencyStatus::parse(&body)
    }
}

/// エラー本文から表示する文言の上限（文字数）
const MAX_ERROR_CHARS: usize = 200;

/// 非 2xx レスポンスの表示用メッセージ
///
/// JSON なら `message` / `error`、プレーンテキストなら本文を使う。
/// HTML などそれ以外はステータスの定型文に置き換える。
fn error_message(status: StatusCode, content_type: Option<&str>, body: &str) -> String {
    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|m| m.trim().to_ascii_lowercase());

    let text = match mime.as_deref() {
        Some(m) if m == "application/json" || m.ends_with("+json") => {
            serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|v| {
                    ["message", "error"]
                        .iter()
                        .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(str::to_string))
                })
        }
        Some("text/plain") | None => Some(body.to_string()),
        Some(_) => None,
    };

    match text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()) {
        Some(text) => truncate_chars(&text, MAX_ERROR_CHARS),
        None => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}

impl StatusSource for HttpStatusSource {
    fn fetch<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<DependencyStatus>> + Send + 'a>> {
        Box::pin(self.fetch_status())
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
