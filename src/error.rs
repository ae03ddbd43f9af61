use std::time::Duration;
use thiserror::Error;

/// sampledash 統一エラー型
#[derive(Debug, Error)]
pub enum DashError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Status endpoint error: {message} (status: {status})")]
    Status { status: u16, message: String },

    /// エンドポイント自身が返した失敗報告（`success: false` + `message` のみの本文）
    #[error("{0}")]
    Backend(String),

    #[error("Malformed status response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, DashError>;

impl DashError {
    /// レスポンス本文が壊れていたかどうか
    ///
    /// ユーザー向け表示は通信エラーと同じだが、ログでは区別する。
    pub fn is_malformed(&self) -> bool {
        matches!(self, DashError::Malformed(_))
    }

    /// 通信レベルの失敗かどうか（HTTP ステータス・タイムアウトを含む）
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DashError::Network(_)
                | DashError::Status { .. }
                | DashError::Timeout(_)
        )
    }
}
