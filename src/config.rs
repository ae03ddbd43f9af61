//! HTTP設定とダッシュボード設定
//!
//! 設定は「デフォルト < TOML ファイル < 環境変数 < CLI 引数」の順で上書きされる。

use crate::env::EnvVar;
use crate::error::{DashError, Result};
use reqwest::Client;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// デフォルトのステータスエンドポイント
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/check_dependencies";

/// デフォルトのチェックタイムアウト（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP設定
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// タイムアウト
    pub timeout: Option<Duration>,
    /// User-Agent
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            user_agent: "sampledash".to_string(),
        }
    }
}

impl HttpConfig {
    /// reqwest::Client を構築
    pub fn build_client(&self) -> Client {
        let mut builder = Client::builder().user_agent(&self.user_agent);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder.build().unwrap_or_else(|_| Client::new())
    }
}

/// ダッシュボード設定
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// 依存関係ステータスのエンドポイント
    pub endpoint: String,
    /// チェック1回あたりのタイムアウト（秒）
    pub timeout_secs: u64,
    /// サンプル一覧ファイル（JSON / YAML）
    pub samples: Option<PathBuf>,
    /// ログ出力先ファイル
    pub log_file: Option<PathBuf>,
    /// チェックボタンのラベル
    pub check_label: String,
    /// 検索結果が空のときの表示文言
    pub no_results_text: String,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            samples: None,
            log_file: None,
            check_label: "Check Dependencies".to_string(),
            no_results_text: "No samples match your search.".to_string(),
        }
    }
}

/// CLI 引数による上書き
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub samples: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl DashConfig {
    /// TOML 文字列から読み込み（未指定のキーはデフォルト値）
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// TOML ファイルから読み込み
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 環境変数で上書き
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_with(EnvVar::get)
    }

    /// 任意の参照関数で環境変数を上書き
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(EnvVar::ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(raw) = lookup(EnvVar::TIMEOUT) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                DashError::Config(format!("{} must be a number of seconds, got '{}'", EnvVar::TIMEOUT, raw))
            })?;
        }
        if let Some(samples) = lookup(EnvVar::SAMPLES) {
            self.samples = Some(PathBuf::from(samples));
        }
        Ok(self)
    }

    /// CLI 引数で上書き
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(endpoint) = &overrides.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(samples) = &overrides.samples {
            self.samples = Some(samples.clone());
        }
        if let Some(log_file) = &overrides.log_file {
            self.log_file = Some(log_file.clone());
        }
        self
    }

    /// 設定値を検証
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(DashError::Config("endpoint must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(DashError::Config("timeout must be at least 1 second".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// HTTP 設定を導出
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout: Some(self.timeout()),
            ..HttpConfig::default()
        }
    }
}

/// 全レイヤーを合成して設定を解決
pub fn resolve(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<DashConfig> {
    let base = match config_path {
        Some(path) => DashConfig::load(path)?,
        None => DashConfig::default(),
    };
    let config = base.apply_env()?.with_overrides(overrides);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
