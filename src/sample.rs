//! サンプル行とサンプル一覧の読み込み
//!
//! 行データはページテンプレート側が用意する。ここでは JSON / YAML の一覧ファイルから読み込む。

use crate::error::{DashError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// テーブルの1行（識別子はテーブル上の位置のみ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRow {
    pub name: String,
    pub description: String,
    /// サンプルファイルのパス（表示のみ、絞り込みには使わない）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl SampleRow {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            path: None,
        }
    }

    /// パスを設定
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// 一覧ファイルの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(CatalogFormat::Json),
            Some("yaml") | Some("yml") => Ok(CatalogFormat::Yaml),
            _ => Err(DashError::Config(format!(
                "unsupported samples file '{}': expected .json, .yaml or .yml",
                path.display()
            ))),
        }
    }
}

/// サンプル一覧ファイルを読み込む
///
/// - ファイルが存在しなければ空の一覧
/// - 拡張子で JSON / YAML を判別
pub fn load_samples(path: &Path) -> Result<Vec<SampleRow>> {
    let format = CatalogFormat::from_path(path)?;

    if !path.exists() {
        log::info!("samples file {} not found, starting with an empty table", path.display());
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    let rows = match format {
        CatalogFormat::Json => serde_json::from_str(&content)
            .map_err(|e| DashError::Config(format!("invalid samples JSON: {e}")))?,
        CatalogFormat::Yaml => serde_yaml::from_str(&content)?,
    };
    Ok(rows)
}

#[cfg(test)]
#[path = "sample_test.rs"]
mod tests;
