//! ログ初期化
//!
//! `RUST_LOG` でフィルタを指定できる。端末 UI は画面を占有するため、
//! ログファイルが指定されていなければロガーを登録しない。

use crate::error::Result;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;

/// ログの出力先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// 非対話コマンド（ファイル指定がなければ stderr へ）
    Cli,
    /// 端末 UI（ファイル指定がなければ出力しない）
    Interactive,
}

/// ロガーを初期化（2回目以降の呼び出しは無視される）
pub fn init(mode: LogMode, log_file: Option<&Path>) -> Result<()> {
    let target = match (log_file, mode) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Target::Pipe(Box::new(file))
        }
        (None, LogMode::Interactive) => return Ok(()),
        (None, LogMode::Cli) => Target::Stderr,
    };

    let mut builder = Builder::new();
    builder
        .filter_level(default_level(log_file))
        .target(target)
        .parse_env(Env::default());

    // テストなどで既に初期化済みなら何もしない
    let _ = builder.try_init();
    Ok(())
}

/// ファイル出力時は info まで残す
fn default_level(log_file: Option<&Path>) -> LevelFilter {
    if log_file.is_some() {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    }
}
