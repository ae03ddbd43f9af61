use crate::cli::{Cli, Command, GlobalArgs};
use sampledash::config::{self, DashConfig};
use sampledash::logging::{self, LogMode};
use sampledash::sample::{load_samples, SampleRow};

pub mod check;
pub mod filter;
pub mod ui;

pub async fn dispatch(cli: Cli) -> Result<(), String> {
    match cli.command {
        None | Some(Command::Ui) => ui::run(&cli.global).await,
        Some(Command::Check) => check::run(&cli.global).await,
        Some(Command::Filter(args)) => filter::run(&cli.global, args).await,
    }
}

/// 設定を解決してロガーを初期化
fn prepare(global: &GlobalArgs, mode: LogMode) -> Result<DashConfig, String> {
    let config = config::resolve(global.config.as_deref(), &global.overrides())
        .map_err(|e| e.to_string())?;
    logging::init(mode, config.log_file.as_deref()).map_err(|e| e.to_string())?;
    log::debug!("resolved config: {:?}", config);
    Ok(config)
}

/// 設定されたサンプル一覧を読み込み（未設定なら空）
fn samples(config: &DashConfig) -> Result<Vec<SampleRow>, String> {
    match &config.samples {
        Some(path) => load_samples(path).map_err(|e| format!("{}: {}", path.display(), e)),
        None => Ok(Vec::new()),
    }
}
