use clap::{Args as ClapArgs, Parser, Subcommand};
use sampledash::config::ConfigOverrides;
use std::path::PathBuf;

use crate::commands::filter;

#[derive(Debug, Parser)]
#[command(name = "sampledash")]
#[command(about = "Sample browser and dependency checker", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// 省略時は端末 UI を起動
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive dashboard (default)
    Ui,

    /// Check dependencies once and print the result
    Check,

    /// Print the samples matching a query
    Filter(filter::Args),
}

/// 全サブコマンド共通のオプション
#[derive(Debug, Clone, Default, ClapArgs)]
pub struct GlobalArgs {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dependency status endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Path to the sample catalog (JSON or YAML)
    #[arg(long, global = true)]
    pub samples: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            timeout_secs: self.timeout,
            samples: self.samples.clone(),
            log_file: self.log_file.clone(),
        }
    }
}
