//! sampledash ui コマンド
//!
//! 端末 UI を起動する。サブコマンド省略時もこれが実行される。

use crate::cli::GlobalArgs;
use sampledash::logging::LogMode;
use sampledash::status::{HttpStatusSource, StatusSource};
use sampledash::tui;
use std::sync::Arc;

pub async fn run(global: &GlobalArgs) -> Result<(), String> {
    let config = super::prepare(global, LogMode::Interactive)?;
    let rows = super::samples(&config)?;

    let http = HttpStatusSource::new(&config.http_config(), config.endpoint.clone());
    log::info!(
        "starting dashboard with {} samples, status endpoint {}",
        rows.len(),
        http.endpoint()
    );
    let source: Arc<dyn StatusSource> = Arc::new(http);
    tui::run(&config, rows, source)
        .await
        .map_err(|e| format!("Terminal error: {e}"))
}
