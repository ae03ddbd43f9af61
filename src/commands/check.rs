//! sampledash check コマンド
//!
//! 依存関係を1回チェックして結果を表示する。失敗時は終了コード 1。

use crate::cli::GlobalArgs;
use sampledash::checker::CheckOutcome;
use sampledash::logging::LogMode;
use sampledash::output::{render_descriptor, ToneLine};
use sampledash::page::Page;
use sampledash::status::HttpStatusSource;
use sampledash::wiring::Dashboard;

pub async fn run(global: &GlobalArgs) -> Result<(), String> {
    let config = super::prepare(global, LogMode::Cli)?;
    let source = HttpStatusSource::new(&config.http_config(), config.endpoint.clone());
    log::info!("checking dependencies at {}", source.endpoint());

    let mut page = Page::builder()
        .check_control(config.check_label.clone())
        .content_container()
        .build();
    let mut dashboard = Dashboard::install(&mut page, config.timeout());

    let outcome = dashboard
        .activate_and_wait(&mut page, &source)
        .await
        .map_err(|e| e.to_string());
    let result = match outcome {
        Ok(CheckOutcome::Dialog { .. }) => match page.body().top_dialog() {
            Some(node) => {
                print!("{}", render_descriptor(&node.descriptor));
                if node.descriptor.is_success() {
                    Ok(())
                } else {
                    Err("Some dependencies are missing.".to_string())
                }
            }
            None => Err("No result was rendered.".to_string()),
        },
        Ok(CheckOutcome::Banner(_)) => match page.container().and_then(|c| c.banners().first()) {
            Some(banner) => Err(ToneLine::format(banner.tone, banner.icon.glyph(), &banner.text).to_string()),
            None => Err("Dependency check failed.".to_string()),
        },
        Err(e) => Err(e),
    };

    dashboard.teardown(&mut page);
    result
}
