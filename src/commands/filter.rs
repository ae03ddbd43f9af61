//! sampledash filter コマンド
//!
//! 検索語に一致するサンプルを表で表示する。

use crate::cli::GlobalArgs;
use clap::Parser;
use sampledash::logging::LogMode;
use sampledash::output::sample_table;
use sampledash::page::Page;
use sampledash::wiring::{Dashboard, UiEvent};

#[derive(Debug, Parser)]
pub struct Args {
    /// Case-insensitive text matched against sample names and descriptions
    pub query: String,
}

pub async fn run(global: &GlobalArgs, args: Args) -> Result<(), String> {
    let config = super::prepare(global, LogMode::Cli)?;
    let rows = super::samples(&config)?;

    let mut page = Page::builder()
        .search_field()
        .sample_table(rows)
        .no_results_notice(config.no_results_text.clone())
        .build();
    let mut dashboard = Dashboard::install(&mut page, config.timeout());

    if let Some(field) = page.search_field_mut() {
        field.set_value(args.query);
    }
    dashboard.handle(&mut page, UiEvent::SearchChanged);

    match page.no_results().filter(|n| n.is_visible()) {
        Some(notice) => println!("{}", notice.text()),
        None => {
            if let Some(table) = page.table() {
                println!("{}", sample_table(table.visible_rows()));
            }
        }
    }

    dashboard.teardown(&mut page);
    Ok(())
}
