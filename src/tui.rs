//! TUI (Terminal User Interface) ホスト
//!
//! ratatui/crossterm でページモデルを描画し、キー入力をページイベントとして配線へ渡す。
//! 依存関係の取得は別タスクで実行し、結果はチャネル経由でループに戻す。

mod app;
mod common;
mod terminal;
mod view;

use crate::config::DashConfig;
use crate::sample::SampleRow;
use crate::status::{fetch_with_timeout, StatusSource};
use crate::wiring::Effect;
use app::{complete_check, update, Model};
use crossterm::event::Event;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use terminal::Tui;
use tokio::sync::mpsc;

/// 描画とスピナー更新の間隔
const TICK_RATE: Duration = Duration::from_millis(120);

/// 端末 UI を起動し、終了するまでイベントループを回す
pub async fn run(
    config: &DashConfig,
    rows: Vec<SampleRow>,
    source: Arc<dyn StatusSource>,
) -> io::Result<()> {
    let mut model = Model::new(config, rows);
    let timeout = model.dashboard.checker().timeout();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut tui = Tui::new()?.with_tick_rate(TICK_RATE);
    tui.enter()?;

    let result = loop {
        if let Err(e) = tui.draw(|f| view::view(f, &model)) {
            break Err(e);
        }

        let event = match tokio::task::block_in_place(|| tui.next_event()) {
            Ok(event) => event,
            Err(e) => break Err(e),
        };

        if let Some(Event::Key(key)) = event {
            if let Some(msg) = model.key_to_msg(key.code) {
                if update(&mut model, msg) == Effect::StartCheck {
                    let source = Arc::clone(&source);
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let result = fetch_with_timeout(source.as_ref(), timeout).await;
                        // ループ終了後の送信失敗は無視
                        let _ = tx.send(result);
                    });
                }
            }
        }

        while let Ok(result) = rx.try_recv() {
            complete_check(&mut model, result);
        }

        if model.should_quit {
            break Ok(());
        }
        model.tick = model.tick.wrapping_add(1);
    };

    tui.exit()?;
    model.teardown();
    result
}
