//! 端末ホストの Model/Msg/update
//!
//! - `Model`: ページモデル + 配線 + フォーカス等の端末固有の状態
//! - `Msg`: キー入力から変換されたメッセージ
//! - `update`: メッセージをページイベントに変換して配線へ渡す

use crate::config::DashConfig;
use crate::error::Result;
use crate::page::Page;
use crate::sample::SampleRow;
use crate::status::DependencyStatus;
use crate::wiring::{Dashboard, Effect, UiEvent};
use crossterm::event::KeyCode;

// ============================================================================
// Focus
// ============================================================================

/// フォーカス中の要素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Table,
    Button,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::Search => Focus::Table,
            Focus::Table => Focus::Button,
            Focus::Button => Focus::Search,
        }
    }
}

// ============================================================================
// Msg
// ============================================================================

/// アプリケーションへのメッセージ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Msg {
    Quit,
    FocusNext,
    SearchInput(char),
    SearchBackspace,
    SearchClear,
    ScrollUp,
    ScrollDown,
    /// チェックボタン押下
    Activate,
    /// 最前面のダイアログを閉じる
    DismissDialog,
    /// 先頭のメッセージ帯を閉じる
    CloseBanner,
}

// ============================================================================
// Model
// ============================================================================

/// 端末ホスト全体の状態
pub struct Model {
    pub page: Page,
    pub dashboard: Dashboard,
    pub focus: Focus,
    /// 表示中の行のスクロール位置
    pub table_offset: usize,
    /// スピナー用のカウンタ
    pub tick: usize,
    pub should_quit: bool,
}

impl Model {
    /// 設定とサンプル行からページを組み立てて配線する
    pub fn new(config: &DashConfig, rows: Vec<SampleRow>) -> Self {
        let mut page = Page::builder()
            .search_field()
            .sample_table(rows)
            .no_results_notice(config.no_results_text.clone())
            .check_control(config.check_label.clone())
            .content_container()
            .build();
        let dashboard = Dashboard::install(&mut page, config.timeout());

        Self {
            page,
            dashboard,
            focus: Focus::default(),
            table_offset: 0,
            tick: 0,
            should_quit: false,
        }
    }

    pub fn dialog_open(&self) -> bool {
        self.page.body().top_dialog().is_some()
    }

    fn control_enabled(&self) -> bool {
        self.page.check_control().is_some_and(|c| !c.is_disabled())
    }

    /// キー入力をメッセージに変換
    pub fn key_to_msg(&self, key: KeyCode) -> Option<Msg> {
        if self.dialog_open() {
            // モーダル表示中は閉じる操作のみ
            return match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Msg::DismissDialog),
                _ => None,
            };
        }

        match self.focus {
            Focus::Search => match key {
                KeyCode::Tab | KeyCode::Down => Some(Msg::FocusNext),
                KeyCode::Esc => Some(Msg::SearchClear),
                KeyCode::Backspace => Some(Msg::SearchBackspace),
                KeyCode::Char(c) => Some(Msg::SearchInput(c)),
                _ => None,
            },
            Focus::Table => match key {
                KeyCode::Tab => Some(Msg::FocusNext),
                KeyCode::Up | KeyCode::Char('k') => Some(Msg::ScrollUp),
                KeyCode::Down | KeyCode::Char('j') => Some(Msg::ScrollDown),
                KeyCode::Char('x') => Some(Msg::CloseBanner),
                KeyCode::Char('q') | KeyCode::Esc => Some(Msg::Quit),
                _ => None,
            },
            Focus::Button => match key {
                KeyCode::Tab => Some(Msg::FocusNext),
                // 無効化中のボタンはイベントを発行しない
                KeyCode::Enter | KeyCode::Char(' ') if self.control_enabled() => {
                    Some(Msg::Activate)
                }
                KeyCode::Char('x') => Some(Msg::CloseBanner),
                KeyCode::Char('q') | KeyCode::Esc => Some(Msg::Quit),
                _ => None,
            },
        }
    }

    /// ページ側の後始末
    pub fn teardown(self) -> Page {
        let Model {
            mut page,
            dashboard,
            ..
        } = self;
        dashboard.teardown(&mut page);
        page
    }
}

// ============================================================================
// update
// ============================================================================

/// メッセージに応じて状態を更新
pub fn update(model: &mut Model, msg: Msg) -> Effect {
    match msg {
        Msg::Quit => {
            model.should_quit = true;
            Effect::None
        }
        Msg::FocusNext => {
            model.focus = model.focus.next();
            Effect::None
        }
        Msg::SearchInput(c) => edit_search(model, |field| field.push(c)),
        Msg::SearchBackspace => edit_search(model, |field| field.pop()),
        Msg::SearchClear => edit_search(model, |field| field.clear()),
        Msg::ScrollUp => {
            model.table_offset = model.table_offset.saturating_sub(1);
            Effect::None
        }
        Msg::ScrollDown => {
            let visible = model.page.table().map_or(0, |t| t.visible_count());
            model.table_offset = (model.table_offset + 1).min(visible.saturating_sub(1));
            Effect::None
        }
        Msg::Activate => model.dashboard.handle(&mut model.page, UiEvent::CheckActivated),
        Msg::DismissDialog => {
            if let Some(id) = model.page.body().top_dialog().map(|d| d.id) {
                model.dashboard.handle(&mut model.page, UiEvent::DialogDismissed(id));
            }
            Effect::None
        }
        Msg::CloseBanner => {
            let first = model
                .page
                .container()
                .and_then(|c| c.banners().first())
                .map(|b| b.id);
            if let Some(id) = first {
                model.dashboard.handle(&mut model.page, UiEvent::BannerClosed(id));
            }
            Effect::None
        }
    }
}

/// 検索欄を編集し、変更イベントを発行する
fn edit_search(model: &mut Model, edit: impl FnOnce(&mut crate::page::SearchField)) -> Effect {
    let Some(field) = model.page.search_field_mut() else {
        return Effect::None;
    };
    edit(field);
    model.table_offset = 0;
    model.dashboard.handle(&mut model.page, UiEvent::SearchChanged)
}

/// 取得結果を反映
pub fn complete_check(model: &mut Model, result: Result<DependencyStatus>) {
    if let Err(reason) = model.dashboard.complete_check(&mut model.page, result) {
        log::debug!("check result dropped: {reason}");
    }
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
