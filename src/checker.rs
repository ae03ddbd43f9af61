//! 依存関係チェッカー
//!
//! ボタン押下1回につき1回だけステータスを取得し、結果をダイアログ
//! （失敗時はメッセージ帯）としてページに反映する状態機械。
//!
//! - `Idle → Checking`: ボタンを無効化し、ラベルをローディング表示に置き換える
//! - `Checking → Idle`: 必ずボタンを先に復元してから、ダイアログ／メッセージ帯を挿入する
//!
//! 実行中の再トリガーは状態フラグで拒否する（ボタンの無効化には依存しない）。

use crate::dialog::{describe, sanitize_text, Icon, Tone};
use crate::error::{DashError, Result};
use crate::page::{BannerId, DialogId, Page};
use crate::status::{fetch_with_timeout, DependencyStatus, StatusSource};
use std::time::Duration;
use thiserror::Error;

/// チェック中のボタンラベル
pub const LOADING_LABEL: &str = "Checking...";

/// 失敗時のメッセージ帯の接頭辞
pub const ERROR_PREFIX: &str = "Error checking dependencies: ";

/// チェッカーの状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckState {
    #[default]
    Idle,
    Checking {
        /// 復元用の元ラベル
        original_label: String,
    },
}

/// トリガーを受け付けなかった理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckRejected {
    #[error("a dependency check is already running")]
    Busy,

    #[error("this page has no check control")]
    NoControl,

    #[error("no dependency check is running")]
    NotRunning,
}

/// 1回のチェックの結果としてページに起きたこと
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// ダイアログを取り付けた（`replaced` は置き換えた既存ダイアログの数）
    Dialog { id: DialogId, replaced: usize },
    /// メッセージ帯を挿入した（コンテンツ領域がなければ None）
    Banner(Option<BannerId>),
}

/// 依存関係チェッカー
#[derive(Debug)]
pub struct DependencyChecker {
    state: CheckState,
    timeout: Duration,
}

impl DependencyChecker {
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: CheckState::Idle,
            timeout,
        }
    }

    pub fn state(&self) -> &CheckState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, CheckState::Checking { .. })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Idle → Checking
    pub fn begin(&mut self, page: &mut Page) -> std::result::Result<(), CheckRejected> {
        if self.is_busy() {
            log::debug!("dependency check trigger ignored: already running");
            return Err(CheckRejected::Busy);
        }

        let control = page.check_control_mut().ok_or(CheckRejected::NoControl)?;
        let original_label = control.label().to_string();
        control.set_label(LOADING_LABEL);
        control.set_disabled(true);

        log::info!("dependency check started");
        self.state = CheckState::Checking { original_label };
        Ok(())
    }

    /// Checking → Idle
    ///
    /// ボタンを復元してから結果を描画する。
    pub fn finish(
        &mut self,
        page: &mut Page,
        result: Result<DependencyStatus>,
    ) -> std::result::Result<CheckOutcome, CheckRejected> {
        let CheckState::Checking { original_label } = std::mem::take(&mut self.state) else {
            return Err(CheckRejected::NotRunning);
        };

        if let Some(control) = page.check_control_mut() {
            control.set_label(original_label);
            control.set_disabled(false);
        }

        Ok(match result {
            Ok(status) => render_dialog(page, &status),
            Err(err) => render_failure(page, &err),
        })
    }

    /// begin → 取得（タイムアウト付き）→ finish をまとめて実行
    pub async fn run(
        &mut self,
        page: &mut Page,
        source: &dyn StatusSource,
    ) -> std::result::Result<CheckOutcome, CheckRejected> {
        self.begin(page)?;
        let result = fetch_with_timeout(source, self.timeout).await;
        self.finish(page, result)
    }
}

/// 成功時: 記述子を組み立て終えてから、既存ダイアログを置き換えて取り付ける
fn render_dialog(page: &mut Page, status: &DependencyStatus) -> CheckOutcome {
    let descriptor = describe(status);
    let replaced = page.detach_all_dialogs();
    let id = page.attach_dialog(descriptor);

    log::info!(
        "dependency check finished: success={} dependencies={} missing={}",
        status.success,
        status.dependencies.len(),
        status.missing_count()
    );
    CheckOutcome::Dialog { id, replaced }
}

/// 失敗時: ダイアログは作らず、コンテンツ領域の先頭にメッセージ帯を挿入する
fn render_failure(page: &mut Page, err: &DashError) -> CheckOutcome {
    if err.is_malformed() {
        log::warn!("dependency check returned a malformed payload: {err}");
    } else if err.is_transport() {
        log::error!("dependency check failed: {err}");
    } else {
        log::error!("status endpoint reported a failure: {err}");
    }

    let text = sanitize_text(&format!("{ERROR_PREFIX}{err}"));
    let banner = page.prepend_banner(Tone::Danger, Icon::ExclamationCircle, text);
    if banner.is_none() {
        log::warn!("no content container on the page, error banner skipped");
    }
    CheckOutcome::Banner(banner)
}

#[cfg(test)]
#[path = "checker_test.rs"]
mod tests;
