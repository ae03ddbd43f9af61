//! 初期化と配線
//!
//! ページ上に存在する要素だけを購読し、イベントを絞り込み／チェッカーへ振り分ける。
//! 2つのコンポーネントは互いに依存せず、同じページのライフサイクルを共有するだけ。

use crate::checker::{CheckOutcome, CheckRejected, DependencyChecker};
use crate::error::Result;
use crate::filter;
use crate::page::{Activation, BannerId, Change, DialogId, ElementId, Page, Subscription};
use crate::status::{fetch_with_timeout, DependencyStatus, StatusSource};
use std::time::Duration;

/// ホストから届くイベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// 検索欄の値が変わった
    SearchChanged,
    /// チェックボタンが押された
    CheckActivated,
    /// ダイアログが閉じられた
    DialogDismissed(DialogId),
    /// メッセージ帯が閉じられた
    BannerClosed(BannerId),
}

/// イベント処理後にホストが行うべきこと
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// ステータス取得を開始し、結果を `Dashboard::complete_check` に渡す
    StartCheck,
}

/// ページに配線されたコンポーネント群
#[derive(Debug)]
pub struct Dashboard {
    filter: Option<Subscription<Change>>,
    check: Option<Subscription<Activation>>,
    checker: DependencyChecker,
}

impl Dashboard {
    /// 存在する要素に対してのみ購読を登録する
    pub fn install(page: &mut Page, timeout: Duration) -> Self {
        let filter = page.subscribe_change();
        let check = page.subscribe_activation();

        log::debug!(
            "dashboard installed: filter={} checker={}",
            filter.is_some(),
            check.is_some()
        );

        Self {
            filter,
            check,
            checker: DependencyChecker::new(timeout),
        }
    }

    pub fn filter_installed(&self) -> bool {
        self.filter.is_some()
    }

    pub fn checker_installed(&self) -> bool {
        self.check.is_some()
    }

    pub fn checker(&self) -> &DependencyChecker {
        &self.checker
    }

    /// イベントを処理
    pub fn handle(&mut self, page: &mut Page, event: UiEvent) -> Effect {
        match event {
            UiEvent::SearchChanged => {
                if self.filter.as_ref().is_some_and(|s| page.is_subscribed(s)) {
                    filter::apply(page);
                }
                Effect::None
            }
            UiEvent::CheckActivated => {
                if !self.check.as_ref().is_some_and(|s| page.is_subscribed(s)) {
                    return Effect::None;
                }
                match self.checker.begin(page) {
                    Ok(()) => Effect::StartCheck,
                    Err(reason) => {
                        log::debug!("check trigger rejected: {reason}");
                        Effect::None
                    }
                }
            }
            UiEvent::DialogDismissed(id) => {
                page.detach_dialog(id);
                Effect::None
            }
            UiEvent::BannerClosed(id) => {
                page.close_banner(id);
                Effect::None
            }
        }
    }

    /// `Effect::StartCheck` で始めた取得の結果を反映
    pub fn complete_check(
        &mut self,
        page: &mut Page,
        result: Result<DependencyStatus>,
    ) -> std::result::Result<CheckOutcome, CheckRejected> {
        self.checker.finish(page, result)
    }

    /// 押下からの一連の流れをその場で実行（非対話コマンド用）
    pub async fn activate_and_wait(
        &mut self,
        page: &mut Page,
        source: &dyn StatusSource,
    ) -> std::result::Result<CheckOutcome, CheckRejected> {
        match self.handle(page, UiEvent::CheckActivated) {
            Effect::StartCheck => {
                let result = fetch_with_timeout(source, self.checker.timeout()).await;
                self.complete_check(page, result)
            }
            Effect::None if self.checker.is_busy() => Err(CheckRejected::Busy),
            Effect::None => Err(CheckRejected::NoControl),
        }
    }

    /// 全購読を解除
    pub fn teardown(self, page: &mut Page) {
        if let Some(sub) = self.filter {
            page.unsubscribe(sub);
        }
        if let Some(sub) = self.check {
            page.unsubscribe(sub);
        }
        log::debug!(
            "dashboard torn down: search_listener={} check_listener={}",
            page.has_listener(ElementId::SearchField),
            page.has_listener(ElementId::CheckControl)
        );
    }
}

#[cfg(test)]
#[path = "wiring_test.rs"]
mod tests;
