//! ホストページのモデル
//!
//! 検索欄・サンプルテーブル・「該当なし」表示・チェックボタン・コンテンツ領域・
//! ドキュメント本体（ダイアログの取り付け先）を保持する。
//! 各要素は任意で、存在しない要素に依存する機能は配線されない。

use crate::dialog::{DialogDescriptor, Icon, Tone};
use crate::sample::SampleRow;
use std::collections::HashMap;
use std::marker::PhantomData;

/// 要素の固定識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    SearchField,
    SampleTable,
    NoResultsNotice,
    CheckControl,
    ContentContainer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BannerId(u64);

// ============================================================================
// 要素
// ============================================================================

/// 検索入力欄
#[derive(Debug, Default)]
pub struct SearchField {
    value: String,
}

impl SearchField {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn pop(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// サンプルテーブル（行の生成・削除は行わず、表示状態のみ変更する）
#[derive(Debug, Default)]
pub struct SampleTable {
    samples: Vec<SampleRow>,
    visible: Vec<bool>,
}

impl SampleTable {
    pub fn new(samples: Vec<SampleRow>) -> Self {
        let visible = vec![true; samples.len()];
        Self { samples, visible }
    }

    pub fn samples(&self) -> &[SampleRow] {
        &self.samples
    }

    /// 行と表示状態の組
    pub fn rows(&self) -> impl Iterator<Item = (&SampleRow, bool)> {
        self.samples.iter().zip(self.visible.iter().copied())
    }

    pub fn visible_rows(&self) -> impl Iterator<Item = &SampleRow> {
        self.rows().filter(|(_, v)| *v).map(|(row, _)| row)
    }

    pub fn visibility(&self) -> &[bool] {
        &self.visible
    }

    /// 表示状態を適用（長さが合わない場合は何もしない）
    pub fn set_visibility(&mut self, visibility: &[bool]) {
        if visibility.len() == self.samples.len() {
            self.visible.copy_from_slice(visibility);
        }
    }

    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// 「該当なし」表示
#[derive(Debug)]
pub struct Notice {
    text: String,
    visible: bool,
}

impl Notice {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// 押下可能なボタン
#[derive(Debug)]
pub struct ActionControl {
    label: String,
    disabled: bool,
}

impl ActionControl {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

/// インラインのメッセージ帯（ユーザーが閉じられる）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: BannerId,
    pub tone: Tone,
    pub icon: Icon,
    pub text: String,
}

/// メッセージ帯の挿入先
#[derive(Debug, Default)]
pub struct ContentContainer {
    banners: Vec<Banner>,
}

impl ContentContainer {
    /// 先頭から順に並んだメッセージ帯
    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    fn prepend(&mut self, banner: Banner) {
        self.banners.insert(0, banner);
    }

    fn remove(&mut self, id: BannerId) -> bool {
        let before = self.banners.len();
        self.banners.retain(|b| b.id != id);
        before != self.banners.len()
    }
}

/// 取り付け済みダイアログ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogNode {
    pub id: DialogId,
    pub descriptor: DialogDescriptor,
}

/// ドキュメント本体
#[derive(Debug, Default)]
pub struct Body {
    dialogs: Vec<DialogNode>,
}

impl Body {
    pub fn dialogs(&self) -> &[DialogNode] {
        &self.dialogs
    }

    /// 最前面のダイアログ
    pub fn top_dialog(&self) -> Option<&DialogNode> {
        self.dialogs.last()
    }
}

// ============================================================================
// 購読
// ============================================================================

/// 「変更イベントを発行する」能力
#[derive(Debug)]
pub struct Change;

/// 「押下イベントを発行する」能力
#[derive(Debug)]
pub struct Activation;

/// 要素への購読ハンドル
///
/// `Page::unsubscribe` に渡すと解除される。
#[derive(Debug)]
pub struct Subscription<C> {
    element: ElementId,
    token: u64,
    _capability: PhantomData<C>,
}

impl<C> Subscription<C> {
    pub fn element(&self) -> ElementId {
        self.element
    }
}

// ============================================================================
// Page
// ============================================================================

/// ホストページ
#[derive(Debug, Default)]
pub struct Page {
    search: Option<SearchField>,
    table: Option<SampleTable>,
    no_results: Option<Notice>,
    check_control: Option<ActionControl>,
    container: Option<ContentContainer>,
    body: Body,
    listeners: HashMap<ElementId, u64>,
    next_id: u64,
}

impl Page {
    pub fn builder() -> PageBuilder {
        PageBuilder::default()
    }

    /// 要素が存在するか
    pub fn has_element(&self, id: ElementId) -> bool {
        match id {
            ElementId::SearchField => self.search.is_some(),
            ElementId::SampleTable => self.table.is_some(),
            ElementId::NoResultsNotice => self.no_results.is_some(),
            ElementId::CheckControl => self.check_control.is_some(),
            ElementId::ContentContainer => self.container.is_some(),
        }
    }

    pub fn search_field(&self) -> Option<&SearchField> {
        self.search.as_ref()
    }

    pub fn search_field_mut(&mut self) -> Option<&mut SearchField> {
        self.search.as_mut()
    }

    pub fn table(&self) -> Option<&SampleTable> {
        self.table.as_ref()
    }

    pub fn table_mut(&mut self) -> Option<&mut SampleTable> {
        self.table.as_mut()
    }

    pub fn no_results(&self) -> Option<&Notice> {
        self.no_results.as_ref()
    }

    pub fn no_results_mut(&mut self) -> Option<&mut Notice> {
        self.no_results.as_mut()
    }

    pub fn check_control(&self) -> Option<&ActionControl> {
        self.check_control.as_ref()
    }

    pub fn check_control_mut(&mut self) -> Option<&mut ActionControl> {
        self.check_control.as_mut()
    }

    pub fn container(&self) -> Option<&ContentContainer> {
        self.container.as_ref()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    // ------------------------------------------------------------------
    // 購読
    // ------------------------------------------------------------------

    /// 検索欄の変更イベントを購読（検索欄がなければ None）
    pub fn subscribe_change(&mut self) -> Option<Subscription<Change>> {
        self.subscribe(ElementId::SearchField)
    }

    /// チェックボタンの押下イベントを購読（ボタンがなければ None）
    pub fn subscribe_activation(&mut self) -> Option<Subscription<Activation>> {
        self.subscribe(ElementId::CheckControl)
    }

    fn subscribe<C>(&mut self, element: ElementId) -> Option<Subscription<C>> {
        if !self.has_element(element) {
            return None;
        }
        let token = self.next_id();
        self.listeners.insert(element, token);
        Some(Subscription {
            element,
            token,
            _capability: PhantomData,
        })
    }

    /// 購読を解除（既に別の購読に置き換わっていれば何もしない）
    pub fn unsubscribe<C>(&mut self, subscription: Subscription<C>) {
        if self.listeners.get(&subscription.element) == Some(&subscription.token) {
            self.listeners.remove(&subscription.element);
        }
    }

    /// 購読がまだ有効か
    pub fn is_subscribed<C>(&self, subscription: &Subscription<C>) -> bool {
        self.listeners.get(&subscription.element) == Some(&subscription.token)
    }

    pub fn has_listener(&self, element: ElementId) -> bool {
        self.listeners.contains_key(&element)
    }

    // ------------------------------------------------------------------
    // メッセージ帯・ダイアログ
    // ------------------------------------------------------------------

    /// コンテンツ領域の先頭にメッセージ帯を挿入（領域がなければ None）
    pub fn prepend_banner(&mut self, tone: Tone, icon: Icon, text: impl Into<String>) -> Option<BannerId> {
        if self.container.is_none() {
            return None;
        }
        let id = BannerId(self.next_id());
        let banner = Banner {
            id,
            tone,
            icon,
            text: text.into(),
        };
        self.container.as_mut()?.prepend(banner);
        Some(id)
    }

    /// メッセージ帯を閉じる
    pub fn close_banner(&mut self, id: BannerId) -> bool {
        self.container.as_mut().is_some_and(|c| c.remove(id))
    }

    /// 組み立て済みの記述子をダイアログとして取り付ける
    pub fn attach_dialog(&mut self, descriptor: DialogDescriptor) -> DialogId {
        let id = DialogId(self.next_id());
        self.body.dialogs.push(DialogNode { id, descriptor });
        id
    }

    /// ダイアログを丸ごと取り外す
    pub fn detach_dialog(&mut self, id: DialogId) -> bool {
        let before = self.body.dialogs.len();
        self.body.dialogs.retain(|d| d.id != id);
        before != self.body.dialogs.len()
    }

    /// 全ダイアログを取り外し、取り外した数を返す
    pub fn detach_all_dialogs(&mut self) -> usize {
        let count = self.body.dialogs.len();
        self.body.dialogs.clear();
        count
    }
}

// ============================================================================
// PageBuilder
// ============================================================================

/// ページテンプレートに相当するビルダー
#[derive(Debug, Default)]
pub struct PageBuilder {
    search: Option<SearchField>,
    table: Option<SampleTable>,
    no_results: Option<Notice>,
    check_control: Option<ActionControl>,
    container: Option<ContentContainer>,
}

impl PageBuilder {
    pub fn search_field(mut self) -> Self {
        self.search = Some(SearchField::default());
        self
    }

    pub fn sample_table(mut self, rows: Vec<SampleRow>) -> Self {
        self.table = Some(SampleTable::new(rows));
        self
    }

    /// 「該当なし」表示（初期状態は非表示）
    pub fn no_results_notice(mut self, text: impl Into<String>) -> Self {
        self.no_results = Some(Notice {
            text: text.into(),
            visible: false,
        });
        self
    }

    pub fn check_control(mut self, label: impl Into<String>) -> Self {
        self.check_control = Some(ActionControl {
            label: label.into(),
            disabled: false,
        });
        self
    }

    pub fn content_container(mut self) -> Self {
        self.container = Some(ContentContainer::default());
        self
    }

    pub fn build(self) -> Page {
        Page {
            search: self.search,
            table: self.table,
            no_results: self.no_results,
            check_control: self.check_control,
            container: self.container,
            ..Page::default()
        }
    }
}

#[cfg(test)]
#[path = "page_test.rs"]
mod tests;
