//! フィルタロジック
//!
//! サンプル一覧を検索クエリで絞り込む。各行の表示可否はクエリとその行自身のテキストだけで決まる。

use crate::page::Page;
use crate::sample::SampleRow;

/// 1行がクエリに一致するか
///
/// - `query` が空なら常に一致
/// - case-insensitive な部分一致で `name` と `description` を検索
pub fn row_matches(row: &SampleRow, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let query = query.to_lowercase();
    matches_lowered(row, &query)
}

fn matches_lowered(row: &SampleRow, lowered_query: &str) -> bool {
    row.name.to_lowercase().contains(lowered_query)
        || row.description.to_lowercase().contains(lowered_query)
}

/// 表示ベクタを計算（戻り値の長さは常に `rows.len()`）
pub fn filter(query: &str, rows: &[SampleRow]) -> Vec<bool> {
    if query.is_empty() {
        return vec![true; rows.len()];
    }

    let query = query.to_lowercase();
    rows.iter().map(|row| matches_lowered(row, &query)).collect()
}

/// 1回の絞り込み結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    /// 行ごとの表示可否
    pub visibility: Vec<bool>,
    /// 「該当なし」表示を出すべきか
    pub show_no_results: bool,
}

impl FilterOutcome {
    pub fn visible_count(&self) -> usize {
        self.visibility.iter().filter(|v| **v).count()
    }
}

/// 表示ベクタと「該当なし」表示の要否をまとめて計算
///
/// 空クエリでは行が0件でも「該当なし」を出さない。
pub fn evaluate(query: &str, rows: &[SampleRow]) -> FilterOutcome {
    let visibility = filter(query, rows);
    let any_visible = visibility.iter().any(|v| *v);
    FilterOutcome {
        show_no_results: !any_visible && !query.is_empty(),
        visibility,
    }
}

/// 検索欄の現在値でテーブルを絞り込み、結果をページに反映する
///
/// テーブルがなければ何もしない。「該当なし」表示は存在する場合のみ更新する。
pub fn apply(page: &mut Page) -> Option<FilterOutcome> {
    let query = page
        .search_field()
        .map(|f| f.value().to_string())
        .unwrap_or_default();
    let table = page.table_mut()?;

    let outcome = evaluate(&query, table.samples());
    table.set_visibility(&outcome.visibility);

    if let Some(notice) = page.no_results_mut() {
        notice.set_visible(outcome.show_no_results);
    }

    log::debug!(
        "filter pass: query={:?} visible={}/{}",
        query,
        outcome.visible_count(),
        outcome.visibility.len()
    );
    Some(outcome)
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;

#[cfg(test)]
#[path = "filter_proptests.rs"]
mod proptests;
