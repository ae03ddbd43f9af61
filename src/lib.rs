//! サンプル一覧のフィルタと依存関係チェックを行うダッシュボード
//!
//! - `filter`: 検索欄の内容でサンプル行の表示を切り替える
//! - `checker`: ステータス API を1回呼び、結果をダイアログかメッセージ帯で表示する
//! - `page`: 両コンポーネントが操作するページモデル
//! - `tui`: ページモデルを端末上で動かすホスト

pub mod checker;
pub mod config;
pub mod dialog;
pub mod env;
pub mod error;
pub mod filter;
pub mod logging;
pub mod output;
pub mod page;
pub mod sample;
pub mod status;
pub mod tui;
pub mod wiring;
