//! ステータスダイアログの記述子
//!
//! `DependencyStatus` から描画前の構造化データ（`DialogDescriptor`）を組み立てる。
//! 文字列連結でマークアップを作らず、ペイロード由来のテキストは必ず `sanitize_text` を通す。

use crate::status::DependencyStatus;

/// ダイアログのタイトル
pub const DIALOG_TITLE: &str = "Dependency Check Results";

/// 表示トーン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Danger,
    Secondary,
}

/// アイコン種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    CheckCircle,
    ExclamationTriangle,
    ExclamationCircle,
}

impl Icon {
    /// 端末表示用の記号
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::CheckCircle => "✓",
            Icon::ExclamationTriangle => "⚠",
            Icon::ExclamationCircle => "!",
        }
    }
}

/// 依存関係ごとのバッジ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Installed,
    Missing,
}

impl Badge {
    pub fn from_installed(installed: bool) -> Self {
        if installed {
            Badge::Installed
        } else {
            Badge::Missing
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Badge::Installed => "Installed",
            Badge::Missing => "Missing",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Badge::Installed => Tone::Success,
            Badge::Missing => Tone::Danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogHeader {
    pub icon: Icon,
    pub title: String,
    /// 閉じるボタンを持つか
    pub closable: bool,
}

/// 全体ステータスの帯
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub tone: Tone,
    pub icon: Icon,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogItem {
    pub name: String,
    pub version: Option<String>,
    pub badge: Badge,
}

/// ダイアログ記述子（純粋データ）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogDescriptor {
    pub header: DialogHeader,
    pub banner: StatusBanner,
    pub items: Vec<DialogItem>,
    /// 任意のメッセージ行（空文字列は表示しない）
    pub message: Option<String>,
    /// フッターの閉じるボタンのラベル
    pub footer_action: String,
}

impl DialogDescriptor {
    pub fn is_success(&self) -> bool {
        self.banner.tone == Tone::Success
    }
}

/// ステータスから記述子を組み立てる
pub fn describe(status: &DependencyStatus) -> DialogDescriptor {
    let banner = if status.success {
        StatusBanner {
            tone: Tone::Success,
            icon: Icon::CheckCircle,
            text: "All dependencies are installed correctly!".to_string(),
        }
    } else {
        StatusBanner {
            tone: Tone::Danger,
            icon: Icon::ExclamationTriangle,
            text: "Some dependencies are missing or have issues.".to_string(),
        }
    };

    let items = status
        .dependencies
        .iter()
        .map(|dep| DialogItem {
            name: sanitize_text(&dep.name),
            version: dep
                .version
                .as_deref()
                .filter(|_| dep.installed)
                .map(sanitize_text)
                .filter(|v| !v.is_empty()),
            badge: Badge::from_installed(dep.installed),
        })
        .collect();

    let message = status
        .message
        .as_deref()
        .map(sanitize_text)
        .filter(|m| !m.trim().is_empty());

    DialogDescriptor {
        header: DialogHeader {
            icon: Icon::CheckCircle,
            title: DIALOG_TITLE.to_string(),
            closable: true,
        },
        banner,
        items,
        message,
        footer_action: "Close".to_string(),
    }
}

/// 表示用にテキストを無害化する
///
/// 制御文字（改行・タブ含む）は空白に置き換え、連続する空白は1つにまとめる。
pub fn sanitize_text(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[path = "dialog_test.rs"]
mod tests;
