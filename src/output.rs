//! 非対話コマンド用の出力整形

use crate::dialog::{DialogDescriptor, Tone};
use crate::sample::SampleRow;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use owo_colors::OwoColorize;

/// トーン付きの1行メッセージ
pub struct ToneLine {
    pub prefix: String,
    pub message: String,
}

impl ToneLine {
    pub fn format(tone: Tone, glyph: &str, text: &str) -> Self {
        let prefix = match tone {
            Tone::Success => glyph.green().to_string(),
            Tone::Danger => glyph.red().to_string(),
            Tone::Secondary => glyph.dimmed().to_string(),
        };
        Self {
            prefix,
            message: text.to_string(),
        }
    }
}

impl std::fmt::Display for ToneLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.prefix, self.message)
    }
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Danger => Color::Red,
        Tone::Secondary => Color::DarkGrey,
    }
}

/// ダイアログ記述子の依存関係一覧をテーブル化
pub fn dependency_table(descriptor: &DialogDescriptor) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Dependency", "Version", "Status"]);

    for item in &descriptor.items {
        table.add_row(vec![
            Cell::new(&item.name),
            Cell::new(item.version.as_deref().unwrap_or("-")),
            Cell::new(item.badge.label()).fg(tone_color(item.badge.tone())),
        ]);
    }

    table
}

/// サンプル行をテーブル化
pub fn sample_table<'a>(rows: impl IntoIterator<Item = &'a SampleRow>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Name", "Description"]);

    for row in rows {
        table.add_row(vec![row.name.as_str(), row.description.as_str()]);
    }

    table
}

/// ダイアログ記述子全体を文字列化
pub fn render_descriptor(descriptor: &DialogDescriptor) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n\n",
        descriptor.header.icon.glyph(),
        descriptor.header.title.bold()
    ));
    out.push_str(&format!(
        "{}\n\n",
        ToneLine::format(
            descriptor.banner.tone,
            descriptor.banner.icon.glyph(),
            &descriptor.banner.text
        )
    ));
    out.push_str(&format!("{}\n", dependency_table(descriptor)));
    if let Some(message) = &descriptor.message {
        out.push_str(&format!("\n{} {}\n", "Message:".bold(), message));
    }
    out
}
