//! 描画処理の共通ユーティリティ

use crate::dialog::Tone;
use ratatui::prelude::*;

/// 画面中央にダイアログ領域を計算
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// トーンに対応する色
pub fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Success => Style::default().fg(Color::Green),
        Tone::Danger => Style::default().fg(Color::Red),
        Tone::Secondary => Style::default().fg(Color::DarkGray),
    }
}
