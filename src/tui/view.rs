//! 端末ホストの view（描画）
//!
//! ページモデルをそのまま描く。ダイアログが取り付けられていれば最前面に重ねる。

use super::app::{Focus, Model};
use super::common::{centered_rect, tone_style};
use crate::dialog::{DialogDescriptor, Tone};
use crate::page::Banner;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, List, ListItem, Paragraph, Row, Table, Wrap};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// 画面を描画
pub fn view(f: &mut Frame, model: &Model) {
    f.render_widget(Clear, f.area());

    let banner_count = model
        .page
        .container()
        .map_or(0, |c| c.banners().len());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),            // 検索欄 + ボタン
            Constraint::Length(clamp_u16(banner_count)), // メッセージ帯
            Constraint::Min(3),               // テーブル
            Constraint::Length(1),            // ヘルプ
        ])
        .split(f.area());

    view_toolbar(f, model, chunks[0]);
    if let Some(container) = model.page.container() {
        view_banners(f, container.banners(), chunks[1]);
    }
    view_table(f, model, chunks[2]);
    view_help(f, model, chunks[3]);

    if let Some(node) = model.page.body().top_dialog() {
        view_dialog(f, &node.descriptor);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// 検索欄とチェックボタン
fn view_toolbar(f: &mut Frame, model: &Model, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(26)])
        .split(area);

    if let Some(field) = model.page.search_field() {
        let focused = model.focus == Focus::Search;
        let cursor = if focused { "_" } else { "" };
        let search = Paragraph::new(format!("{}{}", field.value(), cursor)).block(
            Block::default()
                .title(" Search samples ")
                .borders(Borders::ALL)
                .border_style(focus_style(focused)),
        );
        f.render_widget(search, chunks[0]);
    }

    if let Some(control) = model.page.check_control() {
        let focused = model.focus == Focus::Button;
        let label = if control.is_disabled() {
            format!("{} {}", SPINNER[model.tick % SPINNER.len()], control.label())
        } else {
            control.label().to_string()
        };
        let style = if control.is_disabled() {
            Style::default().fg(Color::DarkGray)
        } else {
            focus_style(focused).add_modifier(Modifier::BOLD)
        };
        let button = Paragraph::new(label)
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(focus_style(focused)),
            );
        f.render_widget(button, chunks[1]);
    }
}

/// メッセージ帯（1件1行）
fn view_banners(f: &mut Frame, banners: &[Banner], area: Rect) {
    let items: Vec<ListItem> = banners
        .iter()
        .map(|b| {
            ListItem::new(format!("{} {}  [x]", b.icon.glyph(), b.text)).style(tone_style(b.tone))
        })
        .collect();
    f.render_widget(List::new(items), area);
}

/// サンプルテーブル（表示中の行のみ）
fn view_table(f: &mut Frame, model: &Model, area: Rect) {
    let Some(table) = model.page.table() else {
        return;
    };
    let focused = model.focus == Focus::Table;

    let rows: Vec<Row> = table
        .visible_rows()
        .skip(model.table_offset)
        .map(|row| Row::new(vec![Cell::from(row.name.clone()), Cell::from(row.description.clone())]))
        .collect();

    let title = format!(" Samples ({}/{}) ", table.visible_count(), table.len());
    let widget = Table::new(rows, [Constraint::Percentage(30), Constraint::Percentage(70)])
        .header(
            Row::new(vec!["Name", "Description"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(focus_style(focused)),
        );
    f.render_widget(widget, area);

    if let Some(notice) = model.page.no_results().filter(|n| n.is_visible()) {
        let inner = Rect::new(
            area.x + 2,
            area.y + 2,
            area.width.saturating_sub(4),
            1.min(area.height.saturating_sub(3)),
        );
        let text = Paragraph::new(notice.text()).style(Style::default().fg(Color::Yellow));
        f.render_widget(text, inner);
    }
}

fn view_help(f: &mut Frame, model: &Model, area: Rect) {
    let text = if model.dialog_open() {
        " esc/enter: close dialog"
    } else {
        match model.focus {
            Focus::Search => " type to filter | esc: clear | tab: next",
            Focus::Table => " ↑/↓: scroll | x: close banner | tab: next | q: quit",
            Focus::Button => " enter: check dependencies | x: close banner | tab: next | q: quit",
        }
    };
    f.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn clamp_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// ダイアログの高さ（枠・見出し・フッターを含む）
fn dialog_height(descriptor: &DialogDescriptor) -> u16 {
    let message_height = if descriptor.message.is_some() { 2 } else { 0 };
    clamp_u16(descriptor.items.len())
        .saturating_add(message_height)
        .saturating_add(9)
}

/// ステータスダイアログ
fn view_dialog(f: &mut Frame, descriptor: &DialogDescriptor) {
    let area = centered_rect(64, dialog_height(descriptor), f.area());
    f.render_widget(Clear, area);

    let header = if descriptor.header.closable {
        format!(" {} {}  [esc] ", descriptor.header.icon.glyph(), descriptor.header.title)
    } else {
        format!(" {} {} ", descriptor.header.icon.glyph(), descriptor.header.title)
    };
    let block = Block::default()
        .title(header)
        .borders(Borders::ALL)
        .border_style(tone_style(descriptor.banner.tone));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::styled(
            format!("{} {}", descriptor.banner.icon.glyph(), descriptor.banner.text),
            tone_style(descriptor.banner.tone).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled("Details:", Style::default().add_modifier(Modifier::BOLD)),
    ];

    for item in &descriptor.items {
        let name = format!("  {}", item.name);
        let version = item
            .version
            .as_ref()
            .map(|v| format!(" ({v})"))
            .unwrap_or_default();
        let pad = 44usize.saturating_sub(name.chars().count() + version.chars().count());
        lines.push(Line::from(vec![
            Span::raw(name),
            Span::styled(version, tone_style(Tone::Secondary)),
            Span::raw(" ".repeat(pad)),
            Span::styled(format!("[{}]", item.badge.label()), tone_style(item.badge.tone())),
        ]));
    }

    if let Some(message) = &descriptor.message {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Message: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(message.clone()),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(
        Line::styled(
            format!("[ {} ]", descriptor.footer_action),
            Style::default().add_modifier(Modifier::REVERSED),
        )
        .alignment(Alignment::Right),
    );

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
