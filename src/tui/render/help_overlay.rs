use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_rect;

const NAVIGATE_KEYS: &[(&str, &str)] = &[
    ("\u{2191}\u{2193}/jk", "Move between rows"),
    ("\u{2190}\u{2192}/hl", "Move between columns"),
    ("g/G", "Jump to first/last row"),
    ("Space", "Check or uncheck the row"),
    ("a", "Check or uncheck every row"),
    ("Enter", "Edit cell (date columns open the calendar)"),
    ("i", "Type into the cell"),
    ("q", "Done: print the document"),
    ("Ctrl-C", "Quit without output"),
];

const EDIT_KEYS: &[(&str, &str)] = &[
    ("Enter/Tab/Esc", "Commit the cell"),
    ("\u{2191}\u{2193}", "Commit and move row"),
    ("Ctrl-U", "Clear the cell"),
];

const PICKER_KEYS: &[(&str, &str)] = &[
    ("h/l", "Previous/next day"),
    ("k/j", "Previous/next week"),
    ("[/]", "Previous/next month"),
    ("t", "Today"),
    ("Enter", "Pick the date"),
    ("Esc", "Cancel"),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Center the overlay, leaving some margin
    let overlay_area = centered_rect(70, 80, area);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));

    for (title, keys) in [
        (" Table", NAVIGATE_KEYS),
        (" Editing", EDIT_KEYS),
        (" Calendar", PICKER_KEYS),
    ] {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(title, header_style)));
        for (key, desc) in keys {
            add_binding(&mut lines, key, desc, key_style, desc_style);
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 16;
    let padded_key = format!(" {:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
