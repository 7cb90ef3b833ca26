use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;

use super::helpers::spans_width;

/// Render the document title and selection count, with a separator below
pub fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    let bg = app.theme.background;
    let width = area.width as usize;
    let title = app.table.title().unwrap_or("table");

    let mut spans = vec![
        Span::styled(" ", Style::default().bg(bg)),
        Span::styled(
            "\u{25B6}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ),
        Span::styled(
            format!(" {}", title),
            Style::default()
                .fg(app.theme.text_bright)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
    ];

    let count = format!(
        "{}/{} selected ",
        app.selected_count(),
        app.table.len()
    );
    let used = spans_width(&spans);
    if used + count.len() < width {
        spans.push(Span::styled(
            " ".repeat(width - used - count.len()),
            Style::default().bg(bg),
        ));
        spans.push(Span::styled(count, Style::default().fg(app.theme.dim).bg(bg)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "\u{2500}".repeat(width),
            Style::default().fg(app.theme.dim).bg(bg),
        ))),
        chunks[1],
    );
}
