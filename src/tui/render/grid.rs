use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::table::{ColumnKind, Row};
use crate::parse::table_serializer::checkbox;
use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_width, pad_to_width, truncate_to_width};

/// Widest a column gets before its values are truncated
const MAX_CELL_WIDTH: usize = 30;
const MIN_CELL_WIDTH: usize = 3;
const CELL_GAP: &str = "  ";
const EDIT_CURSOR: char = '\u{258C}'; // ▌

/// Render the header line and the visible rows of the table
pub fn render_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let visible = (area.height as usize).saturating_sub(1);
    app.scroll_to_cursor(visible);

    let widths = column_widths(app);
    let gutter = app.table.len().saturating_sub(1).to_string().len();

    let mut lines: Vec<Line> = Vec::with_capacity(visible + 1);
    lines.push(header_line(app, &widths, gutter));

    if app.table.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (no rows)",
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    for (index, row) in app
        .table
        .rows
        .values()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible)
    {
        lines.push(row_line(app, index, row, &widths, gutter));
    }

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Text shown in the cell being edited, with the cursor drawn in
fn edit_display(app: &App) -> String {
    let cursor = app.edit_cursor.min(app.edit_buffer.len());
    format!(
        "{}{}{}",
        &app.edit_buffer[..cursor],
        EDIT_CURSOR,
        &app.edit_buffer[cursor..]
    )
}

fn column_widths(app: &App) -> Vec<usize> {
    app.table
        .columns
        .values()
        .enumerate()
        .map(|(idx, column)| {
            let values = app
                .table
                .rows
                .values()
                .map(|r| display_width(&r.values[idx]));
            let widest = values
                .chain(std::iter::once(display_width(&column.title)))
                .max()
                .unwrap_or(0)
                .clamp(MIN_CELL_WIDTH, MAX_CELL_WIDTH);
            if app.mode == Mode::Edit && app.cursor_col == idx + 1 {
                widest.max(display_width(&edit_display(app)))
            } else {
                widest
            }
        })
        .collect()
}

fn header_line<'a>(app: &App, widths: &[usize], gutter: usize) -> Line<'a> {
    let bg = app.theme.background;
    let header = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(format!(" {} ", " ".repeat(gutter)), Style::default().bg(bg)),
        Span::styled(checkbox(app.table.select_all), header),
    ];
    for (column, width) in app.table.columns.values().zip(widths) {
        let style = match column.kind {
            ColumnKind::Date => header.fg(app.theme.commit_column),
            ColumnKind::Text => header,
        };
        spans.push(Span::styled(CELL_GAP, Style::default().bg(bg)));
        spans.push(Span::styled(
            pad_to_width(&truncate_to_width(&column.title, *width), *width),
            style,
        ));
    }
    Line::from(spans)
}

fn row_line<'a>(app: &App, index: usize, row: &Row, widths: &[usize], gutter: usize) -> Line<'a> {
    let theme = &app.theme;
    let row_bg = if row.selected {
        theme.selection_bg
    } else {
        theme.background
    };
    let base = Style::default().fg(theme.text).bg(row_bg);
    let at_cursor = index == app.cursor_row;
    let cursor_style = Style::default().fg(theme.text_bright).bg(theme.cursor_bg);

    let mut spans = vec![Span::styled(
        format!(" {:>gutter$} ", index),
        Style::default().fg(theme.dim).bg(theme.background),
    )];

    let box_style = if at_cursor && app.cursor_col == 0 {
        cursor_style
    } else if row.selected {
        base.fg(theme.green)
    } else {
        base
    };
    spans.push(Span::styled(checkbox(row.selected), box_style));

    for (idx, width) in widths.iter().enumerate() {
        let on_cursor = at_cursor && app.cursor_col == idx + 1;
        spans.push(Span::styled(CELL_GAP, base));
        if on_cursor && app.mode == Mode::Edit {
            spans.push(Span::styled(
                pad_to_width(&edit_display(app), *width),
                cursor_style.fg(theme.highlight),
            ));
            continue;
        }
        let text = pad_to_width(&truncate_to_width(&row.values[idx], *width), *width);
        let style = if on_cursor { cursor_style } else { base };
        spans.push(Span::styled(text, style));
    }
    Line::from(spans)
}
