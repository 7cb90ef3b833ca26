use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ops::bind::Trigger;
use crate::tui::app::{App, Mode};

use super::helpers::spans_width;

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if let Some(status) = &app.status {
        let fg = if status.error {
            app.theme.red
        } else {
            app.theme.green
        };
        spans.push(Span::styled(
            format!(" {}", status.text),
            Style::default().fg(fg).bg(bg),
        ));
    } else if app.mode != Mode::Navigate {
        spans.push(Span::styled(
            format!(" {}", mode_label(app)),
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
    }

    if app.show_key_hints {
        let hint = key_hint(app);
        let used = spans_width(&spans);
        if used + hint.len() + 1 < width {
            spans.push(Span::styled(
                " ".repeat(width - used - hint.len() - 1),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn mode_label(app: &App) -> String {
    match app.mode {
        Mode::Navigate => String::new(),
        Mode::Edit => match &app.edit_target {
            Some((_, column)) => {
                let when = match app.binder.binding(column).map(|b| b.trigger) {
                    Some(Trigger::Keystroke) => "copies as you type",
                    _ => "copies on commit",
                };
                format!("EDIT {}  ({})", column, when)
            }
            None => String::new(),
        },
        Mode::Picker => match &app.picker {
            Some(picker) => format!("DATE {}  {}", picker.column, picker.value()),
            None => String::new(),
        },
    }
}

fn key_hint(app: &App) -> &'static str {
    match app.mode {
        Mode::Navigate => "space check  a all  enter edit  q done  ? help",
        Mode::Edit => "enter/tab/esc commit",
        Mode::Picker => "hjkl move  [/] month  t today  enter pick  esc cancel",
    }
}
