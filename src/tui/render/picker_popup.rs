use chrono::Datelike;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_fixed;

const WEEKDAYS: &str = "Mo Tu We Th Fr Sa Su";

/// Render the calendar for the open date picker
pub fn render_picker_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(picker) = &app.picker else {
        return;
    };
    let bg = app.theme.background;
    let text = Style::default().fg(app.theme.text).bg(bg);
    let picked = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.cursor_bg)
        .add_modifier(Modifier::BOLD);
    let today = Style::default().fg(app.theme.cyan).bg(bg);

    let weeks = picker.month_grid();
    // Borders, weekday header, one line per week
    let height = weeks.len() as u16 + 3;
    let popup = centered_fixed(WEEKDAYS.len() as u16 + 4, height, area);
    frame.render_widget(Clear, popup);

    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", WEEKDAYS),
        Style::default().fg(app.theme.dim).bg(bg),
    ))];
    for week in weeks {
        let mut spans = vec![Span::styled(" ", text)];
        for (i, day) in week.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", text));
            }
            let Some(day) = day else {
                spans.push(Span::styled("  ", text));
                continue;
            };
            let is_today = app.today.year() == picker.date.year()
                && app.today.month() == picker.date.month()
                && app.today.day() == *day;
            let style = if *day == picker.date.day() {
                picked
            } else if is_today {
                today
            } else {
                text
            };
            spans.push(Span::styled(format!("{:>2}", day), style));
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.commit_column).bg(bg))
        .title(Span::styled(
            format!(" {} ", picker.month_title()),
            Style::default().fg(app.theme.text_bright).bg(bg),
        ))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
