pub mod grid;
pub mod help_overlay;
pub mod helpers;
pub mod picker_popup;
pub mod status_row;
pub mod title_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title bar (2 rows) | grid | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + separator
            Constraint::Min(1),    // grid
            Constraint::Length(1), // status row
        ])
        .split(area);

    title_bar::render_title_bar(frame, app, chunks[0]);
    grid::render_grid(frame, app, chunks[1]);

    if app.picker.is_some() {
        picker_popup::render_picker_popup(frame, app, chunks[1]);
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, frame.area());
    }

    status_row::render_status_row(frame, app, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;

    #[test]
    fn full_screen_layout() {
        let mut app = app_from_md(SURVEY_MD);
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("Dive log"));
        assert!(lines[1].starts_with('\u{2500}'));
        assert!(lines[2].contains("Name"));
        assert!(out.contains("IMG_003.jpg"));
    }

    #[test]
    fn help_draws_over_grid() {
        let mut app = app_from_md(SURVEY_MD);
        app.show_help = true;
        let out = render_to_string(TERM_W, TERM_H, |frame, _| render(frame, &mut app));
        assert!(out.contains("Key Bindings"));
    }
}
