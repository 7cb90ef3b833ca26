use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::bind::EditorEvent;
use crate::tui::app::{App, Mode};

pub(super) fn handle_picker(app: &mut App, key: KeyEvent) {
    let today = app.today;
    let Some(picker) = app.picker.as_mut() else {
        app.mode = Mode::Navigate;
        return;
    };
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => picker.move_days(-1),
        KeyCode::Right | KeyCode::Char('l') => picker.move_days(1),
        KeyCode::Up | KeyCode::Char('k') => picker.move_days(-7),
        KeyCode::Down | KeyCode::Char('j') => picker.move_days(7),
        KeyCode::PageUp | KeyCode::Char('[') => picker.move_months(-1),
        KeyCode::PageDown | KeyCode::Char(']') => picker.move_months(1),
        KeyCode::Char('t') => picker.date = today,
        KeyCode::Enter => {
            // Picking a date is a commit on the cell
            let value = picker.value();
            let row = picker.row;
            let column = picker.column.clone();
            app.picker = None;
            app.mode = Mode::Navigate;
            app.dispatch(EditorEvent::Commit { row, column, value });
        }
        KeyCode::Esc => {
            app.picker = None;
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use crate::model::table::RowKey;
    use crate::ops::cell::get_cell;
    use crate::tui::input::handle_key;
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::*;

    use super::*;

    fn dates(app: &App) -> Vec<String> {
        (0..3)
            .map(|i| {
                get_cell(&app.table, RowKey(i), &"date".into())
                    .unwrap()
                    .to_string()
            })
            .collect()
    }

    fn picking() -> App {
        let mut app = app_from_md(SURVEY_MD);
        app.cursor_col = 2;
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Picker);
        app
    }

    #[test]
    fn picked_date_fans_out_to_checked_rows() {
        let mut app = picking();
        handle_key(&mut app, ch('l'));
        handle_key(&mut app, ch('j'));
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.picker, None);
        assert_eq!(dates(&app), vec!["2024-03-09", "2024-03-02", "2024-03-09"]);
    }

    #[test]
    fn moving_does_not_touch_the_table() {
        let mut app = picking();
        handle_key(&mut app, ch(']'));
        handle_key(&mut app, ch('k'));
        assert_eq!(app.picker.as_ref().unwrap().value(), "2024-03-25");
        assert_eq!(dates(&app), vec!["2024-03-01", "2024-03-02", "2024-03-03"]);
    }

    #[test]
    fn escape_cancels() {
        let mut app = picking();
        handle_key(&mut app, ch('h'));
        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(dates(&app), vec!["2024-03-01", "2024-03-02", "2024-03-03"]);
    }

    #[test]
    fn t_jumps_to_today() {
        let mut app = picking();
        handle_key(&mut app, ch('t'));
        assert_eq!(
            app.picker.as_ref().unwrap().date,
            NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
        );
    }
}
