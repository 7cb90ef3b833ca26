use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::bind::EditorEvent;
use crate::ops::cell::get_cell;
use crate::tui::app::{App, Exit, Mode};
use crate::tui::picker::DatePicker;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor_row = app.cursor_row.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.cursor_row += 1;
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
            app.cursor_col = app.cursor_col.saturating_sub(1);
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            app.cursor_col += 1;
        }
        KeyCode::Home | KeyCode::Char('g') => app.cursor_row = 0,
        KeyCode::End | KeyCode::Char('G') => app.cursor_row = usize::MAX,
        KeyCode::Char(' ') => toggle_cursor_row(app),
        KeyCode::Char('a') => {
            let checked = !app.table.select_all;
            app.dispatch(EditorEvent::MasterToggled(checked));
        }
        KeyCode::Enter => {
            if app.cursor_col == 0 {
                toggle_cursor_row(app);
            } else if app.cursor_binding().is_some_and(|b| b.picker) {
                open_picker(app);
            } else {
                begin_edit(app);
            }
        }
        KeyCode::Char('i') => begin_edit(app),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Char('q') => app.exit = Some(Exit::Finish),
        _ => {}
    }
    app.clamp_cursor();
}

fn toggle_cursor_row(app: &mut App) {
    if let Some(row) = app.cursor_row_key() {
        app.dispatch(EditorEvent::RowToggled(row));
    }
}

/// Start typing into the cell under the cursor, seeded with its value
pub(super) fn begin_edit(app: &mut App) {
    let Some((row, column)) = app.cursor_target() else {
        return;
    };
    let Ok(value) = get_cell(&app.table, row, &column) else {
        return;
    };
    app.edit_buffer = value.to_string();
    app.edit_cursor = app.edit_buffer.len();
    app.edit_target = Some((row, column));
    app.mode = Mode::Edit;
}

fn open_picker(app: &mut App) {
    let Some((row, column)) = app.cursor_target() else {
        return;
    };
    let Ok(value) = get_cell(&app.table, row, &column) else {
        return;
    };
    app.picker = Some(DatePicker::open(row, column, value, app.today));
    app.mode = Mode::Picker;
}
