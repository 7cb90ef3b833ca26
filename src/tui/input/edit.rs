use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::bind::EditorEvent;
use crate::tui::app::{App, Mode};
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => commit_edit(app),
        KeyCode::Tab => {
            commit_edit(app);
            app.cursor_col += 1;
        }
        KeyCode::BackTab => {
            commit_edit(app);
            app.cursor_col = app.cursor_col.saturating_sub(1);
        }
        KeyCode::Up => {
            commit_edit(app);
            app.cursor_row = app.cursor_row.saturating_sub(1);
        }
        KeyCode::Down => {
            commit_edit(app);
            app.cursor_row += 1;
        }
        KeyCode::Left => {
            if let Some(prev) = prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_cursor = prev;
            }
        }
        KeyCode::Right => {
            if let Some(next) = next_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_cursor = next;
            }
        }
        KeyCode::Home => app.edit_cursor = 0,
        KeyCode::End => app.edit_cursor = app.edit_buffer.len(),
        KeyCode::Backspace => {
            if let Some(prev) = prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_buffer.replace_range(prev..app.edit_cursor, "");
                app.edit_cursor = prev;
                send_input(app);
            }
        }
        KeyCode::Delete => {
            if let Some(next) = next_grapheme_boundary(&app.edit_buffer, app.edit_cursor) {
                app.edit_buffer.replace_range(app.edit_cursor..next, "");
                send_input(app);
            }
        }
        // Ctrl-U clears the cell
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.clear();
            app.edit_cursor = 0;
            send_input(app);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.insert(app.edit_cursor, c);
            app.edit_cursor += c.len_utf8();
            send_input(app);
        }
        _ => {}
    }
    app.clamp_cursor();
}

/// Every change to the buffer is an input event on the target cell
fn send_input(app: &mut App) {
    let Some((row, column)) = app.edit_target.clone() else {
        return;
    };
    let value = app.edit_buffer.clone();
    app.dispatch(EditorEvent::Input { row, column, value });
}

/// Leave the cell: the buffer is committed and edit mode ends
fn commit_edit(app: &mut App) {
    if let Some((row, column)) = app.edit_target.take() {
        let value = std::mem::take(&mut app.edit_buffer);
        app.dispatch(EditorEvent::Commit { row, column, value });
    }
    app.edit_buffer.clear();
    app.edit_cursor = 0;
    app.mode = Mode::Navigate;
}
