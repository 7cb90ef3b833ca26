use std::io;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::model::config::EditorConfig;
use crate::model::table::{ColumnKey, RowKey, Table};
use crate::ops::bind::{Binder, Binding, EditorEvent, Outcome};
use crate::ops::selection::selected_keys;

use super::input;
use super::picker::DatePicker;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into a cell
    Edit,
    /// Calendar picker open on a date cell
    Picker,
}

/// How the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Emit the edited document
    Finish,
    /// Drop all changes
    Abort,
}

/// One-line message shown in the status row until the next key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub error: bool,
}

/// Main application state
pub struct App {
    pub table: Table,
    pub binder: Binder,
    pub theme: Theme,
    pub show_key_hints: bool,
    pub mode: Mode,
    /// Cursor row (position among data rows)
    pub cursor_row: usize,
    /// Cursor column: 0 is the checkbox column, 1.. are editable columns
    pub cursor_col: usize,
    /// First visible data row
    pub scroll_offset: usize,
    /// Cell being typed into (resolved when editing starts)
    pub edit_target: Option<(RowKey, ColumnKey)>,
    pub edit_buffer: String,
    /// Byte offset into `edit_buffer`
    pub edit_cursor: usize,
    pub picker: Option<DatePicker>,
    pub show_help: bool,
    pub status: Option<StatusMessage>,
    pub exit: Option<Exit>,
    /// Date the picker falls back to
    pub today: NaiveDate,
}

impl App {
    pub fn new(table: Table, binder: Binder, config: &EditorConfig) -> Self {
        App {
            table,
            binder,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            mode: Mode::Navigate,
            cursor_row: 0,
            cursor_col: 0,
            scroll_offset: 0,
            edit_target: None,
            edit_buffer: String::new(),
            edit_cursor: 0,
            picker: None,
            show_help: false,
            status: None,
            exit: None,
            today: Local::now().date_naive(),
        }
    }

    /// Key of the row under the cursor
    pub fn cursor_row_key(&self) -> Option<RowKey> {
        self.table.row_key_at(self.cursor_row)
    }

    /// Key of the column under the cursor; None on the checkbox column
    pub fn cursor_column_key(&self) -> Option<ColumnKey> {
        let idx = self.cursor_col.checked_sub(1)?;
        self.table.column_key_at(idx).cloned()
    }

    /// Row and column under the cursor, resolved now
    pub fn cursor_target(&self) -> Option<(RowKey, ColumnKey)> {
        Some((self.cursor_row_key()?, self.cursor_column_key()?))
    }

    pub fn cursor_binding(&self) -> Option<&Binding> {
        let column = self.cursor_column_key()?;
        self.binder.binding(&column)
    }

    pub fn selected_count(&self) -> usize {
        selected_keys(&self.table).len()
    }

    /// Route an event through the binder and report the result in the status row
    pub fn dispatch(&mut self, event: EditorEvent) {
        match self.binder.dispatch(&mut self.table, event) {
            Ok(Outcome::Edited { propagation }) => {
                let n = propagation.fanned_out();
                if n > 0 {
                    let noun = if n == 1 { "row" } else { "rows" };
                    self.set_status(format!("copied to {} more {}", n, noun), false);
                }
            }
            Ok(_) => {}
            Err(e) => self.set_status(e.to_string(), true),
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, error: bool) {
        self.status = Some(StatusMessage {
            text: text.into(),
            error,
        });
    }

    /// Keep the cursor inside the table
    pub fn clamp_cursor(&mut self) {
        self.cursor_row = self.cursor_row.min(self.table.len().saturating_sub(1));
        self.cursor_col = self.cursor_col.min(self.table.columns.len());
    }

    /// Adjust `scroll_offset` so the cursor row is within `visible` rows
    pub fn scroll_to_cursor(&mut self, visible: usize) {
        if visible == 0 {
            return;
        }
        if self.cursor_row < self.scroll_offset {
            self.scroll_offset = self.cursor_row;
        } else if self.cursor_row >= self.scroll_offset + visible {
            self.scroll_offset = self.cursor_row + 1 - visible;
        }
    }
}

/// Run the TUI on a loaded table.
///
/// Returns the edited table when the user finishes, None when they abort.
/// The screen is drawn on stderr so stdout stays free for the document.
pub fn run(
    table: Table,
    binder: Binder,
    config: &EditorConfig,
) -> Result<Option<Table>, Box<dyn std::error::Error>> {
    let mut app = App::new(table, binder, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    match app.exit {
        Some(Exit::Finish) => Ok(Some(app.table)),
        _ => Ok(None),
    }
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stderr>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.exit.is_some() {
            break;
        }
    }
    Ok(())
}
