use chrono::NaiveDate;
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::table_io::apply_column_kinds;
use crate::model::config::EditorConfig;
use crate::ops::bind::Binder;
use crate::parse::parse_table;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build an App from markdown with the given config; "today" is pinned.
pub fn app_from_md_with_config(md: &str, config: &EditorConfig) -> App {
    let mut table = parse_table(md).unwrap();
    apply_column_kinds(&mut table, &config.table);
    let binder = Binder::from_config(&table, &config.table);
    let mut app = App::new(table, binder, config);
    app.today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
    app
}

/// Build an App from markdown with the default config.
pub fn app_from_md(md: &str) -> App {
    app_from_md_with_config(md, &EditorConfig::default())
}

/// Three photos; rows 0 and 2 checked. "Date" is a date column by default.
pub const SURVEY_MD: &str = "\
# Dive log

| [ ] | Name | Date | Site |
|-----|------|------|------|
| [x] | IMG_001.jpg | 2024-03-01 | Reef A |
| [ ] | IMG_002.jpg | 2024-03-02 | Reef B |
| [x] | IMG_003.jpg | 2024-03-03 | Reef C |
";
