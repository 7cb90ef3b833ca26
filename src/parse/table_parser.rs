use std::sync::LazyLock;

use regex::Regex;

use crate::model::table::{Column, ColumnKey, Row, RowKey, Table};

static SEPARATOR_CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:?-+:?$").expect("valid separator pattern"));

/// Error type for table parsing. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no table found: expected a line starting with `|`")]
    NoTable,
    #[error("line {line}: expected a `|---|` separator row under the header")]
    MissingSeparator { line: usize },
    #[error("line {line}: first header cell must be a checkbox like `[ ]`")]
    MissingCheckboxColumn { line: usize },
    #[error("line {line}: header has no editable columns")]
    NoColumns { line: usize },
    #[error("line {line}: duplicate column `{key}`")]
    DuplicateColumn { line: usize, key: String },
    #[error("line {line}: expected {expected} cells, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: `{cell}` is not a checkbox")]
    InvalidCheckbox { line: usize, cell: String },
}

/// Parse a Markdown document holding one pipe table whose first column is
/// a checkbox. Everything around the table is kept verbatim.
pub fn parse_table(source: &str) -> Result<Table, ParseError> {
    let lines: Vec<&str> = source.lines().collect();

    let header_idx = lines
        .iter()
        .position(|l| is_table_line(l))
        .ok_or(ParseError::NoTable)?;

    // Header: master checkbox + column titles
    let header_cells = split_cells(lines[header_idx]);
    let select_all = header_cells
        .first()
        .and_then(|c| parse_checkbox(c))
        .ok_or(ParseError::MissingCheckboxColumn {
            line: header_idx + 1,
        })?;
    if header_cells.len() < 2 {
        return Err(ParseError::NoColumns {
            line: header_idx + 1,
        });
    }

    let mut table = Table {
        preamble: lines[..header_idx].iter().map(|l| l.to_string()).collect(),
        select_all,
        header_text: Some(lines[header_idx].to_string()),
        trailing_newline: source.ends_with('\n'),
        crlf: source.contains("\r\n"),
        ..Default::default()
    };

    for (i, title) in header_cells[1..].iter().enumerate() {
        let mut column = Column::new(title);
        if column.key.is_empty() {
            column.key = ColumnKey::from_title(&format!("col{}", i + 1));
        }
        if table.columns.contains_key(&column.key) {
            return Err(ParseError::DuplicateColumn {
                line: header_idx + 1,
                key: column.key.to_string(),
            });
        }
        table.columns.insert(column.key.clone(), column);
    }

    // Separator
    let sep_idx = header_idx + 1;
    match lines.get(sep_idx) {
        Some(line) if is_separator_row(line) => {
            table.separator_text = Some(line.to_string());
        }
        _ => return Err(ParseError::MissingSeparator { line: sep_idx + 1 }),
    }

    // Data rows run until the first non-table line
    let expected = table.columns.len() + 1;
    let mut idx = sep_idx + 1;
    while idx < lines.len() && is_table_line(lines[idx]) {
        let cells = split_cells(lines[idx]);
        if cells.len() != expected {
            return Err(ParseError::RaggedRow {
                line: idx + 1,
                expected,
                found: cells.len(),
            });
        }
        let selected = parse_checkbox(&cells[0]).ok_or_else(|| ParseError::InvalidCheckbox {
            line: idx + 1,
            cell: cells[0].clone(),
        })?;

        let key = RowKey(table.rows.len() as u32);
        let mut row = Row::new(key, selected, cells[1..].to_vec());
        row.source_text = Some(lines[idx].to_string());
        row.dirty = false;
        table.rows.insert(key, row);
        idx += 1;
    }

    table.trailer = lines[idx..].iter().map(|l| l.to_string()).collect();
    Ok(table)
}

fn is_table_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

fn is_separator_row(line: &str) -> bool {
    if !is_table_line(line) {
        return false;
    }
    let cells = split_cells(line);
    !cells.is_empty() && cells.iter().all(|c| SEPARATOR_CELL.is_match(c))
}

/// Parse a checkbox cell. An empty cell reads as unchecked.
pub fn parse_checkbox(cell: &str) -> Option<bool> {
    match cell.trim() {
        "" | "[ ]" => Some(false),
        "[x]" | "[X]" => Some(true),
        _ => None,
    }
}

/// Split a pipe-table line into trimmed cells. `\|` is a literal pipe.
pub fn split_cells(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);

    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                current.push('|');
            }
            '|' => {
                cells.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }
    // Text after the last pipe only counts when the closing pipe is missing
    if !current.trim().is_empty() {
        cells.push(current.trim().to_string());
    }
    cells
}
