use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Stable identifier for a data row, assigned in document order at load time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowKey(pub u32);

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable identifier for an editable column, derived from its header title
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnKey(String);

impl ColumnKey {
    /// Slug a header title: lowercase, runs of non-alphanumerics become `_`.
    /// `"Photo Date"` → `photo_date`
    pub fn from_title(title: &str) -> Self {
        let mut slug = String::with_capacity(title.len());
        let mut pending_sep = false;
        for c in title.trim().chars() {
            if c.is_alphanumeric() {
                if pending_sep && !slug.is_empty() {
                    slug.push('_');
                }
                pending_sep = false;
                slug.extend(c.to_lowercase());
            } else {
                pending_sep = true;
            }
        }
        ColumnKey(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ColumnKey {
    fn from(s: &str) -> Self {
        ColumnKey::from_title(s)
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of value an editable column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    #[default]
    Text,
    Date,
}

/// An editable column (the checkbox column is not one)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: ColumnKey,
    /// Header text as written in the document
    pub title: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(title: &str) -> Self {
        Column {
            key: ColumnKey::from_title(title),
            title: title.to_string(),
            kind: ColumnKind::Text,
        }
    }
}

/// A data row: its checkbox and one value per editable column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Row {
    pub key: RowKey,
    pub selected: bool,
    /// Values in column order
    pub values: Vec<String>,

    // --- Source tracking ---
    /// The original line, emitted verbatim while the row is clean
    #[serde(skip)]
    pub source_text: Option<String>,
    /// Whether this row has changed since parsing
    #[serde(skip)]
    pub dirty: bool,
}

impl Row {
    /// Create a new row with no source, marked dirty
    pub fn new(key: RowKey, selected: bool, values: Vec<String>) -> Self {
        Row {
            key,
            selected,
            values,
            source_text: None,
            dirty: true,
        }
    }

    /// Set the checkbox. Returns true if the state changed.
    pub fn set_selected(&mut self, selected: bool) -> bool {
        if self.selected == selected {
            return false;
        }
        self.selected = selected;
        self.dirty = true;
        true
    }

    /// Write the value at `index`. Rewriting the current value keeps the row clean.
    pub fn set_value(&mut self, index: usize, value: &str) -> bool {
        match self.values.get_mut(index) {
            Some(slot) if slot != value => {
                *slot = value.to_string();
                self.dirty = true;
                true
            }
            _ => false,
        }
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.selected == other.selected && self.values == other.values
    }
}

impl Eq for Row {}

/// A metadata table: master checkbox, editable columns, and data rows.
///
/// Rows are kept in an ordered arena keyed by `RowKey`, so a key keeps
/// addressing the same row no matter where it sits. The header is not a row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Lines before the header, kept verbatim
    pub preamble: Vec<String>,
    /// The header's checkbox ("select all")
    pub select_all: bool,
    pub columns: IndexMap<ColumnKey, Column>,
    pub rows: IndexMap<RowKey, Row>,
    /// Lines after the last data row, kept verbatim
    pub trailer: Vec<String>,

    // --- Source tracking ---
    pub header_text: Option<String>,
    pub separator_text: Option<String>,
    pub header_dirty: bool,
    pub trailing_newline: bool,
    /// Lines end in `\r\n` rather than `\n`
    pub crlf: bool,
}

impl Table {
    /// Build an in-memory table with the given column titles and no rows
    pub fn with_columns(titles: &[&str]) -> Self {
        let mut table = Table {
            header_dirty: true,
            trailing_newline: true,
            ..Default::default()
        };
        for title in titles {
            let column = Column::new(title);
            table.columns.insert(column.key.clone(), column);
        }
        table
    }

    /// Append a row during construction. Returns its key.
    pub fn push_row(&mut self, selected: bool, values: Vec<String>) -> RowKey {
        let key = RowKey(self.rows.len() as u32);
        self.rows.insert(key, Row::new(key, selected, values));
        key
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, key: RowKey) -> Option<&Row> {
        self.rows.get(&key)
    }

    pub fn row_mut(&mut self, key: RowKey) -> Option<&mut Row> {
        self.rows.get_mut(&key)
    }

    /// Key of the data row at a 0-based position
    pub fn row_key_at(&self, index: usize) -> Option<RowKey> {
        self.rows.get_index(index).map(|(key, _)| *key)
    }

    pub fn row_index(&self, key: RowKey) -> Option<usize> {
        self.rows.get_index_of(&key)
    }

    pub fn column(&self, key: &ColumnKey) -> Option<&Column> {
        self.columns.get(key)
    }

    /// Key of the editable column at a 0-based position
    pub fn column_key_at(&self, index: usize) -> Option<&ColumnKey> {
        self.columns.get_index(index).map(|(key, _)| key)
    }

    pub fn column_index(&self, key: &ColumnKey) -> Option<usize> {
        self.columns.get_index_of(key)
    }

    /// Resolve user input to a column. A number is always a 0-based column
    /// index; anything else matches the key, the title (case-insensitive),
    /// then the slugged title.
    pub fn resolve_column(&self, name: &str) -> Option<ColumnKey> {
        let name = name.trim();
        if let Ok(index) = name.parse::<usize>() {
            return self.column_key_at(index).cloned();
        }
        if let Some((key, _)) = self.columns.get_key_value(&ColumnKey(name.to_string())) {
            return Some(key.clone());
        }
        if let Some(column) = self
            .columns
            .values()
            .find(|c| c.title.eq_ignore_ascii_case(name))
        {
            return Some(column.key.clone());
        }
        let slug = ColumnKey::from_title(name);
        self.columns.contains_key(&slug).then_some(slug)
    }

    /// Set the master checkbox. Returns true if it changed.
    pub fn set_select_all(&mut self, checked: bool) -> bool {
        if self.select_all == checked {
            return false;
        }
        self.select_all = checked;
        self.header_dirty = true;
        true
    }

    /// First `# ` heading in the preamble, if any
    pub fn title(&self) -> Option<&str> {
        self.preamble
            .iter()
            .find_map(|l| l.trim().strip_prefix("# "))
            .map(str::trim)
    }

    /// Whether anything differs from the parsed source
    pub fn is_dirty(&self) -> bool {
        self.header_dirty || self.rows.values().any(|r| r.dirty)
    }
}
