use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::table::{Column, ColumnKey, ColumnKind};

/// Configuration from mgrid.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Header titles or keys of columns holding dates
    #[serde(default = "default_date_columns")]
    pub date_columns: Vec<String>,
    /// Column used to address rows by value (default: first column)
    #[serde(default)]
    pub key_column: Option<String>,
    /// Text columns fan out on every keystroke; when false they wait for a commit
    #[serde(default = "default_true")]
    pub propagate_on_keystroke: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            date_columns: default_date_columns(),
            key_column: None,
            propagate_on_keystroke: true,
        }
    }
}

impl TableConfig {
    /// Kind of a column according to `date_columns`
    pub fn kind_of(&self, column: &Column) -> ColumnKind {
        let is_date = self.date_columns.iter().any(|name| {
            name.eq_ignore_ascii_case(&column.title) || ColumnKey::from_title(name) == column.key
        });
        if is_date {
            ColumnKind::Date
        } else {
            ColumnKind::Text
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_date_columns() -> Vec<String> {
    vec!["date".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Color overrides, e.g. `highlight = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}
