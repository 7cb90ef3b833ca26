use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::model::config::TableConfig;
use crate::model::table::Table;
use crate::parse::{ParseError, parse_table};

/// Error type for loading documents and config
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ConfigParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("{path}: {source}")]
    TableParseError { path: PathBuf, source: ParseError },
}

/// Read a document from a path, or from stdin when the path is `-`
pub fn read_document(path: &Path) -> Result<String, LoadError> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| LoadError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(|e| LoadError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read and parse a table, then assign column kinds from config
pub fn load_table(path: &Path, config: &TableConfig) -> Result<Table, LoadError> {
    let text = read_document(path)?;
    let mut table = parse_table(&text).map_err(|e| LoadError::TableParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    apply_column_kinds(&mut table, config);
    log::debug!(
        "loaded {}: {} columns, {} rows",
        path.display(),
        table.columns.len(),
        table.len()
    );
    Ok(table)
}

/// Classify every column as text or date
pub fn apply_column_kinds(table: &mut Table, config: &TableConfig) {
    for column in table.columns.values_mut() {
        column.kind = config.kind_of(column);
    }
}
