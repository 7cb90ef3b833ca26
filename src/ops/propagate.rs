use log::debug;
use serde::Serialize;

use crate::model::table::{ColumnKey, RowKey, Table};
use crate::ops::cell::{CellError, column_position};

/// Result of running propagation after an edit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "lowercase")]
pub enum Propagation {
    /// The edited row was not checked, so only that cell changed
    Skipped,
    /// `value` was written to every checked row (edited row included)
    Applied { value: String, rows: Vec<RowKey> },
}

impl Propagation {
    /// Number of rows other than the edited one that received the value
    pub fn fanned_out(&self) -> usize {
        match self {
            Propagation::Skipped => 0,
            Propagation::Applied { rows, .. } => rows.len().saturating_sub(1),
        }
    }
}

/// Copy the edited cell's value into the same column of every checked row.
///
/// Does nothing when the edited row itself is unchecked. Running it twice
/// leaves the table as running it once.
pub fn on_edit(table: &mut Table, row: RowKey, column: &ColumnKey) -> Result<Propagation, CellError> {
    let idx = column_position(table, column)?;
    let edited = table.row(row).ok_or(CellError::UnknownRow(row))?;
    if !edited.selected {
        return Ok(Propagation::Skipped);
    }

    let value = edited.values[idx].clone();
    let mut rows = Vec::new();
    for target in table.rows.values_mut().filter(|r| r.selected) {
        target.set_value(idx, &value);
        rows.push(target.key);
    }
    debug!(
        "propagated {column} = {value:?} from {row} to {} rows",
        rows.len()
    );
    Ok(Propagation::Applied { value, rows })
}
