use crate::model::table::{ColumnKey, RowKey, Table};

/// Error type for cell addressing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CellError {
    #[error("row not found: {0}")]
    UnknownRow(RowKey),
    #[error("column not found: {0}")]
    UnknownColumn(ColumnKey),
    #[error("a table cell cannot hold a line break")]
    LineBreak,
}

/// Resolve a column key to its position, or fail
pub(crate) fn column_position(table: &Table, column: &ColumnKey) -> Result<usize, CellError> {
    table
        .column_index(column)
        .ok_or_else(|| CellError::UnknownColumn(column.clone()))
}

/// Current value of a cell
pub fn get_cell<'a>(table: &'a Table, row: RowKey, column: &ColumnKey) -> Result<&'a str, CellError> {
    let idx = column_position(table, column)?;
    let row = table.row(row).ok_or(CellError::UnknownRow(row))?;
    Ok(row.values[idx].as_str())
}

/// Write a value into a cell.
///
/// Surrounding whitespace is dropped, since a pipe table cannot keep it.
pub fn set_cell(
    table: &mut Table,
    row: RowKey,
    column: &ColumnKey,
    value: &str,
) -> Result<(), CellError> {
    let idx = column_position(table, column)?;
    let value = value.trim();
    if value.contains(['\n', '\r']) {
        return Err(CellError::LineBreak);
    }
    let row = table.row_mut(row).ok_or(CellError::UnknownRow(row))?;
    row.set_value(idx, value);
    Ok(())
}
