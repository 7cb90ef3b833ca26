use log::debug;
use regex::Regex;

use crate::model::table::{ColumnKey, RowKey, Table};
use crate::ops::cell::{CellError, column_position};

/// Checkbox state of every data row, in document order
pub fn read_selection(table: &Table) -> Vec<bool> {
    table.rows.values().map(|r| r.selected).collect()
}

/// Whether a row is checked. Unknown rows read as unchecked.
pub fn is_selected(table: &Table, row: RowKey) -> bool {
    table.row(row).is_some_and(|r| r.selected)
}

/// Keys of the checked rows, in document order
pub fn selected_keys(table: &Table) -> Vec<RowKey> {
    table
        .rows
        .values()
        .filter(|r| r.selected)
        .map(|r| r.key)
        .collect()
}

/// Set every row's checkbox. Returns the number of rows that changed.
pub fn set_selection(table: &mut Table, checked: bool) -> usize {
    let changed = table
        .rows
        .values_mut()
        .map(|r| r.set_selected(checked))
        .filter(|&c| c)
        .count();
    debug!("set_selection({checked}): {changed} rows changed");
    changed
}

/// Apply the master checkbox to every row
pub fn select_all_toggle(table: &mut Table) -> usize {
    let checked = table.select_all;
    set_selection(table, checked)
}

/// Set one row's checkbox. Unknown rows are ignored.
pub fn set_row_selected(table: &mut Table, row: RowKey, checked: bool) -> bool {
    table
        .row_mut(row)
        .is_some_and(|r| r.set_selected(checked))
}

/// Flip one row's checkbox. Unknown rows are ignored.
pub fn toggle_row(table: &mut Table, row: RowKey) -> bool {
    match table.row_mut(row) {
        Some(r) => {
            let checked = !r.selected;
            r.set_selected(checked)
        }
        None => false,
    }
}

/// Check every row whose value in `column` matches `pattern`.
/// Rows already checked stay checked. Returns the number of matching rows.
pub fn select_matching(
    table: &mut Table,
    column: &ColumnKey,
    pattern: &Regex,
) -> Result<usize, CellError> {
    let idx = column_position(table, column)?;
    let mut matched = 0;
    for row in table.rows.values_mut() {
        if pattern.is_match(&row.values[idx]) {
            row.set_selected(true);
            matched += 1;
        }
    }
    debug!("select_matching({column}, /{pattern}/): {matched} rows");
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(selected: &[bool]) -> Table {
        let mut t = Table::with_columns(&["Name", "Site"]);
        for (i, &s) in selected.iter().enumerate() {
            t.push_row(s, vec![format!("IMG_{i}"), format!("Reef {i}")]);
        }
        t
    }

    #[test]
    fn read_selection_follows_document_order() {
        let t = table(&[true, false, true]);
        assert_eq!(read_selection(&t), vec![true, false, true]);
        assert_eq!(selected_keys(&t), vec![RowKey(0), RowKey(2)]);
    }

    #[test]
    fn unknown_row_reads_unchecked() {
        let t = table(&[true]);
        assert!(is_selected(&t, RowKey(0)));
        assert!(!is_selected(&t, RowKey(5)));
    }

    #[test]
    fn select_all_toggle_follows_master() {
        let mut t = table(&[true, false, false]);
        t.set_select_all(true);
        assert_eq!(select_all_toggle(&mut t), 2);
        assert_eq!(read_selection(&t), vec![true, true, true]);

        t.set_select_all(false);
        assert_eq!(select_all_toggle(&mut t), 3);
        assert_eq!(read_selection(&t), vec![false, false, false]);
    }

    #[test]
    fn select_all_toggle_on_empty_table() {
        let mut t = table(&[]);
        t.set_select_all(true);
        assert_eq!(select_all_toggle(&mut t), 0);
        assert!(read_selection(&t).is_empty());
    }

    #[test]
    fn toggle_and_set_single_rows() {
        let mut t = table(&[false, false]);
        assert!(toggle_row(&mut t, RowKey(1)));
        assert_eq!(read_selection(&t), vec![false, true]);
        assert!(toggle_row(&mut t, RowKey(1)));
        assert_eq!(read_selection(&t), vec![false, false]);

        assert!(set_row_selected(&mut t, RowKey(0), true));
        assert!(!set_row_selected(&mut t, RowKey(0), true));
        assert!(!toggle_row(&mut t, RowKey(42)));
        assert!(!set_row_selected(&mut t, RowKey(42), true));
        assert_eq!(read_selection(&t), vec![true, false]);
    }

    #[test]
    fn select_matching_adds_to_selection() {
        let mut t = table(&[true, false, false, false]);
        let re = Regex::new("^Reef [23]$").unwrap();
        let n = select_matching(&mut t, &ColumnKey::from("site"), &re).unwrap();
        assert_eq!(n, 2);
        assert_eq!(read_selection(&t), vec![true, false, true, true]);
    }

    #[test]
    fn select_matching_unknown_column() {
        let mut t = table(&[false]);
        let re = Regex::new(".").unwrap();
        let err = select_matching(&mut t, &ColumnKey::from("camera"), &re).unwrap_err();
        assert_eq!(err, CellError::UnknownColumn(ColumnKey::from("camera")));
        assert_eq!(read_selection(&t), vec![false]);
    }
}
