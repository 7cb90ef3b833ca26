use indexmap::IndexMap;
use serde::Serialize;

use crate::model::table::{ColumnKind, RowKey, Table};
use crate::ops::bind::{Binder, Outcome, Trigger};
use crate::parse::table_serializer::checkbox;
use crate::util::unicode::display_width;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TableJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub select_all: bool,
    pub columns: Vec<ColumnJson>,
    pub rows: Vec<RowJson>,
}

#[derive(Serialize)]
pub struct ColumnJson {
    pub key: String,
    pub title: String,
    pub kind: ColumnKind,
    pub trigger: Trigger,
    pub picker: bool,
}

#[derive(Serialize)]
pub struct RowJson {
    pub index: usize,
    pub key: RowKey,
    pub selected: bool,
    pub values: IndexMap<String, String>,
}

#[derive(Serialize)]
pub struct CellJson {
    pub row: usize,
    pub column: String,
    pub value: String,
}

#[derive(Serialize)]
pub struct EditJson {
    pub row: usize,
    pub column: String,
    pub value: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn columns_to_json(table: &Table, binder: &Binder) -> Vec<ColumnJson> {
    binder
        .bindings()
        .iter()
        .map(|b| ColumnJson {
            key: b.column.to_string(),
            title: table
                .column(&b.column)
                .map(|c| c.title.clone())
                .unwrap_or_default(),
            kind: b.kind,
            trigger: b.trigger,
            picker: b.picker,
        })
        .collect()
}

pub fn table_to_json(table: &Table, binder: &Binder) -> TableJson {
    let rows = table
        .rows
        .values()
        .enumerate()
        .map(|(index, row)| RowJson {
            index,
            key: row.key,
            selected: row.selected,
            values: table
                .columns
                .keys()
                .zip(&row.values)
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        })
        .collect();

    TableJson {
        title: table.title().map(str::to_string),
        select_all: table.select_all,
        columns: columns_to_json(table, binder),
        rows,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Aligned plain-text grid: row index, checkbox, then every column
pub fn format_grid(table: &Table) -> Vec<String> {
    let index_width = table.len().saturating_sub(1).to_string().len();

    let mut widths: Vec<usize> = table
        .columns
        .values()
        .map(|c| display_width(&c.title))
        .collect();
    for row in table.rows.values() {
        for (w, value) in widths.iter_mut().zip(&row.values) {
            *w = (*w).max(display_width(value));
        }
    }

    let mut lines = Vec::with_capacity(table.len() + 1);
    lines.push(grid_line(
        &" ".repeat(index_width),
        table.select_all,
        table.columns.values().map(|c| c.title.as_str()),
        &widths,
    ));
    for (i, row) in table.rows.values().enumerate() {
        lines.push(grid_line(
            &format!("{:>index_width$}", i),
            row.selected,
            row.values.iter().map(String::as_str),
            &widths,
        ));
    }
    lines
}

fn grid_line<'a>(
    lead: &str,
    checked: bool,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> String {
    let mut out = format!("{}  {}", lead, checkbox(checked));
    for (cell, &w) in cells.zip(widths) {
        out.push_str("  ");
        out.push_str(cell);
        out.push_str(&" ".repeat(w.saturating_sub(display_width(cell))));
    }
    out.trim_end().to_string()
}

/// One line per editable column: key, kind, trigger
pub fn format_columns(binder: &Binder) -> Vec<String> {
    let key_width = binder
        .bindings()
        .iter()
        .map(|b| display_width(b.column.as_str()))
        .max()
        .unwrap_or(0);
    binder
        .bindings()
        .iter()
        .map(|b| {
            let kind = match b.kind {
                ColumnKind::Text => "text",
                ColumnKind::Date => "date",
            };
            let picker = if b.picker { " +picker" } else { "" };
            format!(
                "{:<key_width$}  {:<4}  {}{}",
                b.column.as_str(),
                kind,
                b.trigger,
                picker
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> Table {
        let mut t = Table::with_columns(&["Name", "Site", "Date"]);
        t.push_row(true, vec!["IMG_001.jpg".into(), "Reef A".into(), "".into()]);
        t.push_row(false, vec!["b.jpg".into(), "Lagoon".into(), "".into()]);
        t.columns[2].kind = ColumnKind::Date;
        t
    }

    #[test]
    fn grid_is_aligned() {
        let lines = format_grid(&table());
        assert_eq!(
            lines,
            vec![
                "   [ ]  Name         Site    Date",
                "0  [x]  IMG_001.jpg  Reef A",
                "1  [ ]  b.jpg        Lagoon",
            ]
        );
    }

    #[test]
    fn columns_listing() {
        let t = table();
        let lines = format_columns(&Binder::bind(&t));
        assert_eq!(
            lines,
            vec![
                "name  text  keystroke",
                "site  text  keystroke",
                "date  date  commit +picker",
            ]
        );
    }

    #[test]
    fn table_json_keeps_column_order() {
        let t = table();
        let json = serde_json::to_value(table_to_json(&t, &Binder::bind(&t))).unwrap();
        assert_eq!(json["select_all"], false);
        assert_eq!(json["rows"][0]["selected"], true);
        assert_eq!(json["rows"][1]["values"]["site"], "Lagoon");
        assert_eq!(json["columns"][2]["trigger"], "commit");
        assert_eq!(json["columns"][2]["kind"], "date");
        let keys: Vec<&String> = json["rows"][0]["values"]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(keys.len(), 3);
    }
}
