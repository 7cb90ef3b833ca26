use crate::model::table::{Row, Table};

/// Serialize a table back to Markdown.
///
/// Clean lines are emitted verbatim; the header and rows that changed since
/// parsing are emitted in canonical `| [x] | a | b |` form.
pub fn serialize_table(table: &Table) -> String {
    let mut lines: Vec<String> = table.preamble.clone();

    match &table.header_text {
        Some(text) if !table.header_dirty => lines.push(text.clone()),
        _ => lines.push(canonical_line(
            table.select_all,
            table.columns.values().map(|c| c.title.as_str()),
        )),
    }

    match &table.separator_text {
        Some(text) => lines.push(text.clone()),
        None => lines.push(format!("|{}", "-----|".repeat(table.columns.len() + 1))),
    }

    for row in table.rows.values() {
        lines.push(serialize_row(row));
    }

    lines.extend(table.trailer.iter().cloned());

    let eol = if table.crlf { "\r\n" } else { "\n" };
    let mut out = lines.join(eol);
    if table.trailing_newline {
        out.push_str(eol);
    }
    out
}

fn serialize_row(row: &Row) -> String {
    match &row.source_text {
        Some(text) if !row.dirty => text.clone(),
        _ => canonical_line(row.selected, row.values.iter().map(String::as_str)),
    }
}

/// The checkbox cell text
pub fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

fn canonical_line<'a>(checked: bool, cells: impl Iterator<Item = &'a str>) -> String {
    let mut out = format!("| {} |", checkbox(checked));
    for cell in cells {
        out.push(' ');
        out.push_str(&cell.replace('|', "\\|"));
        out.push_str(" |");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::table::RowKey;
    use crate::parse::parse_table;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    const SURVEY: &str = "\
# Reef survey

|  [ ]  | Name        | Site   | Date       |
|-------|-------------|--------|------------|
|  [x]  | IMG_001.jpg | Reef A | 2024-01-01 |
|  [ ]  | IMG_002.jpg | Reef B |            |
|  [x]  | IMG_003.jpg | Reef C |            |

Trailing notes.
";

    #[test]
    fn unmodified_table_is_byte_identical() {
        let table = parse_table(SURVEY).unwrap();
        assert_eq!(serialize_table(&table), SURVEY);
    }

    #[test]
    fn crlf_line_endings_are_preserved() {
        let source = "| [ ] | Name |\r\n|---|---|\r\n| [x] | a |\r\n";
        let mut table = parse_table(source).unwrap();
        assert!(table.crlf);
        assert_eq!(serialize_table(&table), source);

        table.set_select_all(true);
        assert_eq!(
            serialize_table(&table),
            "| [x] | Name |\r\n|---|---|\r\n| [x] | a |\r\n"
        );
    }

    #[test]
    fn missing_final_newline_is_preserved() {
        let source = "| [ ] | a |\n|---|---|\n| [x] | 1 |";
        let table = parse_table(source).unwrap();
        assert_eq!(serialize_table(&table), source);
    }

    #[test]
    fn only_changed_rows_are_rewritten() {
        let mut table = parse_table(SURVEY).unwrap();
        table.row_mut(RowKey(2)).unwrap().set_value(2, "2024-03-09");
        table.row_mut(RowKey(1)).unwrap().set_selected(true);

        assert_snapshot!(serialize_table(&table).trim_end(), @r"
        # Reef survey

        |  [ ]  | Name        | Site   | Date       |
        |-------|-------------|--------|------------|
        |  [x]  | IMG_001.jpg | Reef A | 2024-01-01 |
        | [x] | IMG_002.jpg | Reef B |  |
        | [x] | IMG_003.jpg | Reef C | 2024-03-09 |

        Trailing notes.
        ");
    }

    #[test]
    fn master_change_rewrites_header() {
        let mut table = parse_table(SURVEY).unwrap();
        table.set_select_all(true);
        let out = serialize_table(&table);
        assert!(out.contains("\n| [x] | Name | Site | Date |\n"));
        assert!(out.contains("|  [x]  | IMG_001.jpg |"));
    }

    #[test]
    fn pipes_in_values_are_escaped() {
        let mut table = Table::with_columns(&["Note"]);
        table.push_row(false, vec!["a|b".into()]);
        assert_snapshot!(serialize_table(&table).trim_end(), @r"
        | [ ] | Note |
        |-----|-----|
        | [ ] | a\|b |
        ");
        let reparsed = parse_table(&serialize_table(&table)).unwrap();
        assert_eq!(reparsed.row(RowKey(0)).unwrap().values, vec!["a|b"]);
    }
}
