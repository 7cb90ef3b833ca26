use std::path::Path;

use regex::Regex;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::{config_io, table_io};
use crate::model::config::{EditorConfig, TableConfig};
use crate::model::table::{ColumnKey, RowKey, Table};
use crate::ops::{self, Binder, EditorEvent, Outcome, Propagation};
use crate::parse::serialize_table;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let cwd = std::env::current_dir()?;
    let config = config_io::load_config(cli.config.as_deref(), &cwd)?;

    match cli.command {
        // Read commands
        Commands::Show(args) => cmd_show(args, &config, json),
        Commands::Columns(args) => cmd_columns(args, &config, json),
        Commands::Selection(args) => cmd_selection(args, &config, json),
        Commands::Get(args) => cmd_get(args, &config, json),

        // Commands that print a new document
        Commands::Select(args) => cmd_select(args, &config, json),
        Commands::Set(args) => cmd_set(args, &config, json),
        Commands::Edit(args) => cmd_edit(args, &config, json),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the table and bind it
fn open(file: &Path, config: &EditorConfig) -> Result<(Table, Binder), table_io::LoadError> {
    let table = table_io::load_table(file, &config.table)?;
    let binder = Binder::from_config(&table, &config.table);
    Ok((table, binder))
}

/// Resolve a row argument: a 0-based index, else a value of the key column.
/// Surrounding whitespace is ignored either way.
pub fn resolve_row(table: &Table, config: &TableConfig, arg: &str) -> Result<RowKey, String> {
    let arg = arg.trim();
    if let Ok(index) = arg.parse::<usize>() {
        return table.row_key_at(index).ok_or_else(|| {
            format!(
                "row {} out of range (table has {} rows)",
                index,
                table.len()
            )
        });
    }

    let column = match &config.key_column {
        Some(name) => table
            .resolve_column(name)
            .ok_or_else(|| format!("key column not found: {}", name))?,
        None => table
            .column_key_at(0)
            .cloned()
            .ok_or_else(|| "table has no columns".to_string())?,
    };
    let idx = table
        .column_index(&column)
        .ok_or_else(|| format!("column not found: {}", column))?;
    table
        .rows
        .values()
        .find(|r| r.values[idx] == arg)
        .map(|r| r.key)
        .ok_or_else(|| format!("no row with {} = {:?}", column, arg))
}

fn resolve_column(table: &Table, arg: &str) -> Result<ColumnKey, String> {
    table
        .resolve_column(arg)
        .ok_or_else(|| format!("column not found: {}", arg))
}

fn row_index(table: &Table, key: RowKey) -> usize {
    table.row_index(key).unwrap_or_default()
}

/// Print the resulting document (or its JSON form) on stdout
fn emit_document(table: &Table, binder: &Binder, json: bool) -> CmdResult {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&table_to_json(table, binder))?
        );
    } else {
        print!("{}", serialize_table(table));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_show(args: FileArgs, config: &EditorConfig, json: bool) -> CmdResult {
    let (table, binder) = open(&args.file, config)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&table_to_json(&table, &binder))?
        );
        return Ok(());
    }
    if let Some(title) = table.title() {
        println!("{}", title);
        println!();
    }
    for line in format_grid(&table) {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_columns(args: FileArgs, config: &EditorConfig, json: bool) -> CmdResult {
    let (table, binder) = open(&args.file, config)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&columns_to_json(&table, &binder))?
        );
    } else {
        for line in format_columns(&binder) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_selection(args: FileArgs, config: &EditorConfig, json: bool) -> CmdResult {
    let (table, _) = open(&args.file, config)?;
    let selection = ops::read_selection(&table);
    if json {
        println!("{}", serde_json::to_string(&selection)?);
    } else {
        for checked in selection {
            println!("{}", checked);
        }
    }
    Ok(())
}

fn cmd_get(args: GetArgs, config: &EditorConfig, json: bool) -> CmdResult {
    let (table, _) = open(&args.file, config)?;
    let row = resolve_row(&table, &config.table, &args.row)?;
    let column = resolve_column(&table, &args.column)?;
    let value = ops::get_cell(&table, row, &column)?;
    if json {
        let cell = CellJson {
            row: row_index(&table, row),
            column: column.to_string(),
            value: value.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&cell)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands that print a new document
// ---------------------------------------------------------------------------

fn cmd_select(args: SelectArgs, config: &EditorConfig, json: bool) -> CmdResult {
    let (mut table, binder) = open(&args.file, config)?;

    if args.all {
        binder.dispatch(&mut table, EditorEvent::MasterToggled(true))?;
    }
    if args.none {
        binder.dispatch(&mut table, EditorEvent::MasterToggled(false))?;
    }
    if args.toggle_all {
        let checked = !table.select_all;
        binder.dispatch(&mut table, EditorEvent::MasterToggled(checked))?;
    }

    for arg in &args.rows {
        let row = resolve_row(&table, &config.table, arg)?;
        ops::set_row_selected(&mut table, row, true);
    }

    for arg in &args.matches {
        let (column, pattern) = arg
            .split_once('=')
            .ok_or_else(|| format!("expected COLUMN=REGEX, got {:?}", arg))?;
        let column = resolve_column(&table, column)?;
        let re = Regex::new(pattern)?;
        let matched = ops::select_matching(&mut table, &column, &re)?;
        log::info!("{} rows match {}", matched, arg);
    }

    emit_document(&table, &binder, json)
}

fn cmd_set(args: SetArgs, config: &EditorConfig, json: bool) -> CmdResult {
    let (mut table, binder) = open(&args.file, config)?;

    for arg in &args.select {
        let row = resolve_row(&table, &config.table, arg)?;
        ops::set_row_selected(&mut table, row, true);
    }

    let row = resolve_row(&table, &config.table, &args.row)?;
    let column = resolve_column(&table, &args.column)?;
    let event = binder.edit_event(row, &column, args.value.as_str())?;
    let outcome = binder.dispatch(&mut table, event)?;

    if let Outcome::Edited {
        propagation: propagation @ Propagation::Applied { .. },
    } = &outcome
    {
        log::info!(
            "{} copied to {} other rows",
            column,
            propagation.fanned_out()
        );
    }

    if json {
        let edit = EditJson {
            row: row_index(&table, row),
            column: column.to_string(),
            value: args.value,
            outcome,
        };
        println!("{}", serde_json::to_string_pretty(&edit)?);
        Ok(())
    } else {
        emit_document(&table, &binder, false)
    }
}

fn cmd_edit(args: FileArgs, config: &EditorConfig, json: bool) -> CmdResult {
    let (table, binder) = open(&args.file, config)?;
    match crate::tui::run(table, binder, config)? {
        Some(table) => {
            let binder = Binder::from_config(&table, &config.table);
            emit_document(&table, &binder, json)
        }
        None => {
            log::info!("edit aborted, nothing written");
            Ok(())
        }
    }
}
