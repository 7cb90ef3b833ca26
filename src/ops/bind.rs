use log::trace;
use serde::Serialize;

use crate::model::config::TableConfig;
use crate::model::table::{ColumnKey, ColumnKind, RowKey, Table};
use crate::ops::cell::{CellError, set_cell};
use crate::ops::propagate::{Propagation, on_edit};
use crate::ops::selection::{select_all_toggle, selected_keys, toggle_row};

/// The interaction that commits a column's value for propagation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// Every keystroke
    Keystroke,
    /// Focus loss or a picked value
    Commit,
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::Keystroke => f.write_str("keystroke"),
            Trigger::Commit => f.write_str("commit"),
        }
    }
}

/// How one editable column is wired
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub column: ColumnKey,
    pub kind: ColumnKind,
    pub trigger: Trigger,
    /// Whether editing opens the calendar picker
    pub picker: bool,
}

/// Something the user did to the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The cell's text changed by one keystroke
    Input {
        row: RowKey,
        column: ColumnKey,
        value: String,
    },
    /// The cell lost focus or received a picked value
    Commit {
        row: RowKey,
        column: ColumnKey,
        value: String,
    },
    /// The master checkbox changed to the given state
    MasterToggled(bool),
    /// A row checkbox was clicked
    RowToggled(RowKey),
}

impl EditorEvent {
    fn trigger(&self) -> Option<Trigger> {
        match self {
            EditorEvent::Input { .. } => Some(Trigger::Keystroke),
            EditorEvent::Commit { .. } => Some(Trigger::Commit),
            _ => None,
        }
    }
}

/// What a dispatched event did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Outcome {
    /// The value was written to its own cell only; the column waits for its trigger
    Stored,
    /// The column's trigger fired and propagation ran
    Edited { propagation: Propagation },
    /// Checkbox state changed; `selected` is the number of checked rows after it
    Selection { selected: usize },
}

/// Wires columns to triggers and routes events to the editor operations.
///
/// Built once after the table is loaded. Date columns commit on focus loss and
/// get a calendar picker; other columns fan out on every keystroke.
#[derive(Debug, Clone)]
pub struct Binder {
    bindings: Vec<Binding>,
}

impl Binder {
    pub fn bind(table: &Table) -> Self {
        Self::bind_with(table, Trigger::Keystroke)
    }

    /// Bind according to `propagate_on_keystroke`
    pub fn from_config(table: &Table, config: &TableConfig) -> Self {
        let text_trigger = if config.propagate_on_keystroke {
            Trigger::Keystroke
        } else {
            Trigger::Commit
        };
        Self::bind_with(table, text_trigger)
    }

    /// Bind with an explicit trigger for text columns
    pub fn bind_with(table: &Table, text_trigger: Trigger) -> Self {
        let bindings = table
            .columns
            .values()
            .map(|column| {
                let (trigger, picker) = match column.kind {
                    ColumnKind::Date => (Trigger::Commit, true),
                    ColumnKind::Text => (text_trigger, false),
                };
                Binding {
                    column: column.key.clone(),
                    kind: column.kind,
                    trigger,
                    picker,
                }
            })
            .collect();
        Binder { bindings }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn binding(&self, column: &ColumnKey) -> Option<&Binding> {
        self.bindings.iter().find(|b| &b.column == column)
    }

    /// Build the event that commits `value` for this column's trigger
    pub fn edit_event(
        &self,
        row: RowKey,
        column: &ColumnKey,
        value: impl Into<String>,
    ) -> Result<EditorEvent, CellError> {
        let binding = self
            .binding(column)
            .ok_or_else(|| CellError::UnknownColumn(column.clone()))?;
        let column = column.clone();
        let value = value.into();
        Ok(match binding.trigger {
            Trigger::Keystroke => EditorEvent::Input { row, column, value },
            Trigger::Commit => EditorEvent::Commit { row, column, value },
        })
    }

    /// Apply one event to the table.
    ///
    /// An addressing error is reported before anything is written.
    pub fn dispatch(&self, table: &mut Table, event: EditorEvent) -> Result<Outcome, CellError> {
        trace!("dispatch {event:?}");
        let fired = event.trigger();
        match event {
            EditorEvent::Input { row, column, value } | EditorEvent::Commit { row, column, value } => {
                let binding = self
                    .binding(&column)
                    .ok_or_else(|| CellError::UnknownColumn(column.clone()))?;
                let bound = binding.trigger;
                set_cell(table, row, &column, &value)?;
                if fired == Some(bound) {
                    let propagation = on_edit(table, row, &column)?;
                    Ok(Outcome::Edited { propagation })
                } else {
                    Ok(Outcome::Stored)
                }
            }
            EditorEvent::MasterToggled(checked) => {
                table.set_select_all(checked);
                select_all_toggle(table);
                Ok(Outcome::Selection {
                    selected: selected_keys(table).len(),
                })
            }
            EditorEvent::RowToggled(row) => {
                toggle_row(table, row);
                Ok(Outcome::Selection {
                    selected: selected_keys(table).len(),
                })
            }
        }
    }
}
