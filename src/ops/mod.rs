pub mod bind;
pub mod cell;
pub mod propagate;
pub mod selection;

pub use bind::{Binder, Binding, EditorEvent, Outcome, Trigger};
pub use cell::{CellError, get_cell, set_cell};
pub use propagate::{Propagation, on_edit};
pub use selection::{
    is_selected, read_selection, select_all_toggle, select_matching, selected_keys,
    set_row_selected, set_selection, toggle_row,
};
