pub mod config;
pub mod table;

pub use config::*;
pub use table::*;
