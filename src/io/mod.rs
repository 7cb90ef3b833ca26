pub mod config_io;
pub mod table_io;
