pub mod table_parser;
pub mod table_serializer;

pub use table_parser::{ParseError, parse_table};
pub use table_serializer::serialize_table;
