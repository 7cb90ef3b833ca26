use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mgrid", about = concat!("[x] metagrid v", env!("CARGO_PKG_VERSION"), " - check rows, type once"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: mgrid.toml in this or a parent directory)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the table
    Show(FileArgs),
    /// List editable columns and how they are bound
    Columns(FileArgs),
    /// Print each row's checkbox state
    Selection(FileArgs),
    /// Change checkboxes and print the resulting document
    Select(SelectArgs),
    /// Print one cell value
    Get(GetArgs),
    /// Set one cell, copy it to checked rows, and print the resulting document
    Set(SetArgs),
    /// Edit the table interactively, then print the resulting document
    Edit(FileArgs),
}

#[derive(Args)]
pub struct FileArgs {
    /// Markdown file holding the table (`-` for stdin)
    pub file: PathBuf,
}

#[derive(Args)]
pub struct SelectArgs {
    /// Markdown file holding the table (`-` for stdin)
    pub file: PathBuf,
    /// Check every row (and the header checkbox)
    #[arg(long, conflicts_with_all = ["none", "toggle_all"])]
    pub all: bool,
    /// Uncheck every row (and the header checkbox)
    #[arg(long, conflicts_with = "toggle_all")]
    pub none: bool,
    /// Flip the header checkbox and apply it to every row
    #[arg(long)]
    pub toggle_all: bool,
    /// Check these rows (indices or key-column values, comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub rows: Vec<String>,
    /// Check rows whose cell matches: COLUMN=REGEX
    #[arg(long = "match", value_name = "COLUMN=REGEX")]
    pub matches: Vec<String>,
}

#[derive(Args)]
pub struct GetArgs {
    /// Markdown file holding the table (`-` for stdin)
    pub file: PathBuf,
    /// Row index (0-based) or key-column value
    pub row: String,
    /// Column index (0-based) if numeric, else key or title
    pub column: String,
}

#[derive(Args)]
pub struct SetArgs {
    /// Markdown file holding the table (`-` for stdin)
    pub file: PathBuf,
    /// Row index (0-based) or key-column value
    pub row: String,
    /// Column index (0-based) if numeric, else key or title
    pub column: String,
    /// New value
    pub value: String,
    /// Check these rows first (indices or key-column values, comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,
}
