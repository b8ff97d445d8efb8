//! Command-line configuration.
//!
//! Every global option can also come from a `QUOTR_*` environment variable.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const DEFAULT_DB_FILE_NAME: &str = "quotr.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "quotr", version, about = "Track quotes from the books you read")]
pub struct Cli {
    /// SQLite catalog file; created and migrated on first use.
    #[arg(long, env = "QUOTR_DB", default_value = DEFAULT_DB_FILE_NAME, global = true)]
    pub db: PathBuf,

    /// Signed-in username. Required by every catalog command.
    #[arg(long, env = "QUOTR_USER", global = true)]
    pub user: Option<String>,

    /// trace|debug|info|warn|error. Defaults by build mode.
    #[arg(long, env = "QUOTR_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "QUOTR_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Print records as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new user.
    Register { username: String },
    /// Manage books.
    #[command(subcommand)]
    Books(BookCommand),
    /// Manage quotes.
    #[command(subcommand)]
    Quotes(QuoteCommand),
}

#[derive(Debug, Subcommand)]
pub enum BookCommand {
    /// List your books, most recently modified first.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show a book and the quotes attached to it.
    Show { id: i64 },
    Add(BookFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: BookFields,
    },
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct BookFields {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub author: String,
}

#[derive(Debug, Subcommand)]
pub enum QuoteCommand {
    /// List your quotes by recency, or by relevance with `--search`.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    Show { id: i64 },
    Add(QuoteFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: QuoteFields,
    },
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct QuoteFields {
    #[arg(long)]
    pub book: i64,
    #[arg(long)]
    pub text: String,
    /// Page number in the book.
    #[arg(long = "page-number")]
    pub page_number: Option<u32>,
}
