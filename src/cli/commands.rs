//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Page through DuckDB tables and queries
#[derive(Parser, Debug)]
#[command(name = "query-paginate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source definition file (YAML)
    #[arg(short, long, global = true)]
    pub source: Option<PathBuf>,

    /// DuckDB database file (overrides the source; default in-memory)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Table to page through (overrides the source)
    #[arg(short, long, global = true)]
    pub table: Option<String>,

    /// SQL query to page through (overrides the source)
    #[arg(short, long, global = true)]
    pub query: Option<String>,

    /// ORDER BY expression applied to fetched pages
    #[arg(long, global = true)]
    pub order_by: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one page and print its envelope
    Page {
        /// Page number (1-based)
        #[arg(short, long)]
        page: String,

        /// Items per page
        #[arg(short, long)]
        limit: String,
    },

    /// Print the total number of items
    Count,

    /// List tables in the database
    Tables,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line
    Json,
    /// Indented JSON
    Pretty,
}
