//! CLI module
//!
//! Command-line interface for paging through DuckDB sources.
//!
//! # Commands
//!
//! - `page` - Fetch one page and print its envelope
//! - `count` - Print the total number of items
//! - `tables` - List tables in the database

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
