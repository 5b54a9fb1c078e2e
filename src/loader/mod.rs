//! YAML Loader module
//!
//! Parse source definitions from YAML files. A source names a DuckDB
//! database and the table or query to page through.

mod parser;
mod types;

pub use parser::{load_source, load_source_from_str};
pub use types::SourceDefinition;

#[cfg(test)]
mod tests;
