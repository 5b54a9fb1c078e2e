//! Source definition types

use serde::{Deserialize, Serialize};

/// A named, pageable data source on a DuckDB database
///
/// Exactly one of `table` or `query` must be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SourceDefinition {
    /// Source name
    pub name: String,
    /// Database file path, or `:memory:`
    #[serde(default = "default_database")]
    pub database: String,
    /// Table name (schema.table format supported)
    #[serde(default)]
    pub table: Option<String>,
    /// Custom SQL query (alternative to table)
    #[serde(default)]
    pub query: Option<String>,
    /// ORDER BY expression for stable page contents
    #[serde(default)]
    pub order_by: Option<String>,
    /// SQL executed once after opening the database
    #[serde(default)]
    pub setup: Option<String>,
}

fn default_database() -> String {
    crate::database::IN_MEMORY.to_string()
}
