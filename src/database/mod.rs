//! Database query source via DuckDB
//!
//! Tables and SQL statements on a DuckDB database (file or in-memory),
//! exposed as pageable [`Query`](crate::query::Query) sources.

mod engine;

pub use engine::{DatabaseEngine, TableQuery, IN_MEMORY};
