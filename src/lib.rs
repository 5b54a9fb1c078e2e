//! # query-paginate
//!
//! Page-number pagination over skip/limit query sources.
//!
//! Given a page request (`page`, `limit`) and a [`Query`](query::Query),
//! [`paginate`](pagination::paginate) windows the query, counts the total
//! matches, fetches the page and returns a [`Page`](pagination::Page)
//! envelope with page count and next/previous navigation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use query_paginate::{paginate, PageRequest, VecQuery};
//!
//! #[tokio::main]
//! async fn main() -> query_paginate::Result<()> {
//!     let query = VecQuery::new((1..=8).collect::<Vec<i32>>());
//!     let page = paginate(query, &PageRequest::new(1, 3)).await?;
//!
//!     assert_eq!(page.items, vec![1, 2, 3]);
//!     assert_eq!(page.page_count.as_i64(), Some(3));
//!     assert!(page.has_next);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │ paginate(query, request)                              │
//! │   window → skip/limit → count → materialize → build   │
//! └───────────────────────────────────────────────────────┘
//!                            │
//!          ┌─────────────────┴─────────────────┐
//!          │            Query trait            │
//!          ├─────────────────┬─────────────────┤
//!          │ VecQuery        │ TableQuery      │
//!          │ (in-memory)     │ (DuckDB)        │
//!          └─────────────────┴─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Page windows, envelopes and paged query execution
pub mod pagination;

/// Query source trait and in-memory source
pub mod query;

/// DuckDB query source
pub mod database;

/// YAML loader for source definitions
pub mod loader;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use pagination::{build_envelope, paginate, Page, PageNumber, PageParam, PageRequest};
pub use query::{Query, VecQuery};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
