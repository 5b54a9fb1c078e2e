//! Query sources
//!
//! The [`Query`] trait is the capability set pagination needs from a data
//! source: chained `skip`/`limit` configuration and two async terminal
//! operations. Implementations:
//!
//! - [`VecQuery`] - in-memory items
//! - [`crate::database::TableQuery`] - DuckDB table or SQL query

mod memory;

pub use memory::VecQuery;

use crate::error::Result;
use async_trait::async_trait;

/// A lazily executed query that can be windowed and run
///
/// `skip` and `limit` consume the query and return the configured one;
/// whether that is the same instance is up to the implementation.
#[async_trait]
pub trait Query: Send + Sync + Sized {
    /// Item produced by [`materialize`](Query::materialize)
    type Item: Send;

    /// Skip the first `n` matching items
    #[must_use]
    fn skip(self, n: i64) -> Self;

    /// Return at most `n` items
    #[must_use]
    fn limit(self, n: i64) -> Self;

    /// Total number of matching items, ignoring skip and limit
    async fn count(&self) -> Result<u64>;

    /// Fetch the items inside the configured window
    async fn materialize(&self) -> Result<Vec<Self::Item>>;
}

/// Effective offset/limit after normalising raw skip/limit values
///
/// Follows document-store cursor rules: a negative skip starts from the
/// beginning, a zero limit means unlimited and a negative limit uses its
/// absolute value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Slice {
    /// Items to skip
    pub offset: u64,
    /// Maximum items to return, `None` for unlimited
    pub limit: Option<u64>,
}

impl Slice {
    /// Normalise raw skip/limit values
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            offset: u64::try_from(skip).unwrap_or(0),
            limit: match limit {
                0 => None,
                n => Some(n.unsigned_abs()),
            },
        }
    }
}
