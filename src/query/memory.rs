//! In-memory query source

use crate::error::Result;
use crate::query::{Query, Slice};
use async_trait::async_trait;
use std::sync::Arc;

/// Query over an in-memory list of items
///
/// The backing list is shared, so windowed copies are cheap to create.
#[derive(Debug, Clone)]
pub struct VecQuery<T> {
    items: Arc<Vec<T>>,
    skip: i64,
    limit: i64,
}

impl<T> VecQuery<T> {
    /// Create a query over the given items
    pub fn new(items: Vec<T>) -> Self {
        Self::shared(Arc::new(items))
    }

    /// Create a query over an already shared list
    pub fn shared(items: Arc<Vec<T>>) -> Self {
        Self {
            items,
            skip: 0,
            limit: 0,
        }
    }

    /// The normalised window currently configured
    pub fn slice(&self) -> Slice {
        Slice::new(self.skip, self.limit)
    }
}

#[async_trait]
impl<T> Query for VecQuery<T>
where
    T: Clone + Send + Sync,
{
    type Item = T;

    fn skip(mut self, n: i64) -> Self {
        self.skip = n;
        self
    }

    fn limit(mut self, n: i64) -> Self {
        self.limit = n;
        self
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.items.len() as u64)
    }

    async fn materialize(&self) -> Result<Vec<T>> {
        let slice = self.slice();
        let offset = usize::try_from(slice.offset).unwrap_or(usize::MAX);
        let take = slice
            .limit
            .map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));

        Ok(self.items.iter().skip(offset).take(take).cloned().collect())
    }
}
