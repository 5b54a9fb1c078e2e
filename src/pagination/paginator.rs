//! Paged query execution
//!
//! Applies the request window to a query, counts, fetches, and wraps the
//! result in a [`Page`].

use crate::error::Result;
use crate::pagination::envelope::build_envelope;
use crate::pagination::types::{Page, PageRequest, Window};
use crate::query::Query;

/// Run one page of `query`
///
/// The count completes before the fetch is started. Either failure is
/// returned as-is and stops the call; a failed count never triggers a fetch.
///
/// The window is computed from the parsed request while the envelope echoes
/// the request exactly as given.
pub async fn paginate<Q: Query>(query: Q, request: &PageRequest) -> Result<Page<Q::Item>> {
    let window = Window::from_request(request);
    tracing::debug!(
        page = %request.page,
        limit = %request.limit,
        skip = ?window.skip,
        "Applying page window"
    );

    let windowed = window.apply(query);

    let item_count = windowed.count().await.inspect_err(|e| {
        tracing::debug!("Count failed: {e}");
    })?;

    let items = windowed.materialize().await.inspect_err(|e| {
        tracing::debug!("Fetch failed after count of {item_count}: {e}");
    })?;

    tracing::debug!(item_count, fetched = items.len(), "Page fetched");

    Ok(build_envelope(item_count, items, request))
}

/// Run one page of `query` and hand the outcome to `callback`
///
/// The callback is invoked exactly once, with either the envelope or the
/// first error encountered.
pub async fn paginate_with_callback<Q, F>(query: Q, request: &PageRequest, callback: F)
where
    Q: Query,
    F: FnOnce(Result<Page<Q::Item>>),
{
    callback(paginate(query, request).await);
}
