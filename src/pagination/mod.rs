//! Pagination module
//!
//! Page-number pagination over any [`Query`](crate::query::Query) source.
//!
//! # Overview
//!
//! - [`build_envelope`] computes page count and next/previous navigation
//!   from a total count and the page contents.
//! - [`paginate`] derives the skip/limit [`Window`] from a [`PageRequest`],
//!   runs `count` then `materialize` on the windowed query, and builds the
//!   envelope.

mod envelope;
mod paginator;
mod types;

pub use envelope::{build_envelope, page_count};
pub use paginator::{paginate, paginate_with_callback};
pub use types::{Page, PageNumber, PageParam, PageRequest, Window};
