//! Page envelope construction
//!
//! Pure computation of page count and navigation fields from a total item
//! count and a request. Nothing here is validated: out-of-range pages and
//! odd limits flow through into the envelope as-is.

use crate::pagination::types::{Page, PageNumber, PageRequest};

/// Build a page envelope from an already-known count and page contents
///
/// `items` is not checked against the limit and `item_count` is trusted as
/// given. The request is echoed back unchanged; its values are coerced to
/// floating-point numbers only for the page count and navigation
/// comparisons. Any comparison involving NaN is false.
pub fn build_envelope<T>(item_count: u64, items: Vec<T>, request: &PageRequest) -> Page<T> {
    let page = request.page.as_number();
    let page_count = page_count(item_count, request.limit.as_number());

    let has_next = page < page_count.get();
    let has_previous = page > 1.0;

    Page {
        items,
        item_count,
        page: request.page.clone(),
        page_count,
        limit: request.limit.clone(),
        has_next,
        next: has_next.then(|| PageNumber::new(page + 1.0)),
        has_previous,
        previous: has_previous.then(|| PageNumber::new(page - 1.0)),
    }
}

/// Number of pages needed for `item_count` items at `limit` per page
///
/// Computed as `floor(count / limit)` plus one when a positive remainder is
/// left, so exact multiples add no trailing page. A zero limit gives
/// infinity (or NaN for an empty collection) and a NaN limit gives NaN.
pub fn page_count(item_count: u64, limit: f64) -> PageNumber {
    let count = item_count as f64;
    let extra = if count % limit > 0.0 { 1.0 } else { 0.0 };
    PageNumber::new((count / limit).floor() + extra)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_zero_limit() {
        assert_eq!(page_count(8, 0.0).get(), f64::INFINITY);
        assert!(page_count(0, 0.0).get().is_nan());
    }

    #[test]
    fn test_page_count_nan_limit() {
        assert!(page_count(8, f64::NAN).get().is_nan());
    }

    #[test]
    fn test_page_count_fractional_limit() {
        // floor(8 / 2.5) = 3, remainder 0.5 adds one page
        assert_eq!(page_count(8, 2.5), PageNumber::from(4));
        assert_eq!(page_count(5, 2.5), PageNumber::from(2));
    }

    #[test]
    fn test_page_count_negative_limit() {
        // floor(8 / -3) = -3, remainder 2 adds one page
        assert_eq!(page_count(8, -3.0), PageNumber::from(-2));
        assert_eq!(page_count(6, -3.0), PageNumber::from(-2));
    }

    #[test]
    fn test_page_count_infinite_limit() {
        assert_eq!(page_count(8, f64::INFINITY), PageNumber::from(1));
    }
}
