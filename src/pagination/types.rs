//! Pagination types
//!
//! Request values, the skip/limit window derived from them, and the page
//! envelope returned to callers.

use crate::query::Query;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Request Types
// ============================================================================

/// A raw page or limit value, kept in the form the caller supplied it
///
/// Query strings and CLI arguments arrive as text, programmatic callers
/// usually pass integers. Both are accepted and echoed back unchanged in
/// the [`Page`] envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageParam {
    /// Integer value
    Number(i64),
    /// Textual value, parsed on demand
    Text(String),
}

impl PageParam {
    /// Parse as a base-10 integer using prefix semantics
    ///
    /// Leading whitespace is skipped, an optional sign is honoured and the
    /// longest run of digits is used, so `"3abc"` yields 3. Returns `None`
    /// when no digits are present.
    pub fn parse_int(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => parse_int_prefix(text),
        }
    }

    /// Coerce the whole value to a number for comparisons
    ///
    /// Unlike [`parse_int`](Self::parse_int) trailing garbage is rejected and
    /// yields NaN. Blank text counts as 0; decimals, exponents, `0x` hex and
    /// `Infinity` are accepted.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Number(n) => *n as f64,
            Self::Text(text) => coerce_number(text),
        }
    }
}

impl fmt::Display for PageParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<i64> for PageParam {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for PageParam {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for PageParam {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for PageParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PageParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

fn parse_int_prefix(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }

    let digits: i64 = rest[..end].parse().ok()?;
    Some(if negative { -digits } else { digits })
}

fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    match trimmed {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return f64::NAN;
        }
        return u64::from_str_radix(hex, 16).map_or(f64::INFINITY, |n| n as f64);
    }

    // Only digits, sign, point and exponent; rejects "inf"/"nan" spellings
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}

/// A pagination request: 1-based page index and page size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Requested page (1-based)
    pub page: PageParam,
    /// Maximum items per page
    pub limit: PageParam,
}

impl PageRequest {
    /// Create a request from anything convertible to [`PageParam`]
    pub fn new(page: impl Into<PageParam>, limit: impl Into<PageParam>) -> Self {
        Self {
            page: page.into(),
            limit: limit.into(),
        }
    }
}

// ============================================================================
// Window
// ============================================================================

/// Skip/limit pair selecting one page of a query
///
/// A dimension is `None` when its input could not be parsed or the offset
/// arithmetic overflowed. Unset dimensions are not applied to the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    /// Number of leading items to skip
    pub skip: Option<i64>,
    /// Maximum number of items to return
    pub limit: Option<i64>,
}

impl Window {
    /// Derive the window for a request: `skip = (page - 1) * limit`
    pub fn from_request(request: &PageRequest) -> Self {
        let page = request.page.parse_int();
        let limit = request.limit.parse_int();
        let skip = page
            .zip(limit)
            .and_then(|(page, limit)| page.checked_sub(1)?.checked_mul(limit));

        Self { skip, limit }
    }

    /// Apply skip then limit, returning the windowed query
    pub fn apply<Q: Query>(self, query: Q) -> Q {
        let query = match self.skip {
            Some(n) => query.skip(n),
            None => query,
        };
        match self.limit {
            Some(n) => query.limit(n),
            None => query,
        }
    }
}

// ============================================================================
// Page Envelope
// ============================================================================

/// A computed page index or page count
///
/// Carries the full range of the arithmetic behind it: fractional values
/// from fractional requests, infinity from a zero limit and NaN from
/// non-numeric input. Serializes as an integer when whole, as a float when
/// fractional and as `null` when not finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PageNumber(f64);

impl PageNumber {
    /// Wrap a raw value
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// The raw value
    pub fn get(self) -> f64 {
        self.0
    }

    /// Whether the value is neither infinite nor NaN
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// The value as an integer, when it is a whole finite number in range
    pub fn as_i64(self) -> Option<i64> {
        (self.0.is_finite() && self.0.fract() == 0.0 && self.0.abs() < MAX_SAFE_INTEGER)
            .then(|| self.0 as i64)
    }
}

// Largest magnitude an f64 holds without losing integer precision
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            v if v == f64::INFINITY => write!(f, "Infinity"),
            v if v == f64::NEG_INFINITY => write!(f, "-Infinity"),
            v => write!(f, "{v}"),
        }
    }
}

impl Serialize for PageNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_i64() {
            Some(n) => serializer.serialize_i64(n),
            None if self.is_finite() => serializer.serialize_f64(self.0),
            None => serializer.serialize_none(),
        }
    }
}

impl From<i64> for PageNumber {
    fn from(value: i64) -> Self {
        Self(value as f64)
    }
}

impl From<i32> for PageNumber {
    fn from(value: i32) -> Self {
        Self(value.into())
    }
}

/// One page of results plus navigation metadata
///
/// `next` and `previous` are `None` when there is no such page and are left
/// out of the serialized form entirely. `page_count` is infinite for a zero
/// limit and NaN for a non-numeric one; both serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Total items across all pages
    pub item_count: u64,
    /// Requested page, as supplied
    pub page: PageParam,
    /// Total number of pages
    pub page_count: PageNumber,
    /// Page size, as supplied
    pub limit: PageParam,
    /// Whether a page after this one exists
    pub has_next: bool,
    /// Index of the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageNumber>,
    /// Whether a page before this one exists
    pub has_previous: bool,
    /// Index of the previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageNumber>,
}
