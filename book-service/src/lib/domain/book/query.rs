//! Book listing parameters.
//!
//! Raw filter/sort values arrive straight from the query string and are turned
//! into bounded, defaulted [`NormalizedParams`] before the document store is
//! queried. Normalization never fails: anything unrecognised falls back to a
//! default.
//!
//! ```
//! use book_service::book::query::{normalize, BookFilter, BookSort, SortField};
//!
//! let params = normalize(
//!     &BookFilter::default(),
//!     &BookSort {
//!         sort_field: "bogus".to_string(),
//!         direction: "bogus".to_string(),
//!         limit: 500,
//!         offset: 0,
//!     },
//! );
//! assert_eq!(params.limit, 100);
//! assert_eq!(params.sort_field, SortField::Title);
//! assert_eq!(params.direction.sign(), 1);
//! ```

use serde::Serialize;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Which books to consider.
///
/// An empty `email` means the public listing across every owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub email: String,
    pub search: String,
}

impl BookFilter {
    pub fn new(email: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            search: search.into(),
        }
    }
}

/// Raw ordering and paging values as requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookSort {
    pub sort_field: String,
    pub direction: String,
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Title,
    Date,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::Date => "date",
        }
    }

    fn parse(raw: &str) -> Self {
        match raw {
            "date" => SortField::Date,
            _ => SortField::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// `1` for ascending, `-1` for descending.
    pub fn sign(&self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }

    fn parse(raw: &str) -> Self {
        match raw {
            "desc" => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

/// Validated listing parameters handed to the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedParams {
    pub email: String,
    pub search: String,
    pub sort_field: SortField,
    pub direction: SortDirection,
    pub limit: i64,
    pub offset: i64,
}

impl NormalizedParams {
    /// Whether the listing covers every owner rather than one user.
    pub fn is_public(&self) -> bool {
        self.email.is_empty()
    }
}

/// Normalize raw listing parameters.
///
/// Each rule is applied independently:
/// - `sort_field` outside {"title", "date"} becomes "title"
/// - `direction` outside {"asc", "desc"} becomes ascending
/// - `limit` above 100 becomes 100, `limit` of 0 or below becomes 10
/// - `offset`, `email` and `search` pass through unchanged
pub fn normalize(filter: &BookFilter, sort: &BookSort) -> NormalizedParams {
    let mut limit = sort.limit;
    if limit > MAX_LIMIT {
        limit = MAX_LIMIT;
    }
    if limit <= 0 {
        limit = DEFAULT_LIMIT;
    }

    NormalizedParams {
        email: filter.email.clone(),
        search: filter.search.clone(),
        sort_field: SortField::parse(&sort.sort_field),
        direction: SortDirection::parse(&sort.direction),
        limit,
        offset: sort.offset,
    }
}
