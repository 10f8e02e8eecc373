//! Page/limit pagination primitives shared by list endpoints.
//!
//! The backend exposes offset-paginated collections with a
//! `{ data, page, limit, total }` envelope. This crate owns the two
//! building blocks of that contract so every endpoint agrees on defaults
//! and arithmetic:
//!
//! - [`PageRequest`]: a validated page/limit pair. Pages are 1-based and
//!   both values must be at least one; absent values fall back to
//!   [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`].
//! - [`Page`]: the response envelope. `total` counts every record that
//!   matched the query before pagination was applied, so consumers can
//!   derive the page count without a second round trip.
//!
//! Transport concerns (query-string parsing, error mapping) stay in the
//! adapter crates; this crate never sees a request.

use serde::{Deserialize, Serialize};

/// Page used when a request does not name one.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when a request does not name one.
pub const DEFAULT_LIMIT: u64 = 10;

/// Validation failures for pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum PaginationError {
    /// The page number was zero; pages are 1-based.
    #[error("page must be at least 1")]
    PageOutOfRange,
    /// The page size was zero.
    #[error("limit must be at least 1")]
    LimitOutOfRange,
}

/// A validated page/limit pair.
///
/// ## Invariants
/// - `page >= 1` and `limit >= 1`; both are enforced at construction so
///   [`PageRequest::offset`] can never underflow.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 25)?;
/// assert_eq!(request.offset(), 50);
/// # Ok::<(), pagination::PaginationError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Validate and construct a request from explicit values.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when either value is zero.
    pub const fn new(page: u64, limit: u64) -> Result<Self, PaginationError> {
        if page == 0 {
            return Err(PaginationError::PageOutOfRange);
        }
        if limit == 0 {
            return Err(PaginationError::LimitOutOfRange);
        }
        Ok(Self { page, limit })
    }

    /// Construct a request from optional values, applying the defaults
    /// for whichever side is absent.
    ///
    /// # Errors
    /// Returns [`PaginationError`] when a supplied value is zero; the
    /// defaults themselves always validate.
    pub fn from_optional(page: Option<u64>, limit: Option<u64>) -> Result<Self, PaginationError> {
        Self::new(page.unwrap_or(DEFAULT_PAGE), limit.unwrap_or(DEFAULT_LIMIT))
    }

    /// The request built purely from defaults (`page = 1`, `limit = 10`).
    #[must_use]
    pub const fn defaults() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(self) -> u64 {
        self.page
    }

    /// Maximum number of records in the page.
    #[must_use]
    pub const fn limit(self) -> u64 {
        self.limit
    }

    /// Number of records that precede this page.
    ///
    /// Saturates instead of overflowing for absurd page numbers; a
    /// saturated offset is past the end of any real collection and yields
    /// an empty page, which is the documented beyond-the-end behaviour.
    #[must_use]
    pub const fn offset(self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Offset-paginated response envelope.
///
/// `total` is the number of records matching the query across every
/// page, not the length of `data`.
///
/// # Examples
/// ```
/// use pagination::{Page, PageRequest};
///
/// let page: Page<i32> = Page::empty(PageRequest::defaults());
/// assert_eq!(page.total, 0);
/// assert_eq!(page.limit, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records belonging to the requested page, in query order.
    pub data: Vec<T>,
    /// 1-based page number that was requested.
    pub page: u64,
    /// Page size that was requested.
    pub limit: u64,
    /// Matching record count before pagination.
    pub total: u64,
}

impl<T> Page<T> {
    /// Assemble an envelope for `request` from a page of records and the
    /// unpaginated match count.
    #[must_use]
    pub const fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            page: request.page,
            limit: request.limit,
            total,
        }
    }

    /// Envelope for a query that matched nothing.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 10, Err(PaginationError::PageOutOfRange))]
    #[case(10, 0, Err(PaginationError::LimitOutOfRange))]
    #[case(0, 0, Err(PaginationError::PageOutOfRange))]
    #[case(1, 1, Ok(()))]
    fn new_validates_both_sides(
        #[case] page: u64,
        #[case] limit: u64,
        #[case] expected: Result<(), PaginationError>,
    ) {
        assert_eq!(PageRequest::new(page, limit).map(|_| ()), expected);
    }

    #[rstest]
    #[case(None, None, Ok((DEFAULT_PAGE, DEFAULT_LIMIT)))]
    #[case(Some(4), None, Ok((4, DEFAULT_LIMIT)))]
    #[case(None, Some(50), Ok((DEFAULT_PAGE, 50)))]
    #[case(Some(0), Some(50), Err(PaginationError::PageOutOfRange))]
    fn from_optional_applies_defaults(
        #[case] page: Option<u64>,
        #[case] limit: Option<u64>,
        #[case] expected: Result<(u64, u64), PaginationError>,
    ) {
        let observed = PageRequest::from_optional(page, limit).map(|r| (r.page(), r.limit()));
        assert_eq!(observed, expected);
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(2, 10, 10)]
    #[case(3, 25, 50)]
    #[case(u64::MAX, u64::MAX, u64::MAX)]
    fn offset_counts_preceding_records(#[case] page: u64, #[case] limit: u64, #[case] offset: u64) {
        assert_eq!(PageRequest::new(page, limit).map(PageRequest::offset), Ok(offset));
    }

    #[rstest]
    fn empty_envelope_echoes_the_request() {
        let envelope: Page<u8> = Page::empty(PageRequest::defaults());
        assert_eq!(
            envelope,
            Page {
                data: Vec::new(),
                page: 1,
                limit: 10,
                total: 0,
            }
        );
    }

    #[rstest]
    fn envelope_serialises_with_camel_case_fields() {
        let envelope = Page::new(vec!["a", "b"], PageRequest::defaults(), 12);
        let value = serde_json::to_value(&envelope).ok();
        assert_eq!(
            value,
            Some(serde_json::json!({
                "data": ["a", "b"],
                "page": 1,
                "limit": 10,
                "total": 12,
            }))
        );
    }

    #[rstest]
    fn total_is_independent_of_page_contents() {
        let request = match PageRequest::new(9, 10) {
            Ok(request) => request,
            Err(error) => panic!("request is valid: {error}"),
        };
        let envelope: Page<u8> = Page::new(Vec::new(), request, 42);
        assert_eq!(envelope.data.len(), 0);
        assert_eq!(envelope.total, 42);
    }
}
