//! Caps applied to list queries before any work is done.
//!
//! - page size upper bound (requests above it are clamped, not rejected)
//! - maximum number of `orderBy` keys
//! - maximum length of the raw `fields` / `orderBy` parameters

use crate::page::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PageRequest};
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryLimits {
    /// Page size when the client sends none (default: 8)
    pub default_page_size: u32,
    /// Largest page a client can get (default: 8)
    pub max_page_size: u32,
    /// Maximum number of keys in `orderBy` (default: 8)
    pub max_orderby_fields: usize,
    /// Maximum length in bytes of `fields` and `orderBy` (default: 1000)
    pub max_query_length: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            max_orderby_fields: 8,
            max_query_length: 1000,
        }
    }
}

impl QueryLimits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page_sizes(mut self, default_page_size: u32, max_page_size: u32) -> Self {
        self.default_page_size = default_page_size;
        self.max_page_size = max_page_size;
        self
    }

    #[must_use]
    pub fn with_max_orderby_fields(mut self, max: usize) -> Self {
        self.max_orderby_fields = max;
        self
    }

    #[must_use]
    pub fn with_max_query_length(mut self, max: usize) -> Self {
        self.max_query_length = max;
        self
    }

    /// Build a page request from optional client values, filling defaults
    /// and clamping the size to `max_page_size`.
    #[must_use]
    pub fn page_request(&self, page_number: Option<u32>, page_size: Option<u32>) -> PageRequest {
        PageRequest::new(
            page_number.unwrap_or(1),
            page_size.unwrap_or(self.default_page_size),
            self.max_page_size,
        )
    }

    /// # Errors
    /// Returns `Error::TooManyOrderByFields` when `count` exceeds the cap.
    pub fn validate_orderby_count(&self, count: usize) -> Result<(), Error> {
        if count > self.max_orderby_fields {
            return Err(Error::TooManyOrderByFields {
                max: self.max_orderby_fields,
            });
        }
        Ok(())
    }

    /// # Errors
    /// Returns `Error::QueryTooLong` when `value` is longer than the cap.
    pub fn validate_length(&self, parameter: &'static str, value: Option<&str>) -> Result<(), Error> {
        match value {
            Some(v) if v.len() > self.max_query_length => Err(Error::QueryTooLong {
                parameter,
                max: self.max_query_length,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let limits = QueryLimits::default();
        assert_eq!(limits.default_page_size, 8);
        assert_eq!(limits.max_page_size, 8);
        assert_eq!(limits.max_orderby_fields, 8);
        assert_eq!(limits.max_query_length, 1000);
    }

    #[test]
    fn page_request_fills_and_clamps() {
        let limits = QueryLimits::default();
        let req = limits.page_request(None, None);
        assert_eq!((req.page_number(), req.page_size()), (1, 8));
        let req = limits.page_request(Some(3), Some(100));
        assert_eq!((req.page_number(), req.page_size()), (3, 8));
        let req = QueryLimits::new()
            .with_page_sizes(5, 20)
            .page_request(None, Some(12));
        assert_eq!(req.page_size(), 12);
    }

    #[test]
    fn orderby_count() {
        let limits = QueryLimits::new().with_max_orderby_fields(2);
        assert!(limits.validate_orderby_count(2).is_ok());
        assert_eq!(
            limits.validate_orderby_count(3),
            Err(Error::TooManyOrderByFields { max: 2 })
        );
    }

    #[test]
    fn parameter_length() {
        let limits = QueryLimits::new().with_max_query_length(4);
        assert!(limits.validate_length("fields", None).is_ok());
        assert!(limits.validate_length("fields", Some("name")).is_ok());
        assert_eq!(
            limits.validate_length("orderBy", Some("names")),
            Err(Error::QueryTooLong {
                parameter: "orderBy",
                max: 4
            })
        );
    }
}
