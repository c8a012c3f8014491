#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Generic read-side projection for REST collections.
//!
//! Given any resource type that declares its fields through
//! [`Resource::field_table`], this crate validates `fields` / `orderBy`
//! query parameters, sorts and pages an in-memory collection, shapes each
//! item down to the requested fields and renders hypermedia links.

pub mod errors;
pub mod fields;
pub mod limits;
pub mod links;
pub mod order;
pub mod page;
pub mod problem_mapping;
pub mod query;
pub mod schema;

pub use fields::{FieldSelection, LINKS_KEY, ShapedResource, shape, shape_all, type_has_fields};
pub use limits::QueryLimits;
pub use links::{
    Affordance, CollectionState, Link, LinkBuilder, LinkTarget, LinkedResource, Method,
    ResourceUriType, rel,
};
pub use order::{OrderBy, OrderKey, SortDir, SortPlan, apply_sort};
pub use page::{PageRequest, PagedResult, PaginationMetadata, paginate};
pub use query::{ListParams, ListQuery};
pub use schema::{Accessor, Field, FieldKind, FieldTable, FieldValue, Resource};

/// Everything a list or item query can be rejected for.
///
/// All variants except `InvalidBaseUrl` are caused by client input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown field in fields: {0}")]
    InvalidField(String),

    #[error("unknown field in orderBy: {0}")]
    InvalidOrderByField(String),

    #[error("field cannot be used in orderBy: {0}")]
    UnsortableField(String),

    #[error("too many orderBy fields (max {max})")]
    TooManyOrderByFields { max: usize },

    #[error("{parameter} is too long (max {max} characters)")]
    QueryTooLong { parameter: &'static str, max: usize },

    #[error("malformed query string: {0}")]
    InvalidQuery(String),

    // Configuration error, not client input
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl Error {
    /// Query parameter the error refers to, if any.
    #[must_use]
    pub fn parameter(&self) -> Option<&'static str> {
        match self {
            Self::InvalidField(_) => Some("fields"),
            Self::InvalidOrderByField(_)
            | Self::UnsortableField(_)
            | Self::TooManyOrderByFields { .. } => Some("orderBy"),
            Self::QueryTooLong { parameter, .. } => Some(*parameter),
            Self::InvalidQuery(_) | Self::InvalidBaseUrl(_) => None,
        }
    }
}
