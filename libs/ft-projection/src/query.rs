//! The list pipeline: bind → validate → sort → paginate → shape → link.
//!
//! [`ListParams`] is the raw query-string binding. [`ListQuery`] is the same
//! request validated against one resource type; building it is the only
//! fallible step, and it happens before the candidate collection is fetched.

use std::fmt;

use serde::Deserialize;

use crate::fields::{FieldSelection, ShapedResource, shape};
use crate::limits::QueryLimits;
use crate::links::{CollectionState, LinkBuilder, LinkedResource};
use crate::order::{OrderBy, SortPlan};
use crate::page::{PageRequest, PagedResult, paginate};
use crate::schema::Resource;
use crate::Error;

/// Query parameters accepted by every collection endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListParams {
    pub fields: Option<String>,
    pub order_by: Option<String>,
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListParams {
    /// Bind from a raw query string (without the leading `?`).
    ///
    /// # Errors
    /// Returns `Error::InvalidQuery` when a value does not fit its type,
    /// e.g. `pageNumber=abc` or a negative page size.
    pub fn from_query(raw: &str) -> Result<Self, Error> {
        serde_urlencoded::from_str(raw).map_err(|e| Error::InvalidQuery(e.to_string()))
    }
}

/// A list request validated against resource type `R`.
#[must_use]
pub struct ListQuery<R> {
    fields_raw: Option<String>,
    order_by_raw: Option<String>,
    selection: FieldSelection,
    plan: SortPlan<R>,
    page: PageRequest,
}

impl<R: Resource> ListQuery<R> {
    /// Validate every parameter eagerly; nothing partial is ever produced.
    ///
    /// # Errors
    /// - `Error::QueryTooLong` if `fields` or `orderBy` exceed the length cap
    /// - `Error::InvalidField` for an unknown name in `fields`
    /// - `Error::TooManyOrderByFields`, `Error::InvalidOrderByField` or
    ///   `Error::UnsortableField` for a bad `orderBy`
    pub fn new(params: &ListParams, limits: &QueryLimits) -> Result<Self, Error> {
        limits.validate_length("fields", params.fields.as_deref())?;
        limits.validate_length("orderBy", params.order_by.as_deref())?;

        let selection = FieldSelection::parse(params.fields.as_deref());
        selection.validate_for::<R>()?;

        let order = OrderBy::parse(params.order_by.as_deref().unwrap_or_default());
        limits.validate_orderby_count(order.len())?;
        let plan = order.resolve::<R>()?;

        let page = limits.page_request(params.page_number, params.page_size);
        tracing::debug!(
            kind = R::KIND,
            fields = ?selection.names(),
            order = %order,
            page_number = page.page_number(),
            page_size = page.page_size(),
            "list query validated"
        );

        Ok(Self {
            fields_raw: params.fields.clone(),
            order_by_raw: params.order_by.clone(),
            selection,
            plan,
            page,
        })
    }

    #[must_use]
    pub fn selection(&self) -> &FieldSelection {
        &self.selection
    }

    #[must_use]
    pub fn page(&self) -> PageRequest {
        self.page
    }

    /// Sort the whole candidate collection, then cut out the requested page.
    pub fn run(&self, candidates: Vec<R>) -> PagedResult<R> {
        paginate(self.plan.apply(candidates), self.page)
    }

    #[must_use]
    pub fn shape(&self, resource: &R) -> ShapedResource {
        shape(resource, &self.selection)
    }

    /// Parameters collection links must carry to reproduce this request.
    #[must_use]
    pub fn state(&self) -> CollectionState<'_> {
        CollectionState {
            fields: self.fields_raw.as_deref(),
            order_by: self.order_by_raw.as_deref(),
            page: self.page,
        }
    }
}

impl<R: LinkedResource> ListQuery<R> {
    /// Shape every item of a page and append its own links.
    ///
    /// Item links are built from the resource itself, so they are correct
    /// even when the selection leaves out the identity field.
    #[must_use]
    pub fn shape_page_with_links(
        &self,
        page: &PagedResult<R>,
        links: &LinkBuilder,
    ) -> Vec<ShapedResource> {
        page.items()
            .iter()
            .map(|item| {
                self.shape(item)
                    .with_links(&links.resource_links(item, None))
            })
            .collect()
    }
}

impl<R> fmt::Debug for ListQuery<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListQuery")
            .field("selection", &self.selection)
            .field("plan", &self.plan)
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}
