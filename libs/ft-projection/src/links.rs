//! Hypermedia links.
//!
//! A [`LinkBuilder`] owns the API base address and renders absolute hrefs.
//! Resource kinds describe their own addresses and mutation affordances
//! through [`LinkedResource`]; collections get `self` plus `next-page` /
//! `previous-page` links derived from a [`PagedResult`].

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::page::{PageRequest, PagedResult};
use crate::schema::Resource;
use crate::Error;

/// Relation names shared by every resource kind.
pub mod rel {
    pub const SELF: &str = "self";
    pub const NEXT_PAGE: &str = "next-page";
    pub const PREVIOUS_PAGE: &str = "previous-page";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(href, rel, method)` triple describing a valid next request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub method: Method,
}

impl Link {
    #[must_use]
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: Method) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method,
        }
    }
}

/// What an affordance points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// The resource's own address.
    Item,
    /// The owning collection.
    Collection,
}

/// A mutation a resource kind advertises next to its `self` link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Affordance {
    pub rel: &'static str,
    pub method: Method,
    pub target: LinkTarget,
}

impl Affordance {
    #[must_use]
    pub const fn item(rel: &'static str, method: Method) -> Self {
        Self {
            rel,
            method,
            target: LinkTarget::Item,
        }
    }

    #[must_use]
    pub const fn collection(rel: &'static str, method: Method) -> Self {
        Self {
            rel,
            method,
            target: LinkTarget::Collection,
        }
    }
}

/// A resource kind with a stable address and a fixed set of affordances.
pub trait LinkedResource: Resource {
    /// Path segments of the owning collection, relative to the API base.
    const COLLECTION: &'static [&'static str];

    /// Affordances emitted after `self`, in this order.
    const AFFORDANCES: &'static [Affordance];

    /// Opaque identity rendered as the last path segment.
    fn identity(&self) -> String;
}

/// Which page of a collection a link should address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceUriType {
    Current,
    NextPage,
    PreviousPage,
}

/// Request-scoped parameters a collection link must reproduce.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectionState<'a> {
    pub fields: Option<&'a str>,
    pub order_by: Option<&'a str>,
    pub page: PageRequest,
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.trim().is_empty())
}

/// Renders absolute hrefs under a fixed API base address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkBuilder {
    base: Url,
}

impl LinkBuilder {
    /// # Errors
    /// Returns `Error::InvalidBaseUrl` if `base_url` does not parse or cannot
    /// carry path segments (e.g. `mailto:`).
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let mut base =
            Url::parse(base_url).map_err(|e| Error::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidBaseUrl(format!(
                "{base_url}: cannot carry a path"
            )));
        }
        base.set_query(None);
        base.set_fragment(None);
        Ok(Self { base })
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Absolute href for `segments` below the base, with `query` pairs in order.
    #[must_use]
    pub fn href<S: AsRef<str>>(&self, segments: &[S], query: &[(&str, String)]) -> String {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(segments.iter().map(AsRef::as_ref));
        }
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        url.into()
    }

    #[must_use]
    pub fn link<S: AsRef<str>>(&self, segments: &[S], rel: &str, method: Method) -> Link {
        Link::new(self.href(segments, &[]), rel, method)
    }

    /// Address of one resource, optionally reproducing a field selection.
    #[must_use]
    pub fn item_href<R: LinkedResource>(&self, identity: &str, fields: Option<&str>) -> String {
        let mut segments: Vec<&str> = R::COLLECTION.to_vec();
        segments.push(identity);
        let query: Vec<(&str, String)> = non_blank(fields)
            .into_iter()
            .map(|f| ("fields", f.to_owned()))
            .collect();
        self.href(&segments, &query)
    }

    /// `self` followed by the kind's affordances.
    ///
    /// `fields` is the caller's selection; only the `self` link carries it,
    /// so following it returns the same shape.
    #[must_use]
    pub fn resource_links<R: LinkedResource>(&self, resource: &R, fields: Option<&str>) -> Vec<Link> {
        let identity = resource.identity();
        let mut links = Vec::with_capacity(R::AFFORDANCES.len() + 1);
        links.push(Link::new(
            self.item_href::<R>(&identity, fields),
            rel::SELF,
            Method::Get,
        ));
        for affordance in R::AFFORDANCES {
            let href = match affordance.target {
                LinkTarget::Item => self.item_href::<R>(&identity, None),
                LinkTarget::Collection => self.href(R::COLLECTION, &[]),
            };
            links.push(Link::new(href, affordance.rel, affordance.method));
        }
        links
    }

    /// Address of a collection page, reproducing the current selection,
    /// sort and page size.
    #[must_use]
    pub fn collection_uri<S: AsRef<str>>(
        &self,
        segments: &[S],
        state: &CollectionState<'_>,
        kind: ResourceUriType,
    ) -> String {
        let page = match kind {
            ResourceUriType::Current => state.page,
            ResourceUriType::NextPage => state.page.next(),
            ResourceUriType::PreviousPage => state.page.previous(),
        };
        let mut query = Vec::with_capacity(4);
        if let Some(fields) = non_blank(state.fields) {
            query.push(("fields", fields.to_owned()));
        }
        if let Some(order_by) = non_blank(state.order_by) {
            query.push(("orderBy", order_by.to_owned()));
        }
        query.push(("pageNumber", page.page_number().to_string()));
        query.push(("pageSize", page.page_size().to_string()));
        self.href(segments, &query)
    }

    /// `self`, then `next-page` if there is one, then `previous-page` if
    /// there is one.
    #[must_use]
    pub fn collection_links<S: AsRef<str>, T>(
        &self,
        segments: &[S],
        state: &CollectionState<'_>,
        paged: &PagedResult<T>,
    ) -> Vec<Link> {
        let mut links = vec![Link::new(
            self.collection_uri(segments, state, ResourceUriType::Current),
            rel::SELF,
            Method::Get,
        )];
        if paged.has_next() {
            links.push(Link::new(
                self.collection_uri(segments, state, ResourceUriType::NextPage),
                rel::NEXT_PAGE,
                Method::Get,
            ));
        }
        if paged.has_previous() {
            links.push(Link::new(
                self.collection_uri(segments, state, ResourceUriType::PreviousPage),
                rel::PREVIOUS_PAGE,
                Method::Get,
            ));
        }
        links
    }
}
