//! Offset pagination over an already filtered and sorted collection.

use serde::{Deserialize, Serialize};

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// Upper bound on the page size unless configured otherwise.
pub const MAX_PAGE_SIZE: u32 = 8;

fn to_usize(v: u32) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}

/// A `(page number, page size)` pair, normalized on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request, raising `page_number` to at least 1 and clamping
    /// `page_size` into `1..=max_page_size`. Out-of-range values are
    /// corrected, never rejected.
    #[must_use]
    pub fn new(page_number: u32, page_size: u32, max_page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.clamp(1, max_page_size.max(1)),
        }
    }

    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items preceding this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        to_usize(self.page_number - 1).saturating_mul(to_usize(self.page_size))
    }

    #[must_use]
    pub fn next(&self) -> Self {
        Self {
            page_number: self.page_number.saturating_add(1),
            ..*self
        }
    }

    #[must_use]
    pub fn previous(&self) -> Self {
        Self {
            page_number: self.page_number.saturating_sub(1).max(1),
            ..*self
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

/// One page of items plus its position within the full collection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub struct PagedResult<T> {
    items: Vec<T>,
    total_count: usize,
    page_size: u32,
    current_page: u32,
    total_pages: usize,
}

impl<T> PagedResult<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Size of the whole candidate collection, before slicing.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        to_usize(self.current_page) < self.total_pages
    }

    /// Transform the items while keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
        }
    }

    pub fn metadata(&self) -> PaginationMetadata {
        PaginationMetadata {
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
            previous_page_link: None,
            next_page_link: None,
        }
    }
}

/// Slice one page out of `items`.
///
/// `items` must already be filtered and sorted; counting happens over the
/// whole collection. A page past the end is empty, not an error.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> PagedResult<T> {
    let total_count = items.len();
    let page_size = to_usize(request.page_size());
    let total_pages = total_count.div_ceil(page_size);
    let items = items
        .into_iter()
        .skip(request.offset())
        .take(page_size)
        .collect();
    PagedResult {
        items,
        total_count,
        page_size: request.page_size(),
        current_page: request.page_number(),
        total_pages,
    }
}

/// Paging block sent alongside a collection (the `X-Pagination` header).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[must_use]
pub struct PaginationMetadata {
    pub total_count: usize,
    pub page_size: u32,
    pub current_page: u32,
    pub total_pages: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_page_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_link: Option<String>,
}

impl PaginationMetadata {
    pub fn with_page_links(mut self, previous: Option<String>, next: Option<String>) -> Self {
        self.previous_page_link = previous;
        self.next_page_link = next;
        self
    }
}
