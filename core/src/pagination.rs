//! Pagination contract shared by every listing.
//!
//! Pages are 1-based. A page of a result set carries the slice of items
//! plus enough metadata (`total_items`, `total_pages`) to render pagers
//! without a second request.

use serde::{Deserialize, Serialize};

/// Page size used by the listing views.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Default page size for unfiltered event listings.
pub const LIST_PAGE_SIZE: u32 = 50;

/// Default page size for filtered event searches.
pub const SEARCH_PAGE_SIZE: u32 = 20;

/// Largest page size the backend serves.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Which page to fetch and how large pages are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

impl PageRequest {
    /// Build a request, clamping `page` to at least 1 and `per_page` to
    /// `1..=MAX_PAGE_SIZE`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use conference_alert_core::PageRequest;
    /// let request = PageRequest::new(0, 0);
    /// assert_eq!((request.page, request.per_page), (1, 1));
    /// ```
    #[must_use]
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// First page of `per_page` items.
    #[must_use]
    pub fn first(per_page: u32) -> Self {
        Self::new(1, per_page)
    }

    /// Zero-based index of the first item on this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.per_page as usize)
    }

    /// The following page.
    #[must_use]
    pub fn next(&self) -> Self {
        Self::new(self.page.saturating_add(1), self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Number of pages needed for `total_items`. Zero items need zero pages.
///
/// # Examples
///
/// ```
/// # use conference_alert_core::pagination::total_pages;
/// assert_eq!(total_pages(25, 12), 3);
/// assert_eq!(total_pages(24, 12), 2);
/// assert_eq!(total_pages(0, 12), 0);
/// ```
#[must_use]
pub const fn total_pages(total_items: u64, per_page: u32) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total_items.div_ceil(per_page as u64)
}

/// One page of a result set.
///
/// Field names follow the backend's list envelope so a response body
/// deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// 1-based page number.
    pub page: u32,
    /// Requested page size.
    pub per_page: u32,
    /// Items across all pages.
    pub total_items: u64,
    /// Number of pages.
    pub total_pages: u64,
    /// Items on this page.
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// An empty page for `request`.
    #[must_use]
    pub const fn empty(request: PageRequest) -> Self {
        Self {
            page: request.page,
            per_page: request.per_page,
            total_items: 0,
            total_pages: 0,
            items: Vec::new(),
        }
    }

    /// Slice a complete, already ordered result set.
    ///
    /// # Examples
    ///
    /// ```
    /// # use conference_alert_core::{Page, PageRequest};
    /// let page = Page::paginate((1..=25).collect(), PageRequest::new(2, 12));
    /// assert_eq!(page.items, (13..=24).collect::<Vec<_>>());
    /// assert_eq!(page.total_pages, 3);
    /// ```
    #[must_use]
    pub fn paginate(all: Vec<T>, request: PageRequest) -> Self {
        let total_items = all.len() as u64;
        let items = all
            .into_iter()
            .skip(request.offset())
            .take(request.per_page as usize)
            .collect();

        Self {
            page: request.page,
            per_page: request.per_page,
            total_items,
            total_pages: total_pages(total_items, request.per_page),
            items,
        }
    }

    /// Returns `true` if a later page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    /// Returns `true` if an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns `true` if this page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform items, keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
