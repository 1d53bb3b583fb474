//! Page navigation for paginated listings.

use std::ops::RangeInclusive;

use crate::models::{PageRequest, Pagination, DEFAULT_PAGE_LIMIT};

/// Tracks the current page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    current_page: u32,
    total_pages: u32,
    total_items: u64,
    limit: u32,
}

impl Pager {
    pub fn new(limit: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            limit: limit.max(1),
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Request for the current page.
    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.current_page, self.limit)
    }

    /// Adopt the pagination metadata of a fetched page.
    pub fn update(&mut self, pagination: &Pagination) {
        self.total_pages = pagination.total_pages.max(1);
        self.total_items = pagination.total_items;
        self.current_page = pagination.current_page.clamp(1, self.total_pages);
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Move to `page`; `None` when it is out of range.
    pub fn go_to(&mut self, page: u32) -> Option<PageRequest> {
        if page < 1 || page > self.total_pages {
            return None;
        }
        self.current_page = page;
        Some(self.request())
    }

    pub fn next(&mut self) -> Option<PageRequest> {
        self.go_to(self.current_page.checked_add(1)?)
    }

    pub fn previous(&mut self) -> Option<PageRequest> {
        self.go_to(self.current_page.checked_sub(1)?)
    }

    /// Every page number, for numbered navigation.
    pub fn page_numbers(&self) -> RangeInclusive<u32> {
        1..=self.total_pages
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT)
    }
}
