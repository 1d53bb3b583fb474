//! Paged listing types used by the admin endpoints.

use serde::{Deserialize, Serialize};

/// Default page size of the admin listings.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Requested page (1-based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_LIMIT)
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    /// Total matching records across all pages
    #[serde(alias = "totalPrescriptions", alias = "totalUsers", alias = "total")]
    pub total_items: u64,
}

impl Pagination {
    /// Metadata for a result that fits on a single page.
    pub fn single(total_items: u64) -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Wrap an unpaged result as a single page.
    pub fn unpaged(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self {
            items,
            pagination: Pagination::single(total),
        }
    }
}
