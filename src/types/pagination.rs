//! Pagination types for list pages.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// 1-based page number, never below the first page
    pub fn page(&self) -> u64 {
        self.page.max(DEFAULT_PAGE_NUMBER)
    }

    /// Zero-based page index for the database paginator
    pub fn page_index(&self) -> u64 {
        self.page() - 1
    }

    /// Get limit capped at maximum, never zero
    pub fn limit(&self) -> u64 {
        self.per_page.clamp(1, MAX_PAGE_SIZE)
    }

    /// Pull the page back onto the last existing page for `total` items.
    pub fn within(self, total: u64) -> Self {
        let last = total.div_ceil(self.limit()).max(DEFAULT_PAGE_NUMBER);
        Self {
            page: self.page().min(last),
            per_page: self.per_page,
        }
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of results plus navigation metadata
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: u64, per_page: u64, total: u64) -> Self {
        let total_pages = if per_page > 0 {
            total.div_ceil(per_page)
        } else {
            0
        };

        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Map the items, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let page = Paginated::new(vec![1, 2], 1, 10, 21);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_prev());
        assert!(page.has_next());
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page = Paginated::new(vec![1], 3, 10, 21);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn test_empty_result() {
        let page: Paginated<u8> = Paginated::new(vec![], 1, 10, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
    }

    #[test]
    fn test_params_are_clamped() {
        let params = PaginationParams::new(0, 1000);
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_index(), 0);
        assert_eq!(params.limit(), MAX_PAGE_SIZE);
        assert_eq!(PaginationParams::new(2, 0).limit(), 1);
    }

    #[test]
    fn test_within_stops_at_last_page() {
        let params = PaginationParams::new(1 << 62, 10).within(21);
        assert_eq!(params.page(), 3);
        assert_eq!(params.page_index(), 2);

        let empty = PaginationParams::new(u64::MAX, 10).within(0);
        assert_eq!(empty.page(), 1);

        assert_eq!(PaginationParams::new(2, 10).within(21).page(), 2);
    }
}
