//! Pagination types for list endpoints

use serde::{Deserialize, Serialize};

const MAX_PER_PAGE: u32 = 50;
const DEFAULT_PER_PAGE: u32 = 20;

/// Validated pagination parameters
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page (clamped to 1..=50)
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PER_PAGE),
        }
    }

    /// SQL OFFSET value. Widened before multiplying; `page` comes
    /// straight from the query string.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.per_page)
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    /// Total count across all pages
    pub total: i64,
    pub page: u32,
    pub per_page: u32,
}

impl<T> Paginated<T> {
    pub fn total_pages(&self) -> u32 {
        if self.total <= 0 {
            1
        } else {
            ((self.total as u32).div_ceil(self.per_page)).max(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_calculation() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(3, 10).offset(), 20);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let p = Pagination::new(u32::MAX, MAX_PER_PAGE);
        assert_eq!(
            p.offset(),
            (i64::from(u32::MAX) - 1) * i64::from(MAX_PER_PAGE)
        );
    }

    #[test]
    fn clamps_inputs() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 1);

        let p = Pagination::new(1, 999);
        assert_eq!(p.per_page, MAX_PER_PAGE);
    }

    #[test]
    fn total_pages() {
        let page: Paginated<()> = Paginated {
            items: vec![],
            total: 0,
            page: 1,
            per_page: 10,
        };
        assert_eq!(page.total_pages(), 1);

        let page: Paginated<()> = Paginated {
            items: vec![],
            total: 21,
            page: 1,
            per_page: 10,
        };
        assert_eq!(page.total_pages(), 3);
    }
}
