//! Shared application plumbing: errors, response envelope, logging, pagination.

pub mod error;
pub mod logger;

pub use error::{ApiResponse, AppError, AppResult, ok_with_message};

use serde::{Deserialize, Serialize};

/// Current time as milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Common pagination query parameters
///
/// Defaults to page 1 with 20 items; `per_page` is capped at 100.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageQuery {
    /// Resolve to (per_page, offset, page)
    pub fn resolve(&self) -> (i64, i64, i64) {
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let page = self.page.unwrap_or(1).max(1);
        // Saturate rather than overflow on absurd page numbers
        let offset = (page - 1).saturating_mul(per_page);
        (per_page, offset, page)
    }
}

/// Paged list envelope
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let q = PageQuery {
            page: None,
            per_page: None,
        };
        assert_eq!(q.resolve(), (20, 0, 1));
    }

    #[test]
    fn test_page_query_caps_and_offsets() {
        let q = PageQuery {
            page: Some(3),
            per_page: Some(500),
        };
        assert_eq!(q.resolve(), (100, 200, 3));

        let q = PageQuery {
            page: Some(0),
            per_page: Some(0),
        };
        assert_eq!(q.resolve(), (1, 0, 1));
    }

    #[test]
    fn test_page_query_huge_page_does_not_overflow() {
        let q = PageQuery {
            page: Some(i64::MAX),
            per_page: Some(100),
        };
        let (per_page, offset, page) = q.resolve();
        assert_eq!(per_page, 100);
        assert_eq!(offset, i64::MAX);
        assert_eq!(page, i64::MAX);
    }
}
