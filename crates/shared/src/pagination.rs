//! Offset pagination windows.
//!
//! Admin list and search views page through submissions with a `(page,
//! limit)` pair. `PageWindow` normalizes that pair once at the boundary so
//! repositories only ever see a valid skip/take slice.

use thiserror::Error;

/// Hard ceiling on page size, applied regardless of what the caller asks for.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Default page size when the caller does not specify one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Error type for pagination parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Page must be at least 1")]
    InvalidPage,
    #[error("Limit must be at least 1")]
    InvalidLimit,
}

/// A validated `(page, limit)` pair.
///
/// `page` is 1-based; `limit` is clamped to [`MAX_PAGE_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page: u32,
    limit: u32,
}

impl PageWindow {
    /// Builds a window from raw parameters, rejecting zero values.
    pub fn new(page: u32, limit: u32) -> Result<Self, PaginationError> {
        if page < 1 {
            return Err(PaginationError::InvalidPage);
        }
        if limit < 1 {
            return Err(PaginationError::InvalidLimit);
        }
        Ok(Self {
            page,
            limit: limit.min(MAX_PAGE_LIMIT),
        })
    }

    /// Builds a window from optional query parameters, normalizing instead
    /// of rejecting: missing or zero values fall back to page 1 and the
    /// default limit.
    pub fn from_params(page: Option<u32>, limit: Option<u32>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        Self { page, limit }
    }

    /// 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page size.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    pub fn skip(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    /// Number of rows to take.
    pub fn take(&self) -> i64 {
        i64::from(self.limit)
    }

    /// Total page count for a result set of `total` rows (minimum 1, so an
    /// empty result set still renders as a single empty page).
    pub fn total_pages(&self, total: i64) -> u32 {
        let total = total.max(0) as u64;
        let limit = u64::from(self.limit);
        (total.div_ceil(limit)).max(1) as u32
    }
}
