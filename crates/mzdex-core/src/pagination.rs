//! Page accounting shared by every search path.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: u32,
    pub page_size: u32,
}

impl Page {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `page` is 0 or `page_size` is 0.
    pub fn new(page: u32, page_size: u32) -> Result<Self, CoreError> {
        if page == 0 {
            return Err(CoreError::Validation("page must be >= 1".to_string()));
        }
        if page_size == 0 {
            return Err(CoreError::Validation("page_size must be > 0".to_string()));
        }
        Ok(Self { page, page_size })
    }

    /// Row offset of the first row on this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    #[must_use]
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    /// `ceil(total / page_size)`; zero when there are no matches.
    #[must_use]
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.page_size))
    }

    /// Number of rows this page holds when `total` rows match.
    #[must_use]
    pub fn expected_rows(&self, total: u64) -> u64 {
        total.saturating_sub(self.offset()).min(self.limit())
    }
}
