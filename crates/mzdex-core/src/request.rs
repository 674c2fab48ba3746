//! Search request types.
//!
//! Requests are transient: the caller owns page numbers and the last query
//! between calls, the engine never remembers anything.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::pagination::Page;

pub const DEFAULT_TOLERANCE_PPM: u32 = 10;
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// An exact-equality constraint on a named field (e.g. `organism_type`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

impl FieldFilter {
    #[must_use]
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Explicit ordering. Without one, rows come back in the store's natural order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Target table. Domain searches resolve this themselves.
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub free_text: Option<String>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
    #[serde(default = "default_tolerance_ppm")]
    pub tolerance_ppm: u32,
    #[serde(default)]
    pub filters: Vec<FieldFilter>,
    #[serde(default)]
    pub sort: Option<SortKey>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

const fn default_tolerance_ppm() -> u32 {
    DEFAULT_TOLERANCE_PPM
}

const fn default_page() -> u32 {
    1
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            table: None,
            free_text: None,
            numeric_value: None,
            tolerance_ppm: default_tolerance_ppm(),
            filters: Vec::new(),
            sort: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl SearchRequest {
    #[must_use]
    pub fn for_table(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.free_text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_mass(mut self, mass: f64, tolerance_ppm: u32) -> Self {
        self.numeric_value = Some(mass);
        self.tolerance_ppm = tolerance_ppm;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push(FieldFilter::new(field, value));
        self
    }

    #[must_use]
    pub fn with_sort(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortKey {
            column: column.into(),
            direction,
        });
        self
    }

    #[must_use]
    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// The free-text query, treating a blank string as absent.
    #[must_use]
    pub fn text_query(&self) -> Option<&str> {
        self.free_text.as_deref().filter(|text| !text.trim().is_empty())
    }

    /// Validated pagination for this request.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a zero page or page size.
    pub fn page(&self) -> Result<Page, CoreError> {
        Page::new(self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_follow_request_shape() {
        let request = SearchRequest::default();
        assert_eq!(request.tolerance_ppm, 10);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, 50);
        assert!(request.filters.is_empty());
    }

    #[test]
    fn deserialize_fills_defaults() {
        let request: SearchRequest =
            serde_json::from_str(r#"{"table":"samples","free_text":"glu"}"#).unwrap();
        assert_eq!(request.table.as_deref(), Some("samples"));
        assert_eq!(request.tolerance_ppm, 10);
        assert_eq!(request.page_size, 50);
    }

    #[test]
    fn empty_text_counts_as_absent() {
        assert_eq!(SearchRequest::default().with_text("").text_query(), None);
        assert_eq!(SearchRequest::default().with_text("  ").text_query(), None);
        assert_eq!(
            SearchRequest::default().with_text("glu").text_query(),
            Some("glu")
        );
    }

    #[test]
    fn invalid_page_is_reported() {
        assert!(SearchRequest::default().with_page(0, 10).page().is_err());
        assert!(SearchRequest::default().with_page(1, 0).page().is_err());
    }
}
