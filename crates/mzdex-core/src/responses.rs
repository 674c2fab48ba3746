//! Response types returned as JSON by the engine and the `mzdex` CLI.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::schema::ColumnInfo;
use crate::values::Record;

/// Non-fatal conditions noticed while planning a search.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchWarning {
    /// A numeric value was given but the table has no mass-like column, so
    /// the numeric filter was not applied.
    AmbiguousNumericFilter { table: String, keywords: Vec<String> },
    /// No column matched the domain text keywords; text-like columns were
    /// searched instead.
    TextScopeFallback { table: String, keywords: Vec<String> },
}

/// One page of a search over a single table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SearchResponse {
    pub results: Vec<Record>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub table: String,
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SearchWarning>,
}

/// Annotation outcome for a single measured mass.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnnotationItem {
    pub mz: f64,
    /// Matches in store retrieval order.
    pub candidates: Vec<Record>,
    /// First candidate in retrieval order, not the closest mass.
    pub best_match: Option<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnnotationItem {
    #[must_use]
    pub fn from_candidates(mz: f64, candidates: Vec<Record>) -> Self {
        let best_match = candidates.first().cloned();
        Self {
            mz,
            candidates,
            best_match,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(mz: f64, error: impl Into<String>) -> Self {
        Self {
            mz,
            candidates: Vec::new(),
            best_match: None,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub fn is_annotated(&self) -> bool {
        !self.candidates.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct AnnotationReport {
    pub items: Vec<AnnotationItem>,
    pub total_annotated: usize,
    pub tolerance_ppm: u32,
    /// The caller's deadline passed before every mass was processed.
    #[serde(default)]
    pub deadline_exceeded: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TableSummary {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
    /// `None` when the table could not be counted.
    pub row_count: Option<u64>,
    /// Why this table could not be inspected, if it could not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(default)]
    pub tables: Vec<TableSummary>,
    pub metabolites_table: Option<String>,
    pub metabolites_count: Option<u64>,
    pub enzymes_table: Option<String>,
    pub enzymes_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TablesResponse {
    pub tables: Vec<String>,
}
