//! Search error types for mzdex-search.

use mzdex_core::errors::CoreError;
use mzdex_db::error::DatabaseError;

/// Errors from search, resolution, and annotation input handling.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The requested (or resolved) table does not exist or has no columns.
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// Neither the canonical table nor any keyword match exists.
    #[error(
        "no candidate table for '{canonical}' (keywords: {keywords:?}); available tables: {available:?}"
    )]
    NoCandidateTable {
        canonical: String,
        keywords: Vec<String>,
        available: Vec<String>,
    },

    /// A named column (CSV mass column, filter field, sort key) is missing.
    #[error("column '{column}' not found; available columns: {available:?}")]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// Storage fault or malformed predicate.
    #[error("query error: {0}")]
    Query(#[from] DatabaseError),

    /// A numeric value was given but the table has no mass-like column.
    #[error("numeric filter requested but table '{table}' has no column matching {keywords:?}")]
    AmbiguousNumericFilter { table: String, keywords: Vec<String> },

    /// Request failed validation (page bounds, non-finite mass, missing table).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Annotation input could not be read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<CoreError> for SearchError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::InvalidRequest(message),
            CoreError::Other(other) => Self::InvalidRequest(other.to_string()),
        }
    }
}
