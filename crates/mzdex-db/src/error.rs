//! Database error types for mzdex-db.

use thiserror::Error;

/// Errors from storage operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned something unexpected.
    #[error("Query failed: {0}")]
    Query(String),

    /// A predicate, projection or sort key named a column the table lacks.
    #[error("Unknown column '{column}' in table '{table}'")]
    UnknownColumn { table: String, column: String },

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
