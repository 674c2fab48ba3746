//! Cross-cutting error types for mzdex.
//!
//! Storage and engine failures (`DatabaseError`, `SearchError`) are defined in
//! their respective crates. This module only covers validation of the
//! transient request types that live here.

use thiserror::Error;

/// Errors that can be raised while constructing core types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (page bounds, non-finite masses, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
