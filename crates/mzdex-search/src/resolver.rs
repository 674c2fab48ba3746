//! Domain table resolution.
//!
//! Databases in the wild do not agree on table names. A domain search first
//! looks for its canonical table and otherwise takes the first catalogue table
//! whose name contains one of the domain keywords. When nothing matches, the
//! whole catalogue travels with the error so a human can pick a table.

use mzdex_db::scope::ReadScope;

use crate::error::SearchError;

/// Resolve against the live catalogue of `scope`.
///
/// # Errors
///
/// Returns [`SearchError::NoCandidateTable`] when nothing matches, or
/// [`SearchError::Query`] if the catalogue cannot be listed.
pub async fn resolve<S: AsRef<str>>(
    scope: &ReadScope,
    canonical: &str,
    keywords: &[S],
) -> Result<String, SearchError> {
    let catalogue = scope.list_tables().await?;
    resolve_in(&catalogue, canonical, keywords)
}

/// Resolve against an already listed catalogue (in listing order).
///
/// # Errors
///
/// Returns [`SearchError::NoCandidateTable`] carrying the full catalogue.
pub fn resolve_in<S: AsRef<str>>(
    catalogue: &[String],
    canonical: &str,
    keywords: &[S],
) -> Result<String, SearchError> {
    if let Some(table) = catalogue
        .iter()
        .find(|t| t.eq_ignore_ascii_case(canonical))
    {
        return Ok(table.clone());
    }

    let lowered: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    let found = catalogue.iter().find(|table| {
        let name = table.to_lowercase();
        lowered.iter().any(|keyword| name.contains(keyword))
    });

    match found {
        Some(table) => {
            tracing::debug!(canonical, table = %table, "resolved table by keyword");
            Ok(table.clone())
        }
        None => Err(SearchError::NoCandidateTable {
            canonical: canonical.to_string(),
            keywords: keywords.iter().map(|k| k.as_ref().to_string()).collect(),
            available: catalogue.to_vec(),
        }),
    }
}
