//! Schema inspection.
//!
//! Columns are read fresh on every request; the store may be swapped or
//! migrated between calls and nothing here is cached.

use mzdex_core::schema::ColumnInfo;
use mzdex_db::scope::ReadScope;

use crate::error::SearchError;

/// Columns of `table` in declaration order.
///
/// # Errors
///
/// Returns [`SearchError::TableNotFound`] if the table is absent or exposes no
/// columns, or [`SearchError::Query`] if the store fails.
pub async fn inspect(scope: &ReadScope, table: &str) -> Result<Vec<ColumnInfo>, SearchError> {
    let columns = scope.list_columns(table).await?;
    if columns.is_empty() {
        return Err(SearchError::TableNotFound(table.to_string()));
    }
    tracing::debug!(table, columns = columns.len(), "inspected schema");
    Ok(columns)
}

/// Find a column by exact name, falling back to an ASCII case-insensitive
/// match (SQLite identifiers are case-insensitive).
#[must_use]
pub fn find_column<'a>(columns: &'a [ColumnInfo], name: &str) -> Option<&'a ColumnInfo> {
    columns
        .iter()
        .find(|c| c.name == name)
        .or_else(|| columns.iter().find(|c| c.name.eq_ignore_ascii_case(name)))
}

/// [`find_column`] that reports the available columns on failure.
///
/// # Errors
///
/// Returns [`SearchError::ColumnNotFound`] listing every column name.
pub fn require_column<'a>(
    columns: &'a [ColumnInfo],
    name: &str,
) -> Result<&'a ColumnInfo, SearchError> {
    find_column(columns, name).ok_or_else(|| SearchError::ColumnNotFound {
        column: name.to_string(),
        available: columns.iter().map(|c| c.name.clone()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnInfo> {
        vec![
            ColumnInfo::new("id", "INTEGER"),
            ColumnInfo::new("Organism_Type", "TEXT"),
        ]
    }

    #[test]
    fn exact_match_wins_then_case_insensitive() {
        let cols = columns();
        assert_eq!(find_column(&cols, "id").unwrap().name, "id");
        assert_eq!(
            find_column(&cols, "organism_type").unwrap().name,
            "Organism_Type"
        );
    }

    #[test]
    fn missing_column_lists_available() {
        let err = require_column(&columns(), "family").unwrap_err();
        match err {
            SearchError::ColumnNotFound { column, available } => {
                assert_eq!(column, "family");
                assert_eq!(available, vec!["id", "Organism_Type"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
