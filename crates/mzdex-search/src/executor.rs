//! Paged execution of a built predicate.

use mzdex_core::pagination::Page;
use mzdex_core::predicate::Predicate;
use mzdex_core::request::SortKey;
use mzdex_core::schema::ColumnInfo;
use mzdex_core::values::Record;
use mzdex_db::scope::ReadScope;

use crate::error::SearchError;

/// One page of matches and the total they were cut from.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub rows: Vec<Record>,
    pub total: u64,
    pub total_pages: u64,
}

/// Count every match, then fetch the requested page, inside one read scope.
///
/// A page past the end yields no rows but still reports the real total.
///
/// # Errors
///
/// Returns [`SearchError::Query`] if either statement fails.
pub async fn execute(
    scope: &ReadScope,
    table: &str,
    columns: &[ColumnInfo],
    predicate: &Predicate,
    page: Page,
    sort: Option<&SortKey>,
) -> Result<Execution, SearchError> {
    let total = scope.count(table, columns, predicate).await?;
    let rows = if page.offset() >= total {
        Vec::new()
    } else {
        scope
            .fetch(table, columns, predicate, sort, page.offset(), page.limit())
            .await?
    };
    tracing::debug!(
        table,
        total,
        page = page.page,
        returned = rows.len(),
        "executed search"
    );
    Ok(Execution {
        rows,
        total,
        total_pages: page.total_pages(total),
    })
}
