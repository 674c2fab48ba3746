//! Predicate building.
//!
//! Turns a [`SearchRequest`] plus the live column list of one table into a
//! single [`Predicate`]. Clause order is fixed: the text clause, then the mass
//! window, then each field filter, all combined with AND.
//!
//! - **Text**: an OR of substring matches over the columns chosen by the
//!   [`TextScope`]. A keyword scope that selects nothing falls back to the
//!   text-affinity columns and records a [`SearchWarning::TextScopeFallback`].
//! - **Mass**: the first column whose name contains a mass keyword gets a
//!   ppm window. When no column qualifies the clause is dropped with a
//!   [`SearchWarning::AmbiguousNumericFilter`], or rejected outright in strict
//!   mode.
//! - **Filters**: exact string equality on a named column, which must exist.

use mzdex_core::predicate::Predicate;
use mzdex_core::request::SearchRequest;
use mzdex_core::responses::SearchWarning;
use mzdex_core::schema::{ColumnInfo, TextScope};
use mzdex_core::tolerance::ToleranceWindow;

use crate::error::SearchError;
use crate::inspector::require_column;

/// Knobs that come from configuration rather than the request.
#[derive(Debug, Clone, Copy)]
pub struct PlanOptions<'a> {
    pub text_scope: &'a TextScope,
    pub mass_keywords: &'a [String],
    /// Reject numeric requests against tables without a mass column.
    pub strict_numeric: bool,
}

/// A predicate together with what went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub predicate: Predicate,
    pub text_columns: Vec<String>,
    pub mass_column: Option<String>,
    pub window: Option<ToleranceWindow>,
    pub warnings: Vec<SearchWarning>,
}

/// Build the predicate for `request` against `table`'s `columns`.
///
/// # Errors
///
/// - [`SearchError::InvalidRequest`] for a non-finite numeric value.
/// - [`SearchError::AmbiguousNumericFilter`] in strict mode when no mass
///   column exists.
/// - [`SearchError::ColumnNotFound`] when a filter names a missing field.
pub fn build(
    table: &str,
    columns: &[ColumnInfo],
    request: &SearchRequest,
    options: &PlanOptions<'_>,
) -> Result<Plan, SearchError> {
    let mut clauses = Vec::new();
    let mut warnings = Vec::new();
    let mut text_columns = Vec::new();
    let mut mass_column = None;
    let mut window = None;

    if let Some(text) = request.text_query() {
        let (selected, fell_back) = select_text_columns(columns, options.text_scope);
        if fell_back {
            if let TextScope::Keywords(keywords) = options.text_scope {
                tracing::debug!(table, ?keywords, "no keyword column, using text columns");
                warnings.push(SearchWarning::TextScopeFallback {
                    table: table.to_string(),
                    keywords: keywords.clone(),
                });
            }
        }
        text_columns = selected.iter().map(|c| c.name.clone()).collect();
        clauses.push(Predicate::Or(
            selected
                .iter()
                .map(|c| Predicate::contains(c.name.clone(), text))
                .collect(),
        ));
    }

    if let Some(value) = request.numeric_value {
        let tolerance = ToleranceWindow::new(value, request.tolerance_ppm)?;
        match pick_mass_column(columns, options.mass_keywords) {
            Some(column) => {
                clauses.push(Predicate::in_range(
                    column.name.clone(),
                    tolerance.lo,
                    tolerance.hi,
                ));
                mass_column = Some(column.name.clone());
                window = Some(tolerance);
            }
            None if options.strict_numeric => {
                return Err(SearchError::AmbiguousNumericFilter {
                    table: table.to_string(),
                    keywords: options.mass_keywords.to_vec(),
                });
            }
            None => {
                tracing::warn!(
                    table,
                    value,
                    "numeric filter ignored: no mass-like column"
                );
                warnings.push(SearchWarning::AmbiguousNumericFilter {
                    table: table.to_string(),
                    keywords: options.mass_keywords.to_vec(),
                });
            }
        }
    }

    for filter in &request.filters {
        let column = require_column(columns, &filter.field)?;
        clauses.push(Predicate::equals(column.name.clone(), filter.value.clone()));
    }

    tracing::debug!(
        table,
        ?text_columns,
        ?mass_column,
        filters = request.filters.len(),
        "built predicate"
    );
    Ok(Plan {
        predicate: Predicate::all_of(clauses),
        text_columns,
        mass_column,
        window,
        warnings,
    })
}

/// Columns taking part in text matching, and whether a keyword scope had to
/// fall back to text affinity.
#[must_use]
pub fn select_text_columns<'a>(
    columns: &'a [ColumnInfo],
    scope: &TextScope,
) -> (Vec<&'a ColumnInfo>, bool) {
    match scope {
        TextScope::All => (columns.iter().collect(), false),
        TextScope::TextLike => (text_like(columns), false),
        TextScope::Keywords(keywords) => {
            let matched: Vec<_> = columns
                .iter()
                .filter(|c| c.name_matches_any(keywords))
                .collect();
            if matched.is_empty() {
                (text_like(columns), true)
            } else {
                (matched, false)
            }
        }
    }
}

fn text_like(columns: &[ColumnInfo]) -> Vec<&ColumnInfo> {
    columns.iter().filter(|c| c.has_text_affinity()).collect()
}

/// First column, in declaration order, whose name contains a mass keyword.
#[must_use]
pub fn pick_mass_column<'a>(
    columns: &'a [ColumnInfo],
    keywords: &[String],
) -> Option<&'a ColumnInfo> {
    columns.iter().find(|c| c.name_matches_any(keywords))
}
