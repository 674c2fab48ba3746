//! Compile [`Predicate`] trees into SQLite `WHERE` clauses.
//!
//! Identifiers are always double-quoted with embedded quotes doubled, and every
//! value is a bound `?` parameter pushed in the same order it appears in the
//! SQL text. Column names coming from the schema can therefore never change
//! the shape of the statement.

use mzdex_core::predicate::Predicate;
use mzdex_core::request::{SortDirection, SortKey};

/// Quote an identifier for SQLite: `na"me` -> `"na""me"`.
#[must_use]
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// SQL text plus its positional parameters.
#[derive(Debug, Clone)]
pub struct CompiledClause {
    pub sql: String,
    pub params: Vec<libsql::Value>,
}

/// Compile a predicate into a boolean SQL expression.
#[must_use]
pub fn compile(predicate: &Predicate) -> CompiledClause {
    let mut params = Vec::new();
    let sql = compile_into(predicate, &mut params);
    CompiledClause { sql, params }
}

fn compile_into(predicate: &Predicate, params: &mut Vec<libsql::Value>) -> String {
    match predicate {
        Predicate::Contains { column, needle } => {
            params.push(needle.as_str().into());
            // instr() is case-sensitive, unlike LIKE for ASCII.
            format!("instr(CAST({} AS TEXT), ?) > 0", quote_ident(column))
        }
        Predicate::InRange { column, lo, hi } => {
            params.push((*lo).into());
            params.push((*hi).into());
            numeric_range(&quote_ident(column))
        }
        Predicate::Equals { column, value } => {
            params.push(value.as_str().into());
            format!("CAST({} AS TEXT) = ?", quote_ident(column))
        }
        Predicate::And(children) => join(children, " AND ", "1 = 1", params),
        Predicate::Or(children) => join(children, " OR ", "0 = 1", params),
    }
}

/// Range test on the numeric reading of a cell, whatever its affinity.
///
/// Text cells count only when they look like a number literal, so `'abc'`
/// (which casts to `0.0`) never lands in a window around zero. Blobs and
/// NULLs never match.
fn numeric_range(column: &str) -> String {
    format!(
        "((typeof({column}) IN ('integer', 'real') \
         OR (typeof({column}) = 'text' \
         AND trim({column}) GLOB '*[0-9]*' \
         AND trim({column}) NOT GLOB '*[^0-9.eE+-]*')) \
         AND CAST({column} AS REAL) BETWEEN ? AND ?)"
    )
}

fn join(
    children: &[Predicate],
    separator: &str,
    empty: &str,
    params: &mut Vec<libsql::Value>,
) -> String {
    if children.is_empty() {
        return empty.to_string();
    }
    let parts = children
        .iter()
        .map(|child| compile_into(child, params))
        .collect::<Vec<_>>();
    format!("({})", parts.join(separator))
}

/// `ORDER BY` clause for an optional sort key (empty when absent).
#[must_use]
pub fn order_by(sort: Option<&SortKey>) -> String {
    match sort {
        Some(key) => {
            let direction = match key.direction {
                SortDirection::Asc => "ASC",
                SortDirection::Desc => "DESC",
            };
            format!(" ORDER BY {} {direction}", quote_ident(&key.column))
        }
        None => String::new(),
    }
}
