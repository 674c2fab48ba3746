//! Store-independent filter predicates.
//!
//! The engine never formats SQL. It builds a [`Predicate`] tree that names
//! columns and carries values; the storage adapter compiles the tree to its
//! native query form with quoted identifiers and bound parameters.
//!
//! [`Predicate::matches`] evaluates the same tree against an in-memory
//! [`Record`], which keeps predicate construction testable without a store.

use serde::{Deserialize, Serialize};

use crate::values::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", content = "args", rename_all = "snake_case")]
pub enum Predicate {
    /// Stringified column value contains `needle` (case-sensitive).
    Contains { column: String, needle: String },
    /// Numeric column value lies in `[lo, hi]`, both ends inclusive.
    InRange { column: String, lo: f64, hi: f64 },
    /// Stringified column value equals `value` exactly.
    Equals { column: String, value: String },
    /// All children hold. Empty accepts every row.
    And(Vec<Self>),
    /// At least one child holds. Empty rejects every row.
    Or(Vec<Self>),
}

impl Predicate {
    /// The predicate that accepts every row.
    #[must_use]
    pub const fn always() -> Self {
        Self::And(Vec::new())
    }

    #[must_use]
    pub fn contains(column: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::Contains {
            column: column.into(),
            needle: needle.into(),
        }
    }

    #[must_use]
    pub fn in_range(column: impl Into<String>, lo: f64, hi: f64) -> Self {
        Self::InRange {
            column: column.into(),
            lo,
            hi,
        }
    }

    #[must_use]
    pub fn equals(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            column: column.into(),
            value: value.into(),
        }
    }

    /// AND of `clauses`, collapsing the single-clause case.
    #[must_use]
    pub fn all_of(mut clauses: Vec<Self>) -> Self {
        if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            Self::And(clauses)
        }
    }

    /// OR of `clauses`, collapsing the single-clause case.
    #[must_use]
    pub fn any_of(mut clauses: Vec<Self>) -> Self {
        if clauses.len() == 1 {
            clauses.remove(0)
        } else {
            Self::Or(clauses)
        }
    }

    /// True when the predicate places no constraint on rows.
    #[must_use]
    pub fn is_always(&self) -> bool {
        match self {
            Self::And(children) => children.iter().all(Self::is_always),
            _ => false,
        }
    }

    /// Every column referenced by the tree, in visit order (may repeat).
    #[must_use]
    pub fn columns(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_columns(&mut out);
        out
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Contains { column, .. }
            | Self::InRange { column, .. }
            | Self::Equals { column, .. } => out.push(column),
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_columns(out);
                }
            }
        }
    }

    /// Evaluate against a decoded record. Missing columns and NULLs never match.
    #[must_use]
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Contains { column, needle } => record
                .get(column)
                .and_then(crate::values::CellValue::to_text)
                .is_some_and(|text| text.contains(needle.as_str())),
            Self::InRange { column, lo, hi } => record
                .get(column)
                .and_then(crate::values::CellValue::as_f64)
                .is_some_and(|value| *lo <= value && value <= *hi),
            Self::Equals { column, value } => record
                .get(column)
                .and_then(crate::values::CellValue::to_text)
                .is_some_and(|text| text == *value),
            Self::And(children) => children.iter().all(|child| child.matches(record)),
            Self::Or(children) => children.iter().any(|child| child.matches(record)),
        }
    }
}
