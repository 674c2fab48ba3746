//! Table schema descriptors.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One column as reported by the store, in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type as written in the DDL (may be empty in SQLite).
    pub declared_type: String,
}

impl ColumnInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
        }
    }

    /// Whether the declared type has TEXT affinity (or no declared type at all).
    ///
    /// Follows SQLite's affinity rules: a type containing `CHAR`, `CLOB` or
    /// `TEXT` is textual; an empty type has BLOB affinity but stores whatever
    /// it is given, so it is treated as searchable text too.
    #[must_use]
    pub fn has_text_affinity(&self) -> bool {
        let upper = self.declared_type.to_ascii_uppercase();
        if upper.contains("INT") {
            return false;
        }
        upper.trim().is_empty()
            || upper.contains("CHAR")
            || upper.contains("CLOB")
            || upper.contains("TEXT")
    }

    /// Case-insensitive substring match of the column name against any keyword.
    #[must_use]
    pub fn name_matches_any<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        let lower = self.name.to_lowercase();
        keywords
            .iter()
            .map(|keyword| keyword.as_ref().to_lowercase())
            .any(|keyword| !keyword.is_empty() && lower.contains(&keyword))
    }
}

/// Which columns participate in free-text matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TextScope {
    /// Every column of the table.
    #[default]
    All,
    /// Only columns with TEXT affinity.
    TextLike,
    /// Columns whose name contains one of the keywords.
    Keywords(Vec<String>),
}
