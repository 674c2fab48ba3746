//! Domain table profiles.
//!
//! A profile tells the engine how to find a domain table whose exact name is
//! not guaranteed (`canonical_table`, then `table_keywords`), and which of its
//! columns carry searchable text.

use mzdex_core::schema::TextScope;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct DomainProfile {
    /// Table name expected by convention.
    pub canonical_table: String,
    /// Fallback: first catalogue table whose name contains one of these.
    pub table_keywords: Vec<String>,
    /// Columns whose name contains one of these take part in text search.
    pub text_keywords: Vec<String>,
    /// Field used for the category filter (e.g. `organism_type`), if any.
    #[serde(default)]
    pub filter_field: Option<String>,
}

impl DomainProfile {
    #[must_use]
    pub fn metabolites() -> Self {
        Self {
            canonical_table: "metabolites".into(),
            table_keywords: vec!["metabolite".into(), "compound".into()],
            text_keywords: vec!["name".into(), "formula".into(), "class".into()],
            filter_field: None,
        }
    }

    #[must_use]
    pub fn enzymes() -> Self {
        Self {
            canonical_table: "enzymes".into(),
            table_keywords: vec!["enzyme".into(), "protein".into()],
            text_keywords: vec!["name".into(), "ec".into(), "organism".into()],
            filter_field: Some("organism_type".into()),
        }
    }

    #[must_use]
    pub fn text_scope(&self) -> TextScope {
        TextScope::Keywords(self.text_keywords.clone())
    }
}
