//! Search and annotation tuning.

use mzdex_core::request::{DEFAULT_PAGE_SIZE, DEFAULT_TOLERANCE_PPM};
use mzdex_core::schema::TextScope;
use serde::{Deserialize, Serialize};

const fn default_tolerance_ppm() -> u32 {
    DEFAULT_TOLERANCE_PPM
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// Candidates kept per annotated mass.
const fn default_max_candidates() -> u32 {
    5
}

const fn default_annotation_concurrency() -> usize {
    1
}

fn default_mass_keywords() -> Vec<String> {
    ["mass", "weight", "mz"].map(String::from).to_vec()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_tolerance_ppm")]
    pub default_tolerance_ppm: u32,

    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    /// Cap on candidates per mass in batch annotation.
    #[serde(default = "default_max_candidates")]
    pub max_candidates: u32,

    /// Column-name fragments that mark a mass column. First column (in schema
    /// order) containing any of them wins.
    #[serde(default = "default_mass_keywords")]
    pub mass_keywords: Vec<String>,

    /// Text participation for tables without a domain profile.
    #[serde(default)]
    pub generic_text_scope: TextScope,

    /// Fail instead of warn when a numeric value is given for a table
    /// without a mass-like column.
    #[serde(default)]
    pub strict_numeric_filter: bool,

    /// Concurrent per-mass lookups during batch annotation.
    #[serde(default = "default_annotation_concurrency")]
    pub annotation_concurrency: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_tolerance_ppm: default_tolerance_ppm(),
            default_page_size: default_page_size(),
            max_candidates: default_max_candidates(),
            mass_keywords: default_mass_keywords(),
            generic_text_scope: TextScope::default(),
            strict_numeric_filter: false,
            annotation_concurrency: default_annotation_concurrency(),
        }
    }
}
