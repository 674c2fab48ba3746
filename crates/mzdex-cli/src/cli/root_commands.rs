use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Database status, domain table counts and per-table metadata.
    Health,
    /// List tables, or the columns of one table.
    Tables(TablesArgs),
    /// Search the metabolite table by text and/or mass.
    Metabolites(MetabolitesArgs),
    /// Search the enzyme table by text and organism type.
    Enzymes(EnzymesArgs),
    /// Search any table by name.
    Search(SearchArgs),
    /// Annotate observed m/z values from a CSV file.
    Annotate(AnnotateArgs),
    /// Print the JSON Schema of a response type.
    Schema(SchemaArgs),
}

/// Paging shared by every search command.
#[derive(Clone, Debug, Args)]
pub struct PageArgs {
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page (defaults to `search.default_page_size`).
    #[arg(long)]
    pub page_size: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct TablesArgs {
    /// Show this table's columns instead of the table list.
    pub table: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct MetabolitesArgs {
    /// Substring to match in name, formula or class (case-sensitive).
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Target mass.
    #[arg(long, allow_negative_numbers = true)]
    pub mass: Option<f64>,

    /// Mass tolerance in ppm (defaults to `search.default_tolerance_ppm`).
    #[arg(long)]
    pub tol_ppm: Option<u32>,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Clone, Debug, Args)]
pub struct EnzymesArgs {
    /// Substring to match in name, EC number or organism (case-sensitive).
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Organism type to narrow to; `all` disables the filter.
    #[arg(long)]
    pub organism_type: Option<String>,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    /// Table to search (taken as given).
    #[arg(short, long)]
    pub table: String,

    /// Substring to match across the table's text scope.
    #[arg(short = 'q', long)]
    pub query: Option<String>,

    /// Numeric value matched against the first mass-like column.
    #[arg(long, allow_negative_numbers = true)]
    pub value: Option<f64>,

    /// Tolerance in ppm for `--value`.
    #[arg(long)]
    pub tol_ppm: Option<u32>,

    /// Exact field filter, `field=value`. Repeatable.
    #[arg(long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Column to sort by.
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending.
    #[arg(long, requires = "sort")]
    pub desc: bool,

    #[command(flatten)]
    pub paging: PageArgs,
}

#[derive(Clone, Debug, Args)]
pub struct AnnotateArgs {
    /// CSV file with a header row; `-` reads standard input.
    pub file: PathBuf,

    /// Column holding the observed m/z values.
    #[arg(long, default_value = "mz")]
    pub mz_column: String,

    /// Tolerance in ppm (defaults to `search.default_tolerance_ppm`).
    #[arg(long)]
    pub tol_ppm: Option<u32>,

    /// Candidates kept per mass (defaults to `search.max_candidates`).
    #[arg(long)]
    pub max_candidates: Option<u32>,

    /// Lookups in flight at once (defaults to `search.annotation_concurrency`).
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Stop starting new lookups after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Response type name, e.g. `search-response`.
    pub type_name: String,
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected field=value, got '{raw}'")),
    }
}
