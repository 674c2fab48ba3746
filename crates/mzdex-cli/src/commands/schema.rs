use mzdex_core::responses::{
    AnnotationReport, HealthReport, SearchResponse, TableSummary, TablesResponse,
};
use mzdex_core::schema::ColumnInfo;
use schemars::{Schema, schema_for};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Names accepted by `mzdex schema`.
pub const TYPE_NAMES: [&str; 6] = [
    "search-response",
    "annotation-report",
    "health-report",
    "tables-response",
    "table-summary",
    "column-info",
];

/// Handle `mzdex schema TYPE`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema_by_name(&args.type_name).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown type '{}'; expected one of: {}",
            args.type_name,
            TYPE_NAMES.join(", ")
        )
    })?;
    output(&schema, flags.format)
}

fn schema_by_name(name: &str) -> Option<Schema> {
    let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
    let schema = match normalized.as_str() {
        "search-response" => schema_for!(SearchResponse),
        "annotation-report" => schema_for!(AnnotationReport),
        "health-report" => schema_for!(HealthReport),
        "tables-response" => schema_for!(TablesResponse),
        "table-summary" => schema_for!(TableSummary),
        "column-info" => schema_for!(ColumnInfo),
        _ => return None,
    };
    Some(schema)
}
