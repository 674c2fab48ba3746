use mzdex_core::request::SortDirection;
use mzdex_search::SearchEngine;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::commands::shared::{base_request, tolerance};
use crate::output::output;

/// Handle `mzdex search --table T`.
pub async fn handle(
    args: &SearchArgs,
    engine: &SearchEngine,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut request = base_request(&args.paging, engine);
    request.table = Some(args.table.clone());
    if let Some(query) = &args.query {
        request = request.with_text(query.clone());
    }
    if let Some(value) = args.value {
        request = request.with_mass(value, tolerance(args.tol_ppm, engine));
    }
    for (field, value) in &args.filters {
        request = request.with_filter(field.clone(), value.clone());
    }
    if let Some(column) = &args.sort {
        let direction = if args.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        request = request.with_sort(column.clone(), direction);
    }

    let response = engine.search_table(&request).await?;
    for warning in &response.warnings {
        tracing::warn!(?warning, "search warning");
    }
    output(&response, flags.format)
}
