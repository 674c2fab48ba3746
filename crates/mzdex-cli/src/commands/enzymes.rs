use mzdex_search::SearchEngine;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EnzymesArgs;
use crate::commands::shared::base_request;
use crate::output::output;

/// Handle `mzdex enzymes`.
pub async fn handle(
    args: &EnzymesArgs,
    engine: &SearchEngine,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut request = base_request(&args.paging, engine);
    if let Some(query) = &args.query {
        request = request.with_text(query.clone());
    }

    let response = engine
        .search_enzymes(&request, args.organism_type.as_deref())
        .await?;
    output(&response, flags.format)
}
