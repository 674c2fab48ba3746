use mzdex_search::SearchEngine;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::MetabolitesArgs;
use crate::commands::shared::{base_request, tolerance};
use crate::output::output;

/// Handle `mzdex metabolites`.
pub async fn handle(
    args: &MetabolitesArgs,
    engine: &SearchEngine,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut request = base_request(&args.paging, engine);
    if let Some(query) = &args.query {
        request = request.with_text(query.clone());
    }
    if let Some(mass) = args.mass {
        request = request.with_mass(mass, tolerance(args.tol_ppm, engine));
    }

    let response = engine.search_metabolites(&request).await?;
    output(&response, flags.format)
}
