use mzdex_search::SearchEngine;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TablesArgs;
use crate::output::output;

/// Handle `mzdex tables [TABLE]`.
pub async fn handle(
    args: &TablesArgs,
    engine: &SearchEngine,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match &args.table {
        Some(table) => output(&engine.columns(table).await?, flags.format),
        None => output(&engine.tables().await?, flags.format),
    }
}
