use mzdex_search::SearchEngine;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    engine: &SearchEngine,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Health => commands::health::handle(engine, flags).await,
        Commands::Tables(args) => commands::tables::handle(&args, engine, flags).await,
        Commands::Metabolites(args) => commands::metabolites::handle(&args, engine, flags).await,
        Commands::Enzymes(args) => commands::enzymes::handle(&args, engine, flags).await,
        Commands::Search(args) => commands::search::handle(&args, engine, flags).await,
        Commands::Annotate(args) => commands::annotate::handle(&args, engine, flags).await,
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
