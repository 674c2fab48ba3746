use anyhow::Context;
use mzdex_config::MzdexConfig;
use mzdex_db::MzdexDb;
use mzdex_search::SearchEngine;

use crate::cli::GlobalFlags;

/// Load configuration from `.env`, TOML files and the environment, then apply
/// the `--database` override.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<MzdexConfig> {
    let mut config = MzdexConfig::load_with_dotenv().context("failed to load mzdex configuration")?;
    if let Some(path) = &flags.database {
        config.database.path.clone_from(path);
        config.validate()?;
    }
    tracing::debug!(database = %config.database.path, "configuration loaded");
    Ok(config)
}

/// Open the configured database and wrap it in a search engine.
///
/// The file must already exist: searching a freshly created empty database
/// only ever reports missing tables.
pub async fn open_engine(config: MzdexConfig) -> anyhow::Result<SearchEngine> {
    let path = config.database.path.clone();
    if path != ":memory:" && !std::path::Path::new(&path).exists() {
        anyhow::bail!("database file not found: {path} (set MZDEX_DATABASE__PATH or --database)");
    }
    let db = MzdexDb::open_local(&path)
        .await
        .with_context(|| format!("failed to open database at {path}"))?;
    Ok(SearchEngine::new(db, config))
}
