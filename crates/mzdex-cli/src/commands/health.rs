use mzdex_core::responses::HealthStatus;
use mzdex_search::SearchEngine;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `mzdex health`. Exits non-zero when the database is unhealthy.
pub async fn handle(engine: &SearchEngine, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = engine.health().await;
    output(&report, flags.format)?;
    if report.status == HealthStatus::Unhealthy {
        anyhow::bail!(
            "database unhealthy: {}",
            report.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}
