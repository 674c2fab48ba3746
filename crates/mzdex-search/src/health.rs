//! Database health reporting.

use chrono::Utc;
use mzdex_core::responses::{HealthReport, HealthStatus, TableSummary};
use mzdex_db::scope::ReadScope;

use crate::engine::SearchEngine;
use crate::error::SearchError;
use crate::resolver::resolve_in;

impl SearchEngine {
    /// Summarize every table and check that both domain tables resolve.
    ///
    /// Never fails: a store fault or an unresolvable domain table yields an
    /// [`HealthStatus::Unhealthy`] report with the error text.
    pub async fn health(&self) -> HealthReport {
        match self.collect_health().await {
            Ok(report) => report,
            Err(error) => {
                tracing::warn!(%error, "health check failed");
                HealthReport {
                    status: HealthStatus::Unhealthy,
                    tables: Vec::new(),
                    metabolites_table: None,
                    metabolites_count: None,
                    enzymes_table: None,
                    enzymes_count: None,
                    error: Some(error.to_string()),
                    timestamp: Utc::now(),
                }
            }
        }
    }

    async fn collect_health(&self) -> Result<HealthReport, SearchError> {
        let scope = self.db().read_scope().await?;
        let catalogue = scope.list_tables().await?;
        let tables = summarize(&scope, &catalogue).await;
        scope.finish().await?;

        let mut problems = Vec::new();
        let mut domain = |canonical: &str, keywords: &[String]| {
            match resolve_in(&catalogue, canonical, keywords) {
                Ok(name) => {
                    let count = tables
                        .iter()
                        .find(|t| t.name == name)
                        .and_then(|t| t.row_count);
                    (Some(name), count)
                }
                Err(error) => {
                    problems.push(error.to_string());
                    (None, None)
                }
            }
        };

        let metabolites = &self.config().metabolites;
        let enzymes = &self.config().enzymes;
        let (metabolites_table, metabolites_count) =
            domain(&metabolites.canonical_table, &metabolites.table_keywords);
        let (enzymes_table, enzymes_count) =
            domain(&enzymes.canonical_table, &enzymes.table_keywords);

        let status = if problems.is_empty() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        Ok(HealthReport {
            status,
            tables,
            metabolites_table,
            metabolites_count,
            enzymes_table,
            enzymes_count,
            error: (!problems.is_empty()).then(|| problems.join("; ")),
            timestamp: Utc::now(),
        })
    }
}

/// One summary per catalogue entry. A table that cannot be inspected keeps
/// its slot with the error text instead of failing the report.
async fn summarize(scope: &ReadScope, catalogue: &[String]) -> Vec<TableSummary> {
    let mut summaries = Vec::with_capacity(catalogue.len());
    for name in catalogue {
        let inspected = match scope.list_columns(name).await {
            Ok(columns) => scope.row_count(name).await.map(|count| (columns, count)),
            Err(error) => Err(error),
        };
        let summary = match inspected {
            Ok((columns, row_count)) => TableSummary {
                name: name.clone(),
                columns,
                row_count: Some(row_count),
                error: None,
            },
            Err(error) => {
                tracing::warn!(table = %name, %error, "table could not be summarized");
                TableSummary {
                    name: name.clone(),
                    columns: Vec::new(),
                    row_count: None,
                    error: Some(error.to_string()),
                }
            }
        };
        summaries.push(summary);
    }
    summaries
}
