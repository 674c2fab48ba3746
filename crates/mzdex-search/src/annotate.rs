//! Mass annotation.
//!
//! Each observed m/z is matched against the metabolite table's mass column
//! with a ppm window. One failing mass never fails the batch: its item carries
//! the error text and no candidates, and the remaining masses carry on.
//!
//! Lookups run on a bounded, order-preserving stream. With a deadline, the
//! batch stops taking new masses once it passes and flags the report; masses
//! already in flight finish normally.

use futures::{StreamExt, future, stream};
use mzdex_core::request::SearchRequest;
use mzdex_core::responses::{AnnotationItem, AnnotationReport};
use mzdex_core::schema::TextScope;
use mzdex_core::values::Record;
use tokio::time::Instant;

use crate::engine::SearchEngine;
use crate::error::SearchError;
use crate::inspector::inspect;
use crate::plan::{PlanOptions, build};
use crate::resolver::resolve;

/// Per-batch annotation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotateOptions {
    pub tolerance_ppm: u32,
    /// Candidates kept per mass.
    pub max_candidates: u32,
    /// Lookups in flight at once. `1` runs strictly in input order.
    pub concurrency: usize,
    /// Stop taking new masses after this instant.
    pub deadline: Option<Instant>,
}

impl AnnotateOptions {
    /// Options seeded from the engine's search configuration.
    #[must_use]
    pub fn from_engine(engine: &SearchEngine) -> Self {
        let search = &engine.config().search;
        Self {
            tolerance_ppm: search.default_tolerance_ppm,
            max_candidates: search.max_candidates,
            concurrency: search.annotation_concurrency,
            deadline: None,
        }
    }
}

impl SearchEngine {
    /// Annotate `masses`, producing one item per processed mass in input order.
    ///
    /// Never fails as a whole. Per-mass failures (non-finite input, missing
    /// metabolite table or mass column, store errors) become error items.
    pub async fn annotate(&self, masses: &[f64], options: &AnnotateOptions) -> AnnotationReport {
        let deadline = options.deadline;
        let items: Vec<AnnotationItem> = stream::iter(masses.iter().copied())
            .take_while(|_| future::ready(deadline.is_none_or(|d| Instant::now() < d)))
            .map(|mz| self.annotate_one(mz, options))
            .buffered(options.concurrency.max(1))
            .collect()
            .await;

        let deadline_exceeded = items.len() < masses.len();
        if deadline_exceeded {
            tracing::warn!(
                processed = items.len(),
                requested = masses.len(),
                "annotation deadline passed"
            );
        }
        let total_annotated = items.len();
        tracing::info!(
            total_annotated,
            matched = items.iter().filter(|i| i.is_annotated()).count(),
            tolerance_ppm = options.tolerance_ppm,
            "annotation finished"
        );

        AnnotationReport {
            items,
            total_annotated,
            tolerance_ppm: options.tolerance_ppm,
            deadline_exceeded,
        }
    }

    async fn annotate_one(&self, mz: f64, options: &AnnotateOptions) -> AnnotationItem {
        match self.candidates_for(mz, options).await {
            Ok(candidates) => AnnotationItem::from_candidates(mz, candidates),
            Err(error) => {
                tracing::warn!(mz, %error, "annotation lookup failed");
                AnnotationItem::failed(mz, error.to_string())
            }
        }
    }

    async fn candidates_for(
        &self,
        mz: f64,
        options: &AnnotateOptions,
    ) -> Result<Vec<Record>, SearchError> {
        let profile = &self.config().metabolites;
        let request = SearchRequest::default().with_mass(mz, options.tolerance_ppm);
        let scope = self.db().read_scope().await?;
        let table = resolve(&scope, &profile.canonical_table, &profile.table_keywords).await?;
        let columns = inspect(&scope, &table).await?;

        // Without a mass column every row would qualify, so this is an error here.
        let plan = build(
            &table,
            &columns,
            &request,
            &PlanOptions {
                text_scope: &TextScope::All,
                mass_keywords: &self.config().search.mass_keywords,
                strict_numeric: true,
            },
        )?;
        let rows = scope
            .fetch(
                &table,
                &columns,
                &plan.predicate,
                None,
                0,
                u64::from(options.max_candidates),
            )
            .await?;
        scope.finish().await?;
        Ok(rows)
    }
}
