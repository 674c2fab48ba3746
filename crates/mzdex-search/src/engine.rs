//! The search engine facade.
//!
//! [`SearchEngine`] owns the database handle and the loaded configuration.
//! Every public call opens its own [`ReadScope`], so the engine can be shared
//! across tasks without locking.

use mzdex_config::{DomainProfile, MzdexConfig};
use mzdex_core::request::{SearchRequest, SortKey};
use mzdex_core::responses::{SearchResponse, TablesResponse};
use mzdex_core::schema::{ColumnInfo, TextScope};
use mzdex_db::MzdexDb;
use mzdex_db::scope::ReadScope;

use crate::error::SearchError;
use crate::executor::execute;
use crate::inspector::{inspect, require_column};
use crate::plan::{PlanOptions, build};
use crate::resolver::resolve;

/// Organism filter values meaning "no filter".
const ALL_ORGANISMS: [&str; 2] = ["all", "все"];

pub struct SearchEngine {
    db: MzdexDb,
    config: MzdexConfig,
}

impl SearchEngine {
    #[must_use]
    pub const fn new(db: MzdexDb, config: MzdexConfig) -> Self {
        Self { db, config }
    }

    #[must_use]
    pub const fn db(&self) -> &MzdexDb {
        &self.db
    }

    #[must_use]
    pub const fn config(&self) -> &MzdexConfig {
        &self.config
    }

    /// Search an explicitly named table.
    ///
    /// Text matching covers the configured generic scope (every column by
    /// default). The table name is taken as given; no keyword resolution.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidRequest`] without a table name or with bad
    /// paging, [`SearchError::TableNotFound`] for an unknown table, and any
    /// planning or query error.
    pub async fn search_table(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let table = request
            .table
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| SearchError::InvalidRequest("a table name is required".into()))?;

        let scope = self.db.read_scope().await?;
        let response = self
            .search_in(&scope, table, request, &self.config.search.generic_text_scope)
            .await?;
        scope.finish().await?;
        Ok(response)
    }

    /// Search the metabolite table, resolved by profile.
    ///
    /// `request.table` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoCandidateTable`] when no metabolite table can
    /// be found, plus any planning or query error.
    pub async fn search_metabolites(
        &self,
        request: &SearchRequest,
    ) -> Result<SearchResponse, SearchError> {
        self.search_domain(&self.config.metabolites, request).await
    }

    /// Search the enzyme table, resolved by profile, optionally narrowed to
    /// one organism type. `"all"` (any case) means no narrowing.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoCandidateTable`] when no enzyme table can be
    /// found, [`SearchError::ColumnNotFound`] when an organism type is given
    /// but the table lacks the filter column, plus any query error.
    pub async fn search_enzymes(
        &self,
        request: &SearchRequest,
        organism_type: Option<&str>,
    ) -> Result<SearchResponse, SearchError> {
        let profile = &self.config.enzymes;
        let organism = organism_type
            .map(str::trim)
            .filter(|o| !o.is_empty() && !is_all_organisms(o));

        match (organism, profile.filter_field.as_deref()) {
            (Some(value), Some(field)) => {
                let narrowed = request.clone().with_filter(field, value);
                self.search_domain(profile, &narrowed).await
            }
            (Some(_), None) => Err(SearchError::InvalidRequest(
                "the enzyme profile has no filter field configured".into(),
            )),
            (None, _) => self.search_domain(profile, request).await,
        }
    }

    /// Every table and view name, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Query`] if the catalogue cannot be read.
    pub async fn tables(&self) -> Result<TablesResponse, SearchError> {
        let scope = self.db.read_scope().await?;
        let tables = scope.list_tables().await?;
        scope.finish().await?;
        Ok(TablesResponse { tables })
    }

    /// Columns of one table.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::TableNotFound`] for an unknown table.
    pub async fn columns(&self, table: &str) -> Result<Vec<ColumnInfo>, SearchError> {
        let scope = self.db.read_scope().await?;
        let columns = inspect(&scope, table).await?;
        scope.finish().await?;
        Ok(columns)
    }

    /// Resolve a profile's table name against the live catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoCandidateTable`] when nothing matches.
    pub async fn resolve_table(&self, profile: &DomainProfile) -> Result<String, SearchError> {
        let scope = self.db.read_scope().await?;
        let table = resolve(&scope, &profile.canonical_table, &profile.table_keywords).await?;
        scope.finish().await?;
        Ok(table)
    }

    async fn search_domain(
        &self,
        profile: &DomainProfile,
        request: &SearchRequest,
    ) -> Result<SearchResponse, SearchError> {
        let scope = self.db.read_scope().await?;
        let table = resolve(&scope, &profile.canonical_table, &profile.table_keywords).await?;
        let response = self
            .search_in(&scope, &table, request, &profile.text_scope())
            .await?;
        scope.finish().await?;
        Ok(response)
    }

    async fn search_in(
        &self,
        scope: &ReadScope,
        table: &str,
        request: &SearchRequest,
        text_scope: &TextScope,
    ) -> Result<SearchResponse, SearchError> {
        let page = request.page()?;
        let columns = inspect(scope, table).await?;
        let sort = request
            .sort
            .as_ref()
            .map(|key| {
                require_column(&columns, &key.column).map(|column| SortKey {
                    column: column.name.clone(),
                    direction: key.direction,
                })
            })
            .transpose()?;

        let options = PlanOptions {
            text_scope,
            mass_keywords: &self.config.search.mass_keywords,
            strict_numeric: self.config.search.strict_numeric_filter,
        };
        let plan = build(table, &columns, request, &options)?;
        let execution = execute(scope, table, &columns, &plan.predicate, page, sort.as_ref()).await?;

        tracing::info!(
            table,
            total = execution.total,
            page = page.page,
            warnings = plan.warnings.len(),
            "search finished"
        );

        Ok(SearchResponse {
            results: execution.rows,
            total: execution.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: execution.total_pages,
            table: table.to_string(),
            columns: columns.into_iter().map(|c| c.name).collect(),
            warnings: plan.warnings,
        })
    }
}

fn is_all_organisms(value: &str) -> bool {
    let lowered = value.to_lowercase();
    ALL_ORGANISMS.contains(&lowered.as_str())
}
