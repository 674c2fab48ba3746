//! Read scopes: one connection and one read transaction per logical request.
//!
//! A [`ReadScope`] owns a fresh connection with `query_only` enabled and an
//! open deferred transaction. Every query issued through it (catalogue, schema,
//! count, fetch) observes the same snapshot, so a page and its total never
//! drift apart. Dropping the scope rolls the transaction back and releases the
//! connection; [`ReadScope::finish`] ends it explicitly.

use mzdex_core::predicate::Predicate;
use mzdex_core::request::SortKey;
use mzdex_core::schema::ColumnInfo;
use mzdex_core::values::Record;
use tracing::debug;

use crate::compile::{compile, order_by, quote_ident};
use crate::error::DatabaseError;
use crate::helpers::{get_count, row_to_record, sql_int};

pub struct ReadScope {
    tx: libsql::Transaction,
}

impl ReadScope {
    pub(crate) async fn begin(conn: libsql::Connection) -> Result<Self, DatabaseError> {
        conn.execute("PRAGMA query_only = ON", ())
            .await
            .map_err(|e| DatabaseError::Query(format!("PRAGMA query_only: {e}")))?;
        let tx = conn.transaction().await?;
        Ok(Self { tx })
    }

    /// End the read transaction.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction cannot be closed.
    pub async fn finish(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        Ok(())
    }

    /// All user tables and views, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the catalogue query fails.
    pub async fn list_tables(&self) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .tx
            .query(
                "SELECT name FROM sqlite_master
                 WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite_%'
                 ORDER BY name",
                (),
            )
            .await?;
        let mut tables = Vec::new();
        while let Some(row) = rows.next().await? {
            tables.push(row.get::<String>(0)?);
        }
        Ok(tables)
    }

    /// Columns of `table` in declaration order. Empty when the table is absent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the pragma query fails.
    pub async fn list_columns(&self, table: &str) -> Result<Vec<ColumnInfo>, DatabaseError> {
        let mut rows = self
            .tx
            .query(
                "SELECT name, type FROM pragma_table_info(?1) ORDER BY cid",
                [table],
            )
            .await?;
        let mut columns = Vec::new();
        while let Some(row) = rows.next().await? {
            let declared = row.get::<Option<String>>(1)?.unwrap_or_default();
            columns.push(ColumnInfo::new(row.get::<String>(0)?, declared));
        }
        Ok(columns)
    }

    /// Number of rows in `table` satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::UnknownColumn` if the predicate names a column
    /// outside `columns`, or `DatabaseError` if the query fails.
    pub async fn count(
        &self,
        table: &str,
        columns: &[ColumnInfo],
        predicate: &Predicate,
    ) -> Result<u64, DatabaseError> {
        check_columns(table, columns, predicate.columns())?;
        let clause = compile(predicate);
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE {}",
            quote_ident(table),
            clause.sql
        );
        debug!(%sql, params = clause.params.len(), "count");

        let mut rows = self
            .tx
            .query(&sql, libsql::params_from_iter(clause.params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row)
    }

    /// Rows of `table` satisfying `predicate`, projected onto `columns` in
    /// order, skipping `offset` rows and returning at most `limit`.
    ///
    /// Without a sort key rows come back in the store's natural order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::UnknownColumn` if the predicate or sort key names
    /// a column outside `columns`, or `DatabaseError` if the query fails.
    pub async fn fetch(
        &self,
        table: &str,
        columns: &[ColumnInfo],
        predicate: &Predicate,
        sort: Option<&SortKey>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Record>, DatabaseError> {
        check_columns(table, columns, predicate.columns())?;
        if let Some(key) = sort {
            check_columns(table, columns, [key.column.as_str()])?;
        }
        if columns.is_empty() {
            return Err(DatabaseError::Query(format!(
                "table '{table}' has no columns to project"
            )));
        }

        let clause = compile(predicate);
        let projection = columns
            .iter()
            .map(|c| quote_ident(&c.name))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {projection} FROM {} WHERE {}{} LIMIT ? OFFSET ?",
            quote_ident(table),
            clause.sql,
            order_by(sort)
        );
        debug!(%sql, offset, limit, "fetch");

        let mut params = clause.params;
        params.push(sql_int(limit));
        params.push(sql_int(offset));

        let mut rows = self
            .tx
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(row_to_record(&row, columns)?);
        }
        Ok(records)
    }

    /// Unfiltered row count of `table`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails (e.g. the table is absent).
    pub async fn row_count(&self, table: &str) -> Result<u64, DatabaseError> {
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        let mut rows = self.tx.query(&sql, ()).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        get_count(&row)
    }
}

fn check_columns<'a>(
    table: &str,
    columns: &[ColumnInfo],
    referenced: impl IntoIterator<Item = &'a str>,
) -> Result<(), DatabaseError> {
    for name in referenced {
        if !columns.iter().any(|c| c.name == name) {
            return Err(DatabaseError::UnknownColumn {
                table: table.to_string(),
                column: name.to_string(),
            });
        }
    }
    Ok(())
}
