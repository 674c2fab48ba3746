//! # mzdex-db
//!
//! libSQL storage adapter for mzdex.
//!
//! The engine treats the database as an external, read-only collaborator that
//! can list tables, list a table's columns, count and fetch rows matching a
//! [`mzdex_core::predicate::Predicate`], and scope those calls to one read
//! transaction. This crate provides exactly that:
//!
//! - [`MzdexDb`] opens the database file and hands out per-request scopes.
//! - [`scope::ReadScope`] owns one connection and one read transaction.
//! - [`compile`] turns predicate trees into parameterized SQL.
//!
//! Uses the `libsql` crate (C `SQLite` fork).

pub mod compile;
pub mod error;
pub mod helpers;
pub mod scope;

use error::DatabaseError;
use libsql::Builder;
use scope::ReadScope;

/// Handle on a local database file.
///
/// Holds no connection of its own: every [`MzdexDb::read_scope`] call opens a
/// fresh connection, so concurrent requests never share a cursor.
pub struct MzdexDb {
    db: libsql::Database,
    path: String,
}

impl MzdexDb {
    /// Open (or create) a local database file.
    ///
    /// `":memory:"` is accepted but every connection then sees its own empty
    /// database, which makes it useless for read scopes.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        tracing::debug!(path, "opened database");
        Ok(Self {
            db,
            path: path.to_string(),
        })
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Open a plain read-write connection (fixtures, imports, tests).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a connection cannot be established.
    pub fn connect(&self) -> Result<libsql::Connection, DatabaseError> {
        Ok(self.db.connect()?)
    }

    /// Begin a read-only scope on a new connection.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection or transaction cannot be opened.
    pub async fn read_scope(&self) -> Result<ReadScope, DatabaseError> {
        ReadScope::begin(self.db.connect()?).await
    }
}
