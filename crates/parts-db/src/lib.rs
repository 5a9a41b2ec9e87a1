//! # parts-db
//!
//! libSQL storage for the parts catalog.
//!
//! Handles all relational state: users, reference data (companies, links,
//! lookups, packages, libraries, footprint nodes), components with their audit
//! fields, ordered link/footprint memberships, qualifications, reviews and
//! classification categories. Every mutation goes through [`service::PartsService`],
//! which runs it inside one immediate transaction.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::time::Duration;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and its single connection.
pub struct PartsDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl PartsDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        if path != ":memory:" {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| DatabaseError::Other(e.into()))?;
                }
            }
        }

        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let parts_db = Self { db, conn };
        parts_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(parts_db)
    }

    /// Set how long a write waits on a database locked by another process.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection rejects the setting.
    pub fn set_busy_timeout(&self, timeout: Duration) -> Result<(), DatabaseError> {
        self.conn.busy_timeout(timeout)?;
        Ok(())
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
