//! Service layer running every catalog mutation inside one transaction.
//!
//! `PartsService` wraps `PartsDb` (raw database access) and a `Clock`. All repo
//! methods are implemented as `impl PartsService` blocks in `crate::repos`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parts_config::DatabaseConfig;
use parts_core::clock::{Clock, SystemClock};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::PartsDb;
use crate::error::DatabaseError;

/// Orchestrates database mutations.
///
/// Every mutation method follows this protocol:
/// 1. Take the write gate (excludes readers and other writers)
/// 2. Begin an immediate transaction
/// 3. Stamp audit fields / plan sibling shifts and execute SQL
/// 4. Commit, or roll back on any error
///
/// Readers take the gate shared, so no read observes a half-applied reorder.
pub struct PartsService {
    db: PartsDb,
    clock: Arc<dyn Clock>,
    gate: RwLock<()>,
}

impl PartsService {
    /// Create a new service over a local database using the system clock.
    ///
    /// # Arguments
    ///
    /// * `db_path`: path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = PartsDb::open_local(db_path).await?;
        Ok(Self::from_db(db, Arc::new(SystemClock)))
    }

    /// Create a service from the `[database]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or configured.
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let db = PartsDb::open_local(&config.path).await?;
        db.set_busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        Ok(Self::from_db(db, Arc::new(SystemClock)))
    }

    /// Create from an existing `PartsDb` and clock (tests pass a manual clock).
    #[must_use]
    pub fn from_db(db: PartsDb, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            clock,
            gate: RwLock::new(()),
        }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &PartsDb {
        &self.db
    }

    /// Current time according to the service clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Shared access for reads.
    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, ()> {
        self.gate.read().await
    }

    /// Exclusive access plus an open immediate transaction.
    pub(crate) async fn begin_write(&self) -> Result<WriteTx<'_>, DatabaseError> {
        let gate = self.gate.write().await;
        let tx = self
            .db
            .conn()
            .transaction_with_behavior(libsql::TransactionBehavior::Immediate)
            .await?;
        Ok(WriteTx { gate, tx })
    }
}

/// An open write transaction holding the service's write gate.
pub(crate) struct WriteTx<'a> {
    gate: RwLockWriteGuard<'a, ()>,
    tx: libsql::Transaction,
}

impl WriteTx<'_> {
    pub(crate) fn conn(&self) -> &libsql::Connection {
        &self.tx
    }

    /// Commit on `Ok`, roll back on `Err`, then release the gate.
    pub(crate) async fn finish<T>(
        self,
        result: Result<T, DatabaseError>,
    ) -> Result<T, DatabaseError> {
        let Self { gate, tx } = self;
        let out = match result {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(%rollback, "rollback failed after {err}");
                }
                Err(err)
            }
        };
        drop(gate);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parts_core::clock::ManualClock;

    #[tokio::test]
    async fn service_new_local() {
        let svc = PartsService::new_local(":memory:").await.unwrap();
        assert!(svc.now() <= Utc::now());
    }

    #[tokio::test]
    async fn from_db_uses_given_clock() {
        let start = Utc::now() - chrono::Duration::days(1);
        let db = PartsDb::open_local(":memory:").await.unwrap();
        let svc = PartsService::from_db(db, Arc::new(ManualClock::new(start)));
        assert_eq!(svc.now(), start);
    }

    #[tokio::test]
    async fn failed_write_rolls_back() {
        let svc = PartsService::new_local(":memory:").await.unwrap();

        let w = svc.begin_write().await.unwrap();
        let result: Result<(), DatabaseError> = async {
            w.conn()
                .execute("INSERT INTO packages (name) VALUES ('SOT-23')", ())
                .await?;
            Err(DatabaseError::InvalidState("abort".into()))
        }
        .await;
        assert!(w.finish(result).await.is_err());

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM packages", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<i64>(0).unwrap(), 0);
    }

    #[tokio::test]
    async fn from_config_opens_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            path: dir.path().join("parts.db").to_string_lossy().into_owned(),
            busy_timeout_ms: 50,
        };
        let svc = PartsService::from_config(&config).await.unwrap();
        svc.db()
            .conn()
            .execute("INSERT INTO packages (name) VALUES ('0603')", ())
            .await
            .unwrap();
        assert!(dir.path().join("parts.db").exists());
    }
}
