//! Repository modules implementing CRUD operations for all catalog entities.
//!
//! Each module adds methods to `PartsService` via `impl PartsService` blocks.
//! Public methods take the service gate; the `pub(crate)` fetch helpers take a
//! connection so they can run inside a caller's transaction.

pub mod category;
pub mod component;
pub mod library;
pub mod lookup;
pub mod membership;
pub mod package;
pub mod qualification;
pub mod review;
pub mod user;
pub mod web;

/// Run a `SELECT COUNT(*)`-style query and return the single integer.
pub(crate) async fn count(
    conn: &libsql::Connection,
    sql: &str,
    params: impl libsql::params::IntoParams,
) -> Result<i64, crate::error::DatabaseError> {
    let mut rows = conn.query(sql, params).await?;
    let row = rows
        .next()
        .await?
        .ok_or(crate::error::DatabaseError::NoResult)?;
    Ok(row.get::<i64>(0)?)
}
