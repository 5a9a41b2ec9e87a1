//! Database error types for parts-db.

use parts_core::enums::EntityKind;
use parts_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A typed domain failure: duplicate, referential integrity, out of range,
    /// not found or validation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// The domain failure carried by this error, if any.
    #[must_use]
    pub const fn core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self.core(), Some(err) if err.is_duplicate())
    }

    #[must_use]
    pub const fn is_referential(&self) -> bool {
        matches!(self.core(), Some(err) if err.is_referential())
    }

    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self.core(), Some(err) if err.is_out_of_range())
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.core(), Some(CoreError::NotFound { .. }))
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.core(), Some(CoreError::Validation(_)))
    }

    /// Not-found failure for `entity` with `id`.
    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        Self::Core(CoreError::NotFound {
            entity: entity.as_str().to_string(),
            id,
        })
    }

    /// Validation failure raised before touching the store.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Core(CoreError::Validation(msg.into()))
    }
}

/// Map a libSQL error raised while writing `entity` into a typed failure.
///
/// SQLite reports constraint violations only through the message text, so
/// classification matches on the fixed prefixes it uses.
pub fn classify(entity: EntityKind, err: libsql::Error) -> DatabaseError {
    let msg = err.to_string();
    if msg.contains("UNIQUE constraint failed") {
        tracing::warn!(entity = entity.as_str(), %msg, "uniqueness violation");
        DatabaseError::Core(CoreError::Duplicate {
            entity: entity.as_str().to_string(),
            detail: msg,
        })
    } else if msg.contains("FOREIGN KEY constraint failed") {
        tracing::warn!(entity = entity.as_str(), %msg, "referential integrity violation");
        DatabaseError::Core(CoreError::ReferentialIntegrity {
            entity: entity.as_str().to_string(),
            detail: msg,
        })
    } else if msg.contains("CHECK constraint failed") {
        DatabaseError::Core(CoreError::Validation(msg))
    } else {
        DatabaseError::LibSql(err)
    }
}

/// Shorthand for `.map_err(on(EntityKind::X))`.
pub fn on(entity: EntityKind) -> impl Fn(libsql::Error) -> DatabaseError {
    move |err| classify(entity, err)
}
