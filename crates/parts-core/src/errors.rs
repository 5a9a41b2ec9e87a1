//! Cross-cutting error types for the parts catalog.
//!
//! Store-specific errors (`DatabaseError`) live in `parts-db` and wrap
//! `CoreError`, so callers can match on the same typed failures whether they
//! come from validation in this crate or from a constraint in the store.

use thiserror::Error;

/// Errors that can be raised by any catalog crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A uniqueness constraint was violated.
    #[error("Duplicate {entity}: {detail}")]
    Duplicate { entity: String, detail: String },

    /// A required reference is missing, or a referenced row is being deleted.
    #[error("Referential integrity violated for {entity}: {detail}")]
    ReferentialIntegrity { entity: String, detail: String },

    /// A reorder position lies outside the valid bounds of its parent scope.
    #[error("Out of range in {scope}: {detail}")]
    OutOfRange { scope: String, detail: String },

    /// Entity lookup returned no result.
    #[error("Entity not found: {entity} {id}")]
    NotFound { entity: String, id: i64 },

    /// Data failed validation before reaching the store.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// A position that does not fit the `len` rows of `scope`.
    pub fn position_out_of_range(scope: impl Into<String>, position: u32, len: u32) -> Self {
        Self::OutOfRange {
            scope: scope.into(),
            detail: format!("position {position} is outside 0..={len}"),
        }
    }

    /// A membership id that does not exist in `scope`.
    pub fn missing_membership(scope: impl Into<String>, id: i64) -> Self {
        Self::OutOfRange {
            scope: scope.into(),
            detail: format!("membership {id} does not exist"),
        }
    }

    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    #[must_use]
    pub const fn is_referential(&self) -> bool {
        matches!(self, Self::ReferentialIntegrity { .. })
    }

    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}
