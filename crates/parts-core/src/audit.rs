//! Audit fields and their stamping rules.
//!
//! An audited row records who created it and when, and who touched it last
//! and when. The rules:
//!
//! - On insert, `created` and `last_modified` take the pre-supplied value if
//!   there is one, otherwise "now". `creator` and `last_modifier` are both the
//!   acting user.
//! - On every later save, `last_modified` becomes "now" and `last_modifier`
//!   the acting user. `created` and `creator` never change.
//!
//! The service calls these functions explicitly inside the write transaction.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Timestamps a caller may pre-supply for a row that has not been saved yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuditDraft {
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Provenance carried by every audited entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuditFields {
    pub creator_id: i64,
    pub created: DateTime<Utc>,
    pub last_modifier_id: i64,
    pub last_modified: DateTime<Utc>,
}

impl AuditFields {
    /// Stamp a row that has no persisted identity yet.
    #[must_use]
    pub fn for_insert(actor_id: i64, draft: AuditDraft, now: DateTime<Utc>) -> Self {
        Self {
            creator_id: actor_id,
            created: stamp_once(draft.created, now),
            last_modifier_id: actor_id,
            last_modified: draft.last_modified.unwrap_or(now),
        }
    }

    /// Stamp a save of an already persisted row.
    pub const fn touch(&mut self, actor_id: i64, now: DateTime<Utc>) {
        self.last_modifier_id = actor_id;
        self.last_modified = now;
    }
}

/// Assign a set-once timestamp: keep a pre-supplied value, else use `now`.
///
/// Used for `created` and for a review's `date`.
#[must_use]
pub fn stamp_once(supplied: Option<DateTime<Utc>>, now: DateTime<Utc>) -> DateTime<Utc> {
    supplied.unwrap_or(now)
}

/// Entities composed with `AuditFields`.
pub trait Audited {
    fn audit(&self) -> &AuditFields;
    fn audit_mut(&mut self) -> &mut AuditFields;

    fn touch(&mut self, actor_id: i64, now: DateTime<Utc>) {
        self.audit_mut().touch(actor_id, now);
    }
}
