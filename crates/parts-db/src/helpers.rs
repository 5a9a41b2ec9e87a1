//! Row-to-entity parsing helpers and table naming.
//!
//! Every repo needs to convert `libsql::Row` (column-indexed) into typed entity
//! structs. These helpers isolate the parsing logic. Timestamps are stored as
//! fixed-width RFC 3339 text with nanoseconds so lexical order is time order.

use chrono::{DateTime, SecondsFormat, Utc};
use parts_core::enums::{EntityKind, LookupKind, MembershipKind, WebKind};

use crate::error::DatabaseError;

/// Format a timestamp for storage.
#[must_use]
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 (`"2026-02-09T14:30:00Z"`) and `SQLite`'s default
/// format (`"2026-02-09 14:30:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all parts-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER column that must fit a `u32` (orders, stock counts).
///
/// # Errors
///
/// Returns `DatabaseError::InvalidState` for negative or oversized values.
pub fn get_u32(row: &libsql::Row, idx: i32) -> Result<u32, DatabaseError> {
    let raw = row.get::<i64>(idx)?;
    u32::try_from(raw)
        .map_err(|_| DatabaseError::InvalidState(format!("column {idx} holds {raw}, expected u32")))
}

/// Read an INTEGER column holding a boolean flag.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Map `EntityKind` to the corresponding SQL table name.
///
/// Exhaustive match: adding a new `EntityKind` variant forces updating this.
#[must_use]
pub const fn entity_kind_to_table(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::User => "users",
        EntityKind::Company => "companies",
        EntityKind::Link => "links",
        EntityKind::Type => "types",
        EntityKind::Qualification => "qualifications",
        EntityKind::MountingType => "mounting_types",
        EntityKind::LifecycleState => "lifecycle_states",
        EntityKind::Package => "packages",
        EntityKind::Library => "libraries",
        EntityKind::FNode => "f_nodes",
        EntityKind::BaseComponent => "base_components",
        EntityKind::Component => "components",
        EntityKind::OrderedLink => "ordered_links",
        EntityKind::OrderedFNode => "ordered_f_nodes",
        EntityKind::AnnotatedQualification => "annotated_qualifications",
        EntityKind::Review => "reviews",
        EntityKind::Category => "categories",
        EntityKind::Tag => "tags",
    }
}

#[must_use]
pub const fn lookup_table(kind: LookupKind) -> &'static str {
    entity_kind_to_table(kind.entity())
}

#[must_use]
pub const fn web_table(kind: WebKind) -> &'static str {
    entity_kind_to_table(kind.entity())
}

/// Join table and child column of a membership kind.
#[must_use]
pub const fn membership_columns(kind: MembershipKind) -> (&'static str, &'static str) {
    match kind {
        MembershipKind::Link => ("ordered_links", "link_id"),
        MembershipKind::FNode => ("ordered_f_nodes", "f_node_id"),
    }
}
