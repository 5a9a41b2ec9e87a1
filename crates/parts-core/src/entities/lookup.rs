use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::LookupKind;

/// An enum-like reference row (type, qualification, mounting type, lifecycle
/// state). `name` is unique within its kind.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Lookup {
    pub id: i64,
    pub kind: LookupKind,
    pub name: String,
    pub description: Option<String>,
    pub full_name: Option<String>,
}
