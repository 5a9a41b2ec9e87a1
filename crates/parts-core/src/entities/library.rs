use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default library path.
pub const DEFAULT_LIBRARY_PATH: &str = "Some Library";

/// Default footprint node path.
pub const DEFAULT_FNODE_PATH: &str = "Some FNode";

/// A schematic symbol library entry. `reference` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Library {
    pub id: i64,
    pub reference: String,
    pub path: String,
}

/// A footprint node. `reference` is unique. Attached to base components
/// through ordered memberships.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FNode {
    pub id: i64,
    pub reference: String,
    pub path: String,
}
