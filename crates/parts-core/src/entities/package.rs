use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A physical package outline (e.g. `SOT-23`). `name` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Package {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}
