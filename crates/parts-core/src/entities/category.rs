use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::EntityKind;

/// A classification bucket for one entity kind. `(name, content_type)` is
/// unique.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub content_type: EntityKind,
}

/// A tag inside a category. `(category_id, name)` is unique.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
}
