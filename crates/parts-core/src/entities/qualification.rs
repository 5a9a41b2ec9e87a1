use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A qualification held by a component, with an optional free-text note.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AnnotatedQualification {
    pub id: i64,
    pub component_id: i64,
    pub qualification_id: i64,
    pub annotation: Option<String>,
}
