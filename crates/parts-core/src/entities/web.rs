use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::WebKind;

/// A company or a link: identified by its `(name, url)` pair, which is unique
/// within its kind.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WebEntity {
    pub id: i64,
    pub kind: WebKind,
    pub name: String,
    pub url: String,
}
