use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An acting user. Audited rows and reviews point at users; a user cannot be
/// deleted while anything still does.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
