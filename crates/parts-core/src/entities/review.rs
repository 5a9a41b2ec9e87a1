use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A review of a component or of one of its annotated qualifications.
///
/// `date` is set once when the review is created.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    pub component_id: Option<i64>,
    pub annotated_qualification_id: Option<i64>,
    pub reviewer_id: i64,
    pub date: DateTime<Utc>,
}
