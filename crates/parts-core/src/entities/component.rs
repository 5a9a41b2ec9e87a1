use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::audit::{AuditFields, Audited};

/// The part-agnostic half of a component: its type, symbol library and
/// descriptive text. Ordered links and footprint nodes hang off this row.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BaseComponent {
    pub id: i64,
    pub type_id: i64,
    pub library_id: i64,
    pub description: Option<String>,
    pub value: Option<String>,
    pub autogenerate_description: bool,
    pub autogenerate_value: bool,
}

/// A concrete manufacturer part. Shares its id with its `BaseComponent`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Component {
    #[serde(flatten)]
    pub base: BaseComponent,
    #[serde(flatten)]
    pub audit: AuditFields,
    pub lifecycle_state_id: i64,
    pub manufacturer_id: i64,
    pub mpn: String,
    pub mounting_type_id: i64,
    pub package_id: Option<i64>,
    pub remarks: Option<String>,
    pub stock: u32,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
}

impl Component {
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.base.id
    }
}

impl Audited for Component {
    fn audit(&self) -> &AuditFields {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut AuditFields {
        &mut self.audit
    }
}
