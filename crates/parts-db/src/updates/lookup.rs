//! Lookup row update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LookupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<Option<String>>,
}

#[derive(Default)]
pub struct LookupUpdateBuilder(LookupUpdate);

impl LookupUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(LookupUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    #[must_use]
    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    #[must_use]
    pub fn full_name(mut self, val: Option<String>) -> Self {
        self.0.full_name = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> LookupUpdate {
        self.0
    }
}
