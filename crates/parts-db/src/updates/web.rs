//! Web entity update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct WebEntityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Default)]
pub struct WebEntityUpdateBuilder(WebEntityUpdate);

impl WebEntityUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(WebEntityUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    #[must_use]
    pub fn url(mut self, val: impl Into<String>) -> Self {
        self.0.url = Some(val.into());
        self
    }

    #[must_use]
    pub fn build(self) -> WebEntityUpdate {
        self.0
    }
}
