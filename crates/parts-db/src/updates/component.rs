//! Component update builder.

use parts_core::entities::Component;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ComponentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autogenerate_description: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autogenerate_value: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle_state_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mpn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mounting_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_id: Option<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<Option<f64>>,
}

impl ComponentUpdate {
    /// Copy every `Some` field onto `component`. Audit fields are untouched.
    pub fn apply_to(&self, component: &mut Component) {
        let base = &mut component.base;
        if let Some(v) = self.type_id {
            base.type_id = v;
        }
        if let Some(v) = self.library_id {
            base.library_id = v;
        }
        if let Some(v) = &self.description {
            base.description.clone_from(v);
        }
        if let Some(v) = &self.value {
            base.value.clone_from(v);
        }
        if let Some(v) = self.autogenerate_description {
            base.autogenerate_description = v;
        }
        if let Some(v) = self.autogenerate_value {
            base.autogenerate_value = v;
        }
        if let Some(v) = self.lifecycle_state_id {
            component.lifecycle_state_id = v;
        }
        if let Some(v) = self.manufacturer_id {
            component.manufacturer_id = v;
        }
        if let Some(v) = &self.mpn {
            component.mpn.clone_from(v);
        }
        if let Some(v) = self.mounting_type_id {
            component.mounting_type_id = v;
        }
        if let Some(v) = self.package_id {
            component.package_id = v;
        }
        if let Some(v) = &self.remarks {
            component.remarks.clone_from(v);
        }
        if let Some(v) = self.stock {
            component.stock = v;
        }
        if let Some(v) = self.x {
            component.x = v;
        }
        if let Some(v) = self.y {
            component.y = v;
        }
        if let Some(v) = self.z {
            component.z = v;
        }
    }
}

#[derive(Default)]
pub struct ComponentUpdateBuilder(ComponentUpdate);

impl ComponentUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ComponentUpdate::default())
    }

    #[must_use]
    pub fn type_id(mut self, val: i64) -> Self {
        self.0.type_id = Some(val);
        self
    }

    #[must_use]
    pub fn library_id(mut self, val: i64) -> Self {
        self.0.library_id = Some(val);
        self
    }

    #[must_use]
    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    #[must_use]
    pub fn value(mut self, val: Option<String>) -> Self {
        self.0.value = Some(val);
        self
    }

    #[must_use]
    pub fn autogenerate_description(mut self, val: bool) -> Self {
        self.0.autogenerate_description = Some(val);
        self
    }

    #[must_use]
    pub fn autogenerate_value(mut self, val: bool) -> Self {
        self.0.autogenerate_value = Some(val);
        self
    }

    #[must_use]
    pub fn lifecycle_state_id(mut self, val: i64) -> Self {
        self.0.lifecycle_state_id = Some(val);
        self
    }

    #[must_use]
    pub fn manufacturer_id(mut self, val: i64) -> Self {
        self.0.manufacturer_id = Some(val);
        self
    }

    #[must_use]
    pub fn mpn(mut self, val: impl Into<String>) -> Self {
        self.0.mpn = Some(val.into());
        self
    }

    #[must_use]
    pub fn mounting_type_id(mut self, val: i64) -> Self {
        self.0.mounting_type_id = Some(val);
        self
    }

    #[must_use]
    pub fn package_id(mut self, val: Option<i64>) -> Self {
        self.0.package_id = Some(val);
        self
    }

    #[must_use]
    pub fn remarks(mut self, val: Option<String>) -> Self {
        self.0.remarks = Some(val);
        self
    }

    #[must_use]
    pub fn stock(mut self, val: u32) -> Self {
        self.0.stock = Some(val);
        self
    }

    #[must_use]
    pub fn dimensions(mut self, x: Option<f64>, y: Option<f64>, z: Option<f64>) -> Self {
        self.0.x = Some(x);
        self.0.y = Some(y);
        self.0.z = Some(z);
        self
    }

    #[must_use]
    pub fn build(self) -> ComponentUpdate {
        self.0
    }
}
