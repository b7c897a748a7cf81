//! Optional attribute metadata supplied by the model subsystem.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::AttributeId;

/// What the planner needs to know about one host attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDef {
    /// Field name on the host record, e.g. `bk_host_name`.
    pub property_id: String,
    /// Whether auto-apply rules may target this attribute.
    pub host_apply_allowed: bool,
}

/// Attribute definitions keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeCatalog {
    pub attributes: BTreeMap<AttributeId, AttributeDef>,
}

impl AttributeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(
        mut self,
        attribute_id: i64,
        property_id: &str,
        host_apply_allowed: bool,
    ) -> Self {
        self.attributes.insert(
            AttributeId(attribute_id),
            AttributeDef {
                property_id: property_id.to_string(),
                host_apply_allowed,
            },
        );
        self
    }

    pub fn get(&self, attribute_id: AttributeId) -> Option<&AttributeDef> {
        self.attributes.get(&attribute_id)
    }

    /// Whether rules for this attribute may be applied.
    pub fn allows(&self, attribute_id: AttributeId) -> bool {
        self.get(attribute_id).is_some_and(|def| def.host_apply_allowed)
    }

    /// Host record field name for the attribute, if known.
    pub fn property_id(&self, attribute_id: AttributeId) -> Option<&str> {
        self.get(attribute_id).map(|def| def.property_id.as_str())
    }
}
