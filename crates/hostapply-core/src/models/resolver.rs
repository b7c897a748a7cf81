//! Caller-supplied conflict resolutions.

use serde::{Deserialize, Serialize};

use super::value::AttributeValue;
use crate::types::{AttributeId, HostId};

/// An explicit value chosen for one conflicting attribute on one host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictResolver {
    pub host_id: HostId,
    pub attribute_id: AttributeId,
    pub property_value: AttributeValue,
}

impl ConflictResolver {
    /// Build from raw ids.
    pub fn new(host_id: i64, attribute_id: i64, property_value: impl Into<AttributeValue>) -> Self {
        Self {
            host_id: HostId(host_id),
            attribute_id: AttributeId(attribute_id),
            property_value: property_value.into(),
        }
    }
}
