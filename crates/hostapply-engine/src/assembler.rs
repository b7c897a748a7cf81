//! Plan assembly: expected host record and minimal diff.

use std::collections::BTreeMap;

use hostapply_core::models::{
    AttributeCatalog, AttributeMap, AttributeValue, ConflictField, HostGroupMembership, HostPlan,
    UpdateField,
};
use hostapply_core::traits::ValueEquality;
use hostapply_core::types::AttributeId;

use crate::detector::Detection;
use crate::resolver::Resolution;

/// Merges rule and resolver values into a host's current snapshot.
pub struct PlanAssembler<'e> {
    equality: &'e dyn ValueEquality,
    catalog: Option<&'e AttributeCatalog>,
}

impl<'e> PlanAssembler<'e> {
    pub fn new(equality: &'e dyn ValueEquality, catalog: Option<&'e AttributeCatalog>) -> Self {
        Self { equality, catalog }
    }

    /// Build the plan for one host.
    ///
    /// `expect_host` starts as a copy of `current` (empty when the snapshot is
    /// absent). Every unambiguous rule value and every resolved conflict value
    /// is written into it; only writes that change the current value end up in
    /// `update_fields`. Open conflicts leave the attribute untouched.
    pub fn assemble(
        &self,
        membership: &HostGroupMembership,
        current: Option<&AttributeMap>,
        detection: Detection,
        resolution: Resolution,
    ) -> HostPlan {
        let Detection {
            unambiguous,
            mut conflicts,
        } = detection;

        let mut writes: BTreeMap<AttributeId, AttributeValue> = unambiguous;
        writes.extend(resolution.resolved);

        let mut expect_host = current.cloned().unwrap_or_default();
        let mut update_fields = Vec::new();
        for (attribute_id, value) in writes {
            let unchanged = expect_host
                .get(&attribute_id)
                .is_some_and(|existing| self.equality.same(existing, &value));
            if unchanged {
                continue;
            }
            expect_host.insert(attribute_id, value.clone());
            update_fields.push(UpdateField {
                attribute_id,
                property_id: self.property_id(attribute_id),
                property_value: value,
            });
        }

        for conflict in &mut conflicts {
            self.finish_conflict(conflict, current);
        }

        HostPlan {
            host_id: membership.host_id,
            module_ids: membership.module_ids.clone(),
            expect_host,
            update_fields,
            conflict_fields: conflicts,
            unresolved_conflict_count: resolution.unresolved_count,
        }
    }

    fn finish_conflict(&self, conflict: &mut ConflictField, current: Option<&AttributeMap>) {
        conflict.property_id = self.property_id(conflict.attribute_id);
        if conflict.unresolved_conflict_exist {
            conflict.property_value = current.and_then(|c| c.get(&conflict.attribute_id)).cloned();
        }
    }

    fn property_id(&self, attribute_id: AttributeId) -> Option<String> {
        self.catalog
            .and_then(|c| c.property_id(attribute_id))
            .map(str::to_string)
    }
}
