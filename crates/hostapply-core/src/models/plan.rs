//! Planner output.

use serde::{Deserialize, Serialize};

use super::rule::{Rule, RuleScope};
use super::value::{AttributeMap, AttributeValue};
use crate::types::{AttributeId, HostId, ModuleId, RuleId};

/// One rule competing for an attribute on a host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRule {
    pub rule_id: RuleId,
    pub scope: RuleScope,
    /// Host module through which the rule was reached.
    pub source_module: ModuleId,
    pub value: AttributeValue,
}

/// An attribute whose applicable rules disagree for one host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictField {
    pub attribute_id: AttributeId,
    pub property_id: Option<String>,
    /// Resolver value when resolved, otherwise the host's current value.
    pub property_value: Option<AttributeValue>,
    pub candidate_rules: Vec<CandidateRule>,
    pub unresolved_conflict_exist: bool,
}

/// A field the executor has to write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateField {
    pub attribute_id: AttributeId,
    pub property_id: Option<String>,
    pub property_value: AttributeValue,
}

/// The computed changes for one host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostPlan {
    pub host_id: HostId,
    pub module_ids: Vec<ModuleId>,
    /// Current snapshot with `update_fields` applied.
    pub expect_host: AttributeMap,
    pub update_fields: Vec<UpdateField>,
    pub conflict_fields: Vec<ConflictField>,
    pub unresolved_conflict_count: i64,
}

impl HostPlan {
    /// An untouched plan for a host no rule applies to.
    pub fn empty(host_id: HostId, module_ids: Vec<ModuleId>, current: Option<&AttributeMap>) -> Self {
        Self {
            host_id,
            module_ids,
            expect_host: current.cloned().unwrap_or_default(),
            update_fields: Vec::new(),
            conflict_fields: Vec::new(),
            unresolved_conflict_count: 0,
        }
    }

    pub fn has_updates(&self) -> bool {
        !self.update_fields.is_empty()
    }

    pub fn has_unresolved_conflicts(&self) -> bool {
        self.unresolved_conflict_count > 0
    }

    /// Attribute ids of conflicts that are still open.
    pub fn unresolved_attributes(&self) -> Vec<AttributeId> {
        self.conflict_fields
            .iter()
            .filter(|c| c.unresolved_conflict_exist)
            .map(|c| c.attribute_id)
            .collect()
    }

    /// The writes as an attribute map.
    pub fn update_data(&self) -> AttributeMap {
        self.update_fields
            .iter()
            .map(|f| (f.attribute_id, f.property_value.clone()))
            .collect()
    }
}

/// Hosts that receive exactly the same writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateBatch {
    pub host_ids: Vec<HostId>,
    pub updates: Vec<UpdateField>,
}

/// Result of one planning invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub plans: Vec<HostPlan>,
    /// Sum of open conflicts over all hosts.
    pub unresolved_conflict_count: i64,
    /// Number of hosts with at least one open conflict.
    pub hosts_with_unresolved_conflicts: usize,
    /// Number of hosts planned.
    pub host_count: usize,
    /// The rule set in force for this run, after edits.
    pub effective_rules: Option<Vec<Rule>>,
}

impl PlanResult {
    pub fn has_unresolved_conflicts(&self) -> bool {
        self.unresolved_conflict_count > 0
    }

    pub fn plan_for(&self, host_id: HostId) -> Option<&HostPlan> {
        self.plans.iter().find(|p| p.host_id == host_id)
    }

    /// Group hosts with identical writes, in first-seen order.
    /// Hosts with nothing to write are left out.
    pub fn update_batches(&self) -> Vec<UpdateBatch> {
        let mut batches: Vec<UpdateBatch> = Vec::new();
        for plan in self.plans.iter().filter(|p| p.has_updates()) {
            match batches.iter_mut().find(|b| b.updates == plan.update_fields) {
                Some(batch) => batch.host_ids.push(plan.host_id),
                None => batches.push(UpdateBatch {
                    host_ids: vec![plan.host_id],
                    updates: plan.update_fields.clone(),
                }),
            }
        }
        batches
    }
}
