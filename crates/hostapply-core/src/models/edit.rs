//! What-if edits layered over the stored rule set.

use serde::{Deserialize, Serialize};

use super::rule::{RuleScope, RuleValue};
use super::value::AttributeValue;
use crate::types::{AttributeId, BizId, ModuleId, RuleId};

/// A rule that is not saved yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalRule {
    #[serde(default)]
    pub biz_id: BizId,
    pub scope: RuleScope,
    pub attribute_id: AttributeId,
    pub value: RuleValue,
}

impl AdditionalRule {
    /// A locked value for a module, from raw ids.
    pub fn module(module_id: i64, attribute_id: i64, value: impl Into<AttributeValue>) -> Self {
        Self {
            biz_id: BizId::default(),
            scope: RuleScope::Module(ModuleId(module_id)),
            attribute_id: AttributeId(attribute_id),
            value: RuleValue::Locked(value.into()),
        }
    }
}

/// Simulated changes to the rule set for previews. Never written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSetEdit {
    pub additional_rules: Vec<AdditionalRule>,
    /// Rules the operator is about to delete.
    pub remove_rule_ids: Vec<RuleId>,
    /// Rules skipped for this run only.
    pub ignore_rule_ids: Vec<RuleId>,
}

impl RuleSetEdit {
    pub fn is_empty(&self) -> bool {
        self.additional_rules.is_empty()
            && self.remove_rule_ids.is_empty()
            && self.ignore_rule_ids.is_empty()
    }
}
