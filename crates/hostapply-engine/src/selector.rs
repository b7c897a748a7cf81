//! Rule selection for one host.

use hostapply_core::models::{AttributeMap, CandidateRule, HostGroupMembership, Rule};
use hostapply_core::types::{FxHashSet, ModuleId};

use crate::scope::ScopeIndex;

/// A rule in force for a host, with the host module it was reached through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedRule<'a> {
    pub rule: &'a Rule,
    pub source_module: ModuleId,
}

impl SelectedRule<'_> {
    pub fn to_candidate(&self) -> CandidateRule {
        CandidateRule {
            rule_id: self.rule.id,
            scope: self.rule.scope,
            source_module: self.source_module,
            value: self.rule.value.value().clone(),
        }
    }
}

/// Select every rule whose scope is reached from one of the host's modules.
///
/// A module listed twice contributes once. A template rule reached through
/// two modules bound to the same template is selected once per module.
pub fn select_rules<'a>(
    index: &ScopeIndex<'a>,
    membership: &HostGroupMembership,
) -> Vec<SelectedRule<'a>> {
    let mut seen: FxHashSet<ModuleId> = FxHashSet::default();
    let mut selected = Vec::new();
    for &module_id in &membership.module_ids {
        if !seen.insert(module_id) {
            continue;
        }
        selected.extend(index.rules_for(module_id).iter().map(|&rule| SelectedRule {
            rule,
            source_module: module_id,
        }));
    }
    selected
}

/// Drop overridable defaults for attributes the host already has a value for.
pub fn drop_shadowed_defaults<'a>(
    selected: Vec<SelectedRule<'a>>,
    current: Option<&AttributeMap>,
) -> Vec<SelectedRule<'a>> {
    selected
        .into_iter()
        .filter(|s| {
            let value = current.and_then(|c| c.get(&s.rule.attribute_id));
            s.rule.value.applies_over(value)
        })
        .collect()
}
