//! Scope resolution: which rules each module contributes.

use tracing::debug;

use hostapply_core::models::{AttributeCatalog, Rule, RuleScope, ScopeTopology};
use hostapply_core::types::{FxHashMap, ModuleId};

/// Rules indexed by scope, plus the module bindings that decide which
/// scope a module draws from.
///
/// Resolution for a module:
/// - not in the topology: its own module rules
/// - bound to a template with host-apply on: the template's rules only
/// - host-apply on for the module: its own module rules
/// - otherwise: nothing
pub struct ScopeIndex<'a> {
    by_scope: FxHashMap<RuleScope, Vec<&'a Rule>>,
    topology: &'a ScopeTopology,
    rule_count: usize,
}

impl<'a> ScopeIndex<'a> {
    /// Index `rules`. With a catalog, rules for attributes that are unknown
    /// or closed to auto-apply are left out.
    pub fn new(
        rules: &'a [Rule],
        topology: &'a ScopeTopology,
        catalog: Option<&AttributeCatalog>,
    ) -> Self {
        let mut by_scope: FxHashMap<RuleScope, Vec<&'a Rule>> = FxHashMap::default();
        let mut skipped = 0usize;
        for rule in rules {
            if let Some(catalog) = catalog {
                if !catalog.allows(rule.attribute_id) {
                    skipped += 1;
                    continue;
                }
            }
            by_scope.entry(rule.scope).or_default().push(rule);
        }
        if skipped > 0 {
            debug!(skipped, "rules for attributes closed to auto-apply left out");
        }

        Self {
            by_scope,
            topology,
            rule_count: rules.len() - skipped,
        }
    }

    /// The scope whose rules apply to hosts in `module_id`, if any.
    pub fn scope_for(&self, module_id: ModuleId) -> Option<RuleScope> {
        let Some(binding) = self.topology.binding(module_id) else {
            return Some(RuleScope::Module(module_id));
        };
        match binding.service_template_id {
            Some(template_id) if binding.template_apply_enabled => {
                Some(RuleScope::ServiceTemplate(template_id))
            }
            _ if binding.module_apply_enabled => Some(RuleScope::Module(module_id)),
            _ => None,
        }
    }

    /// Rules contributed by `module_id`.
    pub fn rules_for(&self, module_id: ModuleId) -> &[&'a Rule] {
        self.scope_for(module_id)
            .and_then(|scope| self.by_scope.get(&scope))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of indexed rules.
    pub fn len(&self) -> usize {
        self.rule_count
    }

    pub fn is_empty(&self) -> bool {
        self.rule_count == 0
    }
}
