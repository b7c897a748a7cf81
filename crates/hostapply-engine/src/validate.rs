//! Request validation run ahead of checked planning.
//!
//! The planner itself accepts anything; this layer is where a service
//! rejects requests that break the input contracts.

use hostapply_core::config::LimitsConfig;
use hostapply_core::errors::InputError;
use hostapply_core::models::Rule;
use hostapply_core::types::{AttributeId, FxHashSet, HostId, RuleId};

use crate::engine::PlanRequest;

/// Checks a `PlanRequest` against size limits and input contracts.
#[derive(Debug, Clone, Default)]
pub struct RequestValidator {
    limits: LimitsConfig,
}

impl RequestValidator {
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Validate `request`, where `effective_rules` is the rule set after the
    /// request's edit has been applied.
    pub fn validate(
        &self,
        request: &PlanRequest,
        effective_rules: &[Rule],
    ) -> Result<(), InputError> {
        self.check_limits(request)?;
        check_unique_hosts(request)?;
        check_unique_rule_ids(&request.rules)?;
        check_unique_rule_keys(effective_rules)?;
        check_resolvers(request, effective_rules)?;
        Ok(())
    }

    fn check_limits(&self, request: &PlanRequest) -> Result<(), InputError> {
        let limit = self.limits.effective_max_hosts_per_plan();
        if request.memberships.len() > limit {
            return Err(InputError::TooManyHosts {
                count: request.memberships.len(),
                limit,
            });
        }

        let additional = request
            .rule_edit
            .as_ref()
            .map_or(0, |e| e.additional_rules.len());
        let limit = self.limits.effective_max_additional_rules();
        if additional > limit {
            return Err(InputError::TooManyAdditionalRules {
                count: additional,
                limit,
            });
        }
        Ok(())
    }
}

fn check_unique_hosts(request: &PlanRequest) -> Result<(), InputError> {
    let mut seen: FxHashSet<HostId> = FxHashSet::default();
    for m in &request.memberships {
        if !seen.insert(m.host_id) {
            return Err(InputError::DuplicateHost { host_id: m.host_id });
        }
    }
    Ok(())
}

fn check_unique_rule_ids(rules: &[Rule]) -> Result<(), InputError> {
    let mut seen: FxHashSet<RuleId> = FxHashSet::default();
    for rule in rules.iter().filter(|r| r.id.is_saved()) {
        if !seen.insert(rule.id) {
            return Err(InputError::DuplicateRuleId { rule_id: rule.id });
        }
    }
    Ok(())
}

fn check_unique_rule_keys(rules: &[Rule]) -> Result<(), InputError> {
    let mut seen = FxHashSet::default();
    for rule in rules {
        if !seen.insert(rule.key()) {
            return Err(InputError::DuplicateRule {
                scope: rule.scope,
                attribute_id: rule.attribute_id,
            });
        }
    }
    Ok(())
}

fn check_resolvers(request: &PlanRequest, effective_rules: &[Rule]) -> Result<(), InputError> {
    let ruled: FxHashSet<AttributeId> = effective_rules.iter().map(|r| r.attribute_id).collect();
    let mut seen: FxHashSet<(HostId, AttributeId)> = FxHashSet::default();
    for r in &request.resolvers {
        if !seen.insert((r.host_id, r.attribute_id)) {
            return Err(InputError::DuplicateResolver {
                host_id: r.host_id,
                attribute_id: r.attribute_id,
            });
        }
        if !ruled.contains(&r.attribute_id) {
            return Err(InputError::ResolverWithoutRule {
                host_id: r.host_id,
                attribute_id: r.attribute_id,
            });
        }
    }
    Ok(())
}
