//! Malformed planning requests, rejected before planning starts.

use super::error_code::{self, HostApplyErrorCode};
use crate::models::RuleScope;
use crate::types::{AttributeId, HostId, RuleId};

/// Contract violations in a planning request.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Too many hosts in one plan: {count} (limit {limit})")]
    TooManyHosts { count: usize, limit: usize },

    #[error("Too many additional rules: {count} (limit {limit})")]
    TooManyAdditionalRules { count: usize, limit: usize },

    #[error("Host {host_id} appears in more than one membership")]
    DuplicateHost { host_id: HostId },

    #[error("Rule id {rule_id} is used by more than one rule")]
    DuplicateRuleId { rule_id: RuleId },

    #[error("More than one rule for attribute {attribute_id} in {scope}")]
    DuplicateRule { scope: RuleScope, attribute_id: AttributeId },

    #[error("More than one resolver for host {host_id}, attribute {attribute_id}")]
    DuplicateResolver { host_id: HostId, attribute_id: AttributeId },

    #[error("Resolver for host {host_id} targets attribute {attribute_id}, which no rule sets")]
    ResolverWithoutRule { host_id: HostId, attribute_id: AttributeId },
}

impl HostApplyErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::TooManyHosts { .. } | Self::TooManyAdditionalRules { .. } => {
                error_code::LIMIT_EXCEEDED
            }
            _ => error_code::INVALID_INPUT,
        }
    }
}
