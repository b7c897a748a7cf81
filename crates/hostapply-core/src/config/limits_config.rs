//! Request size limits enforced by the request validator.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum hosts per planning request. Default: 500.
    pub max_hosts_per_plan: Option<usize>,
    /// Maximum unsaved rules in one what-if edit. Default: 1000.
    pub max_additional_rules: Option<usize>,
}

impl LimitsConfig {
    pub fn effective_max_hosts_per_plan(&self) -> usize {
        self.max_hosts_per_plan.unwrap_or(500)
    }

    pub fn effective_max_additional_rules(&self) -> usize {
        self.max_additional_rules.unwrap_or(1000)
    }
}
