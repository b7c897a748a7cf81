//! Planner configuration.

use serde::{Deserialize, Serialize};

/// Configuration for plan computation.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    /// Worker threads for per-host planning. 0 or absent uses the rayon default.
    pub threads: Option<usize>,
    /// Minimum host count before planning fans out to the worker pool. Default: 64.
    pub parallel_threshold: Option<usize>,
    /// Report the rule set in force alongside the plans. Default: true.
    pub include_effective_rules: Option<bool>,
    /// Put hosts with open conflicts first. Default: true.
    pub conflicts_first: Option<bool>,
    /// Trim whitespace around string values before comparing and writing. Default: true.
    pub trim_string_values: Option<bool>,
}

impl PlannerConfig {
    /// Returns the configured thread count, `None` meaning the rayon default.
    pub fn effective_threads(&self) -> Option<usize> {
        self.threads.filter(|&n| n > 0)
    }

    /// Returns the effective parallel threshold, defaulting to 64.
    pub fn effective_parallel_threshold(&self) -> usize {
        self.parallel_threshold.unwrap_or(64)
    }

    pub fn effective_include_effective_rules(&self) -> bool {
        self.include_effective_rules.unwrap_or(true)
    }

    pub fn effective_conflicts_first(&self) -> bool {
        self.conflicts_first.unwrap_or(true)
    }

    pub fn effective_trim_string_values(&self) -> bool {
        self.trim_string_values.unwrap_or(true)
    }
}
