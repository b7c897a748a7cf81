//! Structured span field names used by the planner.
//!
//! Consistent names keep log queries stable across releases.

/// Hosts in the planning request.
pub const PLAN_HOSTS: &str = "plan_hosts";

/// Rules in force after applying the what-if edit.
pub const PLAN_EFFECTIVE_RULES: &str = "plan_effective_rules";

/// Total open conflicts over all hosts.
pub const PLAN_UNRESOLVED_CONFLICTS: &str = "plan_unresolved_conflicts";

/// Total fields to write over all hosts.
pub const PLAN_UPDATE_FIELDS: &str = "plan_update_fields";

/// Wall time of one planning invocation in milliseconds.
pub const PLAN_DURATION_MS: &str = "plan_duration_ms";

/// Whether per-host planning ran on the worker pool.
pub const PLAN_PARALLEL: &str = "plan_parallel";
