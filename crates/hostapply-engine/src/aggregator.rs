//! Aggregation of per-host plans into one result.

use hostapply_core::models::{HostPlan, PlanResult, Rule};

/// Totals per-host plans and puts them in reporting order.
#[derive(Debug, Clone, Copy)]
pub struct PlanAggregator {
    conflicts_first: bool,
}

impl PlanAggregator {
    pub fn new(conflicts_first: bool) -> Self {
        Self { conflicts_first }
    }

    /// Plans keep their input order; with `conflicts_first` they are then
    /// stably ordered by descending open-conflict count.
    pub fn aggregate(
        &self,
        mut plans: Vec<HostPlan>,
        effective_rules: Option<Vec<Rule>>,
    ) -> PlanResult {
        if self.conflicts_first {
            plans.sort_by(|a, b| b.unresolved_conflict_count.cmp(&a.unresolved_conflict_count));
        }

        let unresolved_conflict_count = plans.iter().map(|p| p.unresolved_conflict_count).sum();
        let hosts_with_unresolved_conflicts =
            plans.iter().filter(|p| p.has_unresolved_conflicts()).count();

        PlanResult {
            host_count: plans.len(),
            plans,
            unresolved_conflict_count,
            hosts_with_unresolved_conflicts,
            effective_rules,
        }
    }
}

impl Default for PlanAggregator {
    fn default() -> Self {
        Self::new(true)
    }
}
