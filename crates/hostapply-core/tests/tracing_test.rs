//! Tracing setup.

use hostapply_core::tracing::{
    init_tracing, metrics, planner_filter, DEFAULT_DIRECTIVES, LOG_ENV,
};

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    tracing::info!(target: "hostapply_core", "tracing initialised");
}

#[test]
fn test_metric_field_names_are_distinct() {
    let names = [
        metrics::PLAN_HOSTS,
        metrics::PLAN_EFFECTIVE_RULES,
        metrics::PLAN_UNRESOLVED_CONFLICTS,
        metrics::PLAN_UPDATE_FIELDS,
        metrics::PLAN_DURATION_MS,
        metrics::PLAN_PARALLEL,
    ];
    let unique: std::collections::BTreeSet<&str> = names.iter().copied().collect();
    assert_eq!(unique.len(), names.len());
    assert!(names.iter().all(|n| n.starts_with("plan_")));
}

#[test]
fn test_filter_falls_back_to_default_directives() {
    std::env::set_var(LOG_ENV, "hostapply=notalevel");
    let filter = planner_filter();
    std::env::remove_var(LOG_ENV);
    assert_eq!(filter.to_string(), DEFAULT_DIRECTIVES);
}
