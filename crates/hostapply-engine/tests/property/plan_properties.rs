use std::collections::BTreeSet;

use hostapply_core::config::PlannerConfig;
use hostapply_core::models::*;
use hostapply_core::{AttributeId, HostId};
use hostapply_engine::{PlanEngine, PlanRequest};
use proptest::prelude::*;

/// One locked rule per (module, attribute), small value space so conflicts are common.
fn arb_rules() -> impl Strategy<Value = Vec<Rule>> {
    prop::collection::btree_map((0i64..6, 0i64..5), 0i64..3, 0..20).prop_map(|m| {
        m.into_iter()
            .enumerate()
            .map(|(i, ((module, attr), value))| Rule::module(i as i64 + 1, module, attr, value))
            .collect()
    })
}

fn arb_request() -> impl Strategy<Value = PlanRequest> {
    (
        arb_rules(),
        prop::collection::vec(prop::collection::vec(0i64..6, 0..4), 0..12),
        prop::collection::vec((0i64..12, 0i64..5, 0i64..3), 0..6),
        prop::collection::vec(prop::collection::btree_map(0i64..5, 0i64..3, 0..3), 0..12),
        any::<bool>(),
    )
        .prop_map(|(rules, modules, resolvers, snapshots, ignore_first)| {
            let memberships = modules
                .into_iter()
                .enumerate()
                .map(|(h, m)| HostGroupMembership::new(h as i64, m))
                .collect();
            let current_hosts = snapshots
                .into_iter()
                .enumerate()
                .map(|(h, s)| {
                    let snapshot: AttributeMap = s
                        .into_iter()
                        .map(|(a, v)| (AttributeId(a), AttributeValue::Int(v)))
                        .collect();
                    (HostId(h as i64), snapshot)
                })
                .collect();
            let resolvers = resolvers
                .into_iter()
                .map(|(h, a, v)| ConflictResolver::new(h, a, v))
                .collect();
            let rule_edit = ignore_first.then(|| RuleSetEdit {
                ignore_rule_ids: rules.first().map(|r| r.id).into_iter().collect(),
                ..RuleSetEdit::default()
            });
            PlanRequest {
                rules,
                rule_edit,
                memberships,
                current_hosts,
                resolvers,
                ..PlanRequest::default()
            }
        })
}

fn parallel_engine() -> PlanEngine {
    PlanEngine::new(PlannerConfig {
        parallel_threshold: Some(1),
        threads: Some(3),
        ..PlannerConfig::default()
    })
    .unwrap()
}

proptest! {
    #[test]
    fn planning_is_deterministic(req in arb_request()) {
        let engine = PlanEngine::default();
        prop_assert_eq!(engine.plan(&req), engine.plan(&req));
    }

    #[test]
    fn parallel_equals_sequential(req in arb_request()) {
        let sequential = PlanEngine::default().plan(&req);
        let parallel = parallel_engine().plan(&req);
        prop_assert_eq!(sequential, parallel);
    }

    #[test]
    fn open_conflicts_are_never_written(req in arb_request()) {
        let result = PlanEngine::default().plan(&req);
        let mut total = 0i64;
        for plan in &result.plans {
            let open = plan.unresolved_attributes();
            prop_assert_eq!(plan.unresolved_conflict_count, open.len() as i64);
            for field in &plan.update_fields {
                prop_assert!(!open.contains(&field.attribute_id));
            }
            for conflict in &plan.conflict_fields {
                prop_assert!(conflict.candidate_rules.len() >= 2);
            }
            total += plan.unresolved_conflict_count;
        }
        prop_assert_eq!(result.unresolved_conflict_count, total);
    }

    #[test]
    fn expect_host_is_current_plus_updates(req in arb_request()) {
        let result = PlanEngine::default().plan(&req);
        for plan in &result.plans {
            let mut expected = req.current_hosts.get(&plan.host_id).cloned().unwrap_or_default();
            for field in &plan.update_fields {
                prop_assert_ne!(expected.get(&field.attribute_id), Some(&field.property_value));
                expected.insert(field.attribute_id, field.property_value.clone());
            }
            prop_assert_eq!(&plan.expect_host, &expected);
        }
    }

    #[test]
    fn applying_a_plan_leaves_nothing_to_write(req in arb_request()) {
        let engine = PlanEngine::default();
        let first = engine.plan(&req);

        let mut applied = req.clone();
        for plan in &first.plans {
            applied.current_hosts.insert(plan.host_id, plan.expect_host.clone());
        }
        let second = engine.plan(&applied);
        for plan in &second.plans {
            prop_assert!(plan.update_fields.is_empty(), "host {} still has writes", plan.host_id);
        }
        prop_assert_eq!(second.unresolved_conflict_count, first.unresolved_conflict_count);
    }

    #[test]
    fn rule_order_does_not_change_outcome(req in arb_request()) {
        let mut reversed = req.clone();
        reversed.rules.reverse();
        let config = PlannerConfig { include_effective_rules: Some(false), ..PlannerConfig::default() };
        let engine = PlanEngine::new(config).unwrap();

        let a = engine.plan(&req);
        let b = engine.plan(&reversed);
        prop_assert_eq!(a.plans.len(), b.plans.len());
        for (pa, pb) in a.plans.iter().zip(&b.plans) {
            prop_assert_eq!(pa.host_id, pb.host_id);
            prop_assert_eq!(pa.update_data(), pb.update_data());
            prop_assert_eq!(pa.unresolved_attributes(), pb.unresolved_attributes());
        }
    }

    #[test]
    fn module_order_does_not_change_outcome(req in arb_request()) {
        let mut reordered = req.clone();
        for m in &mut reordered.memberships {
            m.module_ids.reverse();
        }
        let engine = PlanEngine::default();

        let a = engine.plan(&req);
        let b = engine.plan(&reordered);
        for (pa, pb) in a.plans.iter().zip(&b.plans) {
            prop_assert_eq!(pa.host_id, pb.host_id);
            prop_assert_eq!(pa.update_data(), pb.update_data());
            prop_assert_eq!(pa.unresolved_attributes(), pb.unresolved_attributes());
        }
    }

    #[test]
    fn conflicts_need_distinct_values(req in arb_request()) {
        let result = PlanEngine::default().plan(&req);
        for plan in &result.plans {
            for conflict in &plan.conflict_fields {
                let distinct: BTreeSet<String> = conflict
                    .candidate_rules
                    .iter()
                    .map(|c| format!("{:?}", c.value))
                    .collect();
                prop_assert!(distinct.len() >= 2);
            }
        }
    }
}

#[test]
fn empty_request_is_trivial() {
    let result = PlanEngine::default().plan(&PlanRequest::default());
    assert_eq!(result.plans.len(), 0);
    assert_eq!(result.effective_rules, Some(Vec::new()));
    assert_eq!(result.update_batches().len(), 0);
}
