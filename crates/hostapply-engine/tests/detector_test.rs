//! Conflict detection and resolver application on a single host.

use hostapply_core::models::*;
use hostapply_core::traits::{StrictEquality, TypedEquality};
use hostapply_core::{AttributeId, HostId, ModuleId};
use hostapply_engine::detector::ConflictDetector;
use hostapply_engine::resolver::{apply_resolvers, ResolverIndex};
use hostapply_engine::selector::SelectedRule;

fn selected(rules: &[Rule]) -> Vec<SelectedRule<'_>> {
    rules
        .iter()
        .map(|rule| SelectedRule {
            rule,
            source_module: match rule.scope {
                RuleScope::Module(m) => m,
                RuleScope::ServiceTemplate(_) => ModuleId(0),
            },
        })
        .collect()
}

#[test]
fn test_single_rule_is_unambiguous() {
    let rules = vec![Rule::module(1, 10, 100, 5)];
    let detection = ConflictDetector::new(&TypedEquality, true).detect(&selected(&rules));

    assert!(detection.conflicts.is_empty());
    assert_eq!(
        detection.unambiguous.get(&AttributeId(100)),
        Some(&AttributeValue::Int(5))
    );
}

#[test]
fn test_distinct_values_conflict() {
    let rules = vec![
        Rule::module(1, 10, 100, 1),
        Rule::module(2, 11, 100, 2),
        Rule::module(3, 11, 101, 7),
    ];
    let detection = ConflictDetector::new(&TypedEquality, true).detect(&selected(&rules));

    assert_eq!(detection.conflicts.len(), 1);
    let conflict = &detection.conflicts[0];
    assert_eq!(conflict.attribute_id, AttributeId(100));
    assert!(conflict.unresolved_conflict_exist);
    assert_eq!(conflict.property_value, None);
    assert!(!detection.unambiguous.contains_key(&AttributeId(100)));
    assert!(detection.unambiguous.contains_key(&AttributeId(101)));
}

#[test]
fn test_equality_strategy_decides_agreement() {
    let rules = vec![Rule::module(1, 10, 100, 2), Rule::module(2, 11, 100, 2.0)];

    let typed = ConflictDetector::new(&TypedEquality, false).detect(&selected(&rules));
    assert!(typed.conflicts.is_empty());

    let strict = ConflictDetector::new(&StrictEquality, false).detect(&selected(&rules));
    assert_eq!(strict.conflicts.len(), 1);
}

#[test]
fn test_agreed_value_comes_from_lowest_scope() {
    let rules = vec![
        Rule::module(7, 11, 100, 3.0),
        Rule::service_template(8, 4, 100, 3.0),
        Rule::module(9, 10, 100, 3),
    ];
    let mut reversed = rules.clone();
    reversed.reverse();
    let detector = ConflictDetector::new(&TypedEquality, true);

    for order in [&rules, &reversed] {
        let detection = detector.detect(&selected(order));
        assert!(detection.conflicts.is_empty());
        assert_eq!(
            detection.unambiguous.get(&AttributeId(100)),
            Some(&AttributeValue::Int(3))
        );
    }
}

#[test]
fn test_trimming_can_be_disabled() {
    let rules = vec![Rule::module(1, 10, 100, "a "), Rule::module(2, 11, 100, "a")];

    let trimmed = ConflictDetector::new(&StrictEquality, true).detect(&selected(&rules));
    assert!(trimmed.conflicts.is_empty());
    assert_eq!(
        trimmed.unambiguous.get(&AttributeId(100)),
        Some(&AttributeValue::from("a"))
    );

    let raw = ConflictDetector::new(&StrictEquality, false).detect(&selected(&rules));
    assert_eq!(raw.conflicts.len(), 1);
}

#[test]
fn test_detection_ignores_rule_order() {
    let forward = vec![
        Rule::module(1, 10, 100, 1),
        Rule::module(2, 11, 100, 2),
        Rule::module(3, 10, 101, "x"),
    ];
    let mut reverse = forward.clone();
    reverse.reverse();
    let detector = ConflictDetector::new(&TypedEquality, true);

    let a = detector.detect(&selected(&forward));
    let b = detector.detect(&selected(&reverse));
    assert_eq!(a.unambiguous, b.unambiguous);
    let attrs = |d: &hostapply_engine::detector::Detection| -> Vec<AttributeId> {
        d.conflicts.iter().map(|c| c.attribute_id).collect()
    };
    assert_eq!(attrs(&a), attrs(&b));
}

#[test]
fn test_resolver_closes_only_its_conflict() {
    let rules = vec![
        Rule::module(1, 10, 100, 1),
        Rule::module(2, 11, 100, 2),
        Rule::module(3, 10, 101, "a"),
        Rule::module(4, 11, 101, "b"),
    ];
    let mut detection = ConflictDetector::new(&TypedEquality, true).detect(&selected(&rules));
    let resolvers = vec![
        ConflictResolver::new(1, 100, 9),
        ConflictResolver::new(1, 555, 1),
        ConflictResolver::new(2, 101, "c"),
    ];
    let index = ResolverIndex::new(&resolvers);

    let resolution = apply_resolvers(
        HostId(1),
        &mut detection.conflicts,
        index.for_host(HostId(1)),
        AttributeValue::trimmed,
    );

    assert_eq!(resolution.resolved, vec![(AttributeId(100), AttributeValue::Int(9))]);
    assert_eq!(resolution.unresolved_count, 1);
    assert_eq!(resolution.ignored, 1);
    assert!(!detection.conflicts[0].unresolved_conflict_exist);
    assert!(detection.conflicts[1].unresolved_conflict_exist);
}

#[test]
fn test_no_resolvers_leaves_everything_open() {
    let rules = vec![Rule::module(1, 10, 100, 1), Rule::module(2, 11, 100, 2)];
    let mut detection = ConflictDetector::new(&TypedEquality, true).detect(&selected(&rules));

    let resolution = apply_resolvers(
        HostId(1),
        &mut detection.conflicts,
        None,
        AttributeValue::clone,
    );
    assert!(resolution.resolved.is_empty());
    assert_eq!(resolution.unresolved_count, 1);
    assert_eq!(resolution.ignored, 0);
}

#[test]
fn test_last_duplicate_resolver_wins() {
    let resolvers = vec![
        ConflictResolver::new(1, 100, 1),
        ConflictResolver::new(1, 100, 2),
    ];
    let index = ResolverIndex::new(&resolvers);
    assert_eq!(
        index.for_host(HostId(1)).and_then(|r| r.get(&AttributeId(100))),
        Some(&AttributeValue::Int(2))
    );
}
