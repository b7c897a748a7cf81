//! Rule set editing for what-if previews.

use tracing::debug;

use hostapply_core::models::{Rule, RuleSetEdit};
use hostapply_core::types::{FxHashSet, RuleId};

/// Compute the rule set in force after a what-if edit.
///
/// Removed and ignored rules are dropped first. Each additional rule is then
/// upserted by `(scope, attribute)`: it overwrites the value of a surviving
/// rule with the same key, keeping that rule's id, or is appended as an
/// unsaved rule. Unsaved rules are never matched by remove/ignore ids.
pub fn apply_edit(rules: &[Rule], edit: Option<&RuleSetEdit>) -> Vec<Rule> {
    let Some(edit) = edit.filter(|e| !e.is_empty()) else {
        return rules.to_vec();
    };

    let dropped: FxHashSet<RuleId> = edit
        .remove_rule_ids
        .iter()
        .chain(edit.ignore_rule_ids.iter())
        .copied()
        .filter(|id| id.is_saved())
        .collect();

    let mut effective: Vec<Rule> = rules
        .iter()
        .filter(|r| !(r.id.is_saved() && dropped.contains(&r.id)))
        .cloned()
        .collect();
    let dropped_count = rules.len() - effective.len();

    let mut replaced = 0usize;
    let mut appended = 0usize;
    for addition in &edit.additional_rules {
        let key = (addition.scope, addition.attribute_id);
        match effective.iter_mut().find(|r| r.key() == key) {
            Some(existing) => {
                existing.value = addition.value.clone();
                replaced += 1;
            }
            None => {
                effective.push(Rule {
                    id: RuleId::UNSAVED,
                    biz_id: addition.biz_id,
                    scope: addition.scope,
                    attribute_id: addition.attribute_id,
                    value: addition.value.clone(),
                });
                appended += 1;
            }
        }
    }

    debug!(
        dropped = dropped_count,
        replaced, appended, "applied rule set edit"
    );
    effective
}
