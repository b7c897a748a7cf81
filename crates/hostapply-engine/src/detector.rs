//! Conflict detection for one host.

use std::collections::BTreeMap;

use tracing::debug;

use hostapply_core::models::{AttributeValue, ConflictField, RuleScope};
use hostapply_core::traits::ValueEquality;
use hostapply_core::types::collections::SmallVec4;
use hostapply_core::types::{AttributeId, RuleId};

use crate::selector::SelectedRule;

/// Rules competing for one attribute, usually fewer than four.
type Group<'s, 'a> = SmallVec4<&'s SelectedRule<'a>>;

/// Orders candidates when picking the value that represents agreeing rules.
type RuleKey = (RuleScope, RuleId);

/// Per-attribute outcome of detection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Detection {
    /// Attributes whose applicable rules all agree, with the agreed value.
    pub unambiguous: BTreeMap<AttributeId, AttributeValue>,
    /// Attributes with two or more distinct candidate values, all marked
    /// unresolved. Ordered by attribute id.
    pub conflicts: Vec<ConflictField>,
}

/// Groups a host's selected rules by attribute and finds disagreements.
///
/// Ambiguous attributes are never settled by picking one of the candidates;
/// they stay open until a resolver closes them.
pub struct ConflictDetector<'e> {
    equality: &'e dyn ValueEquality,
    trim_strings: bool,
}

impl<'e> ConflictDetector<'e> {
    pub fn new(equality: &'e dyn ValueEquality, trim_strings: bool) -> Self {
        Self {
            equality,
            trim_strings,
        }
    }

    /// Normalize a value before it is compared or written.
    pub fn normalize(&self, value: &AttributeValue) -> AttributeValue {
        if self.trim_strings {
            value.trimmed()
        } else {
            value.clone()
        }
    }

    pub fn detect(&self, selected: &[SelectedRule<'_>]) -> Detection {
        let mut groups: BTreeMap<AttributeId, Group<'_, '_>> = BTreeMap::new();
        for s in selected {
            groups.entry(s.rule.attribute_id).or_default().push(s);
        }

        let mut detection = Detection::default();
        for (attribute_id, group) in groups {
            // One entry per class of equal values. Each class is represented by
            // the value of its lowest (scope, rule id) member, so the outcome
            // does not depend on the order of the host's modules.
            let mut distinct: SmallVec4<(RuleKey, AttributeValue)> = SmallVec4::new();
            for s in &group {
                let key = (s.rule.scope, s.rule.id);
                let value = self.normalize(s.rule.value.value());
                match distinct.iter_mut().find(|(_, d)| self.equality.same(d, &value)) {
                    Some(class) if key < class.0 => *class = (key, value),
                    Some(_) => {}
                    None => distinct.push((key, value)),
                }
            }

            if distinct.len() == 1 {
                if let Some((_, value)) = distinct.pop() {
                    detection.unambiguous.insert(attribute_id, value);
                }
                continue;
            }

            debug!(
                attribute_id = attribute_id.get(),
                candidates = group.len(),
                distinct_values = distinct.len(),
                kind = distinct[0].1.kind(),
                "conflicting values"
            );
            detection.conflicts.push(ConflictField {
                attribute_id,
                property_id: None,
                property_value: None,
                candidate_rules: group.iter().map(|s| s.to_candidate()).collect(),
                unresolved_conflict_exist: true,
            });
        }
        detection
    }
}
