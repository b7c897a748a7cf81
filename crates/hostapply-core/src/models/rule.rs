//! Auto-apply rules.

use serde::{Deserialize, Serialize};

use super::value::AttributeValue;
use crate::types::{AttributeId, BizId, ModuleId, RuleId, ServiceTemplateId};

/// The grouping a rule is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleScope {
    Module(ModuleId),
    ServiceTemplate(ServiceTemplateId),
}

impl std::fmt::Display for RuleScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Module(id) => write!(f, "module:{id}"),
            Self::ServiceTemplate(id) => write!(f, "service_template:{id}"),
        }
    }
}

/// Whether a rule's value is enforced or only a default.
///
/// `Overridable` values apply only to hosts that have no value yet
/// (absent or `Null`). `Locked` values apply to every host in scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleValue {
    Locked(AttributeValue),
    Overridable(AttributeValue),
}

impl RuleValue {
    /// The carried value regardless of locking.
    pub fn value(&self) -> &AttributeValue {
        match self {
            Self::Locked(v) | Self::Overridable(v) => v,
        }
    }

    /// Whether this value applies to a host whose current value is `current`.
    pub fn applies_over(&self, current: Option<&AttributeValue>) -> bool {
        match self {
            Self::Locked(_) => true,
            Self::Overridable(_) => current.map_or(true, AttributeValue::is_null),
        }
    }
}

/// A declarative assignment of one attribute's value within a scope.
///
/// Within one scope there is at most one rule per attribute; the rule store
/// enforces this and the planner relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub biz_id: BizId,
    pub scope: RuleScope,
    pub attribute_id: AttributeId,
    pub value: RuleValue,
}

impl Rule {
    /// Convenience constructor for a locked module-scoped rule from raw ids.
    pub fn module(
        id: i64,
        module_id: i64,
        attribute_id: i64,
        value: impl Into<AttributeValue>,
    ) -> Self {
        Self {
            id: RuleId(id),
            biz_id: BizId::default(),
            scope: RuleScope::Module(ModuleId(module_id)),
            attribute_id: AttributeId(attribute_id),
            value: RuleValue::Locked(value.into()),
        }
    }

    /// Convenience constructor for a locked template-scoped rule from raw ids.
    pub fn service_template(
        id: i64,
        template_id: i64,
        attribute_id: i64,
        value: impl Into<AttributeValue>,
    ) -> Self {
        Self {
            id: RuleId(id),
            biz_id: BizId::default(),
            scope: RuleScope::ServiceTemplate(ServiceTemplateId(template_id)),
            attribute_id: AttributeId(attribute_id),
            value: RuleValue::Locked(value.into()),
        }
    }

    /// Turn the rule's value into an overridable default.
    pub fn overridable(mut self) -> Self {
        if let RuleValue::Locked(v) = self.value {
            self.value = RuleValue::Overridable(v);
        }
        self
    }

    /// The `(scope, attribute)` key that is unique within a rule store.
    pub fn key(&self) -> (RuleScope, AttributeId) {
        (self.scope, self.attribute_id)
    }
}
