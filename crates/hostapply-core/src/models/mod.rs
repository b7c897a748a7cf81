//! Data model shared by the planner and its callers.

pub mod attribute;
pub mod edit;
pub mod membership;
pub mod plan;
pub mod resolver;
pub mod rule;
pub mod value;

pub use attribute::{AttributeCatalog, AttributeDef};
pub use edit::{AdditionalRule, RuleSetEdit};
pub use membership::{HostGroupMembership, ModuleBinding, ScopeTopology};
pub use plan::{CandidateRule, ConflictField, HostPlan, PlanResult, UpdateBatch, UpdateField};
pub use resolver::ConflictResolver;
pub use rule::{Rule, RuleScope, RuleValue};
pub use value::{AttributeMap, AttributeValue};
