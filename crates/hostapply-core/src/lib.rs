//! # hostapply-core
//!
//! Foundation crate for the host attribute auto-apply planner.
//! Defines identifiers, the rule/plan data model, the value equality
//! strategy, errors, config, and tracing setup.

pub mod config;
pub mod errors;
pub mod models;
pub mod traits;
pub mod tracing;
pub mod types;

pub use config::HostApplyConfig;
pub use errors::{ConfigError, InputError, PlanError};
pub use models::{
    AdditionalRule, AttributeCatalog, AttributeDef, AttributeMap, AttributeValue, CandidateRule,
    ConflictField, ConflictResolver, HostGroupMembership, HostPlan, ModuleBinding, PlanResult,
    Rule, RuleScope, RuleSetEdit, RuleValue, ScopeTopology, UpdateBatch, UpdateField,
};
pub use traits::{StrictEquality, TypedEquality, ValueEquality};
pub use types::{AttributeId, BizId, HostId, ModuleId, RuleId, ServiceTemplateId};
