//! # hostapply-engine
//!
//! Plans host attribute auto-apply runs.
//!
//! Given auto-apply rules scoped to modules or service templates, the
//! modules each host belongs to, the hosts' current attribute values and any
//! operator-chosen conflict resolutions, the engine computes per host the
//! values to write, and reports every attribute on which applicable rules
//! disagree.
//!
//! ## Pipeline
//! 1. **Rule set edit**: apply what-if additions, removals and ignores
//! 2. **Scope resolution**: which scope each module takes its rules from
//! 3. **Selection**: rules in force for one host
//! 4. **Conflict detection**: group by attribute, find disagreements
//! 5. **Resolution**: close conflicts the caller resolved
//! 6. **Assembly**: expected host record and minimal diff
//! 7. **Aggregation**: totals and ordering over all hosts
//!
//! The engine is a pure function of its inputs: nothing is fetched or
//! written, and re-running with the same request yields the same result.

pub mod aggregator;
pub mod assembler;
pub mod detector;
pub mod engine;
pub mod resolver;
pub mod ruleset;
pub mod scope;
pub mod selector;
pub mod validate;

pub use engine::{plan, PlanEngine, PlanRequest};
pub use validate::RequestValidator;
