//! Strategy traits passed into the planner.

pub mod value_equality;

pub use value_equality::{StrictEquality, TypedEquality, ValueEquality};
