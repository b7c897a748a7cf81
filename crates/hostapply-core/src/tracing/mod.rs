//! Observability for the planner.
//! `tracing` crate with `EnvFilter`, per-target log levels.

pub mod metrics;
pub mod setup;

pub use setup::{init_tracing, planner_filter, DEFAULT_DIRECTIVES, LOG_ENV};
