//! Error handling for the planner.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod input_error;
pub mod plan_error;

pub use config_error::ConfigError;
pub use error_code::HostApplyErrorCode;
pub use input_error::InputError;
pub use plan_error::PlanError;
