//! Top-level planner errors.

use super::error_code::{self, HostApplyErrorCode};
use super::{ConfigError, InputError};

/// Errors surfaced by engine construction and checked planning.
/// Aggregates the other error enums via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    #[error("Worker pool could not be built: {0}")]
    ThreadPool(String),
}

impl HostApplyErrorCode for PlanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Input(e) => e.error_code(),
            Self::ThreadPool(_) => error_code::THREAD_POOL_ERROR,
        }
    }
}
