//! HostApplyErrorCode trait for service-boundary conversion.

/// Every error enum provides a stable code string so a service wrapper can
/// map it to its own response envelope.
pub trait HostApplyErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const LIMIT_EXCEEDED: &str = "LIMIT_EXCEEDED";
pub const THREAD_POOL_ERROR: &str = "THREAD_POOL_ERROR";
