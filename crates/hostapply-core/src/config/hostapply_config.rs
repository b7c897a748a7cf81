//! Top-level configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{LimitsConfig, PlannerConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "hostapply.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`HOSTAPPLY_*`)
/// 3. Project config (`hostapply.toml` in project root)
/// 4. User config (`~/.hostapply/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct HostApplyConfig {
    pub planner: PlannerConfig,
    pub limits: LimitsConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub threads: Option<usize>,
    pub parallel_threshold: Option<usize>,
    pub max_hosts_per_plan: Option<usize>,
}

impl HostApplyConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config)?;

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &HostApplyConfig) -> Result<(), ConfigError> {
        if config.planner.parallel_threshold == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "planner.parallel_threshold".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.limits.max_hosts_per_plan == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "limits.max_hosts_per_plan".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".hostapply").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut HostApplyConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: HostApplyConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut HostApplyConfig, other: &HostApplyConfig) {
        let planner = &other.planner;
        if planner.threads.is_some() {
            base.planner.threads = planner.threads;
        }
        if planner.parallel_threshold.is_some() {
            base.planner.parallel_threshold = planner.parallel_threshold;
        }
        if planner.include_effective_rules.is_some() {
            base.planner.include_effective_rules = planner.include_effective_rules;
        }
        if planner.conflicts_first.is_some() {
            base.planner.conflicts_first = planner.conflicts_first;
        }
        if planner.trim_string_values.is_some() {
            base.planner.trim_string_values = planner.trim_string_values;
        }

        let limits = &other.limits;
        if limits.max_hosts_per_plan.is_some() {
            base.limits.max_hosts_per_plan = limits.max_hosts_per_plan;
        }
        if limits.max_additional_rules.is_some() {
            base.limits.max_additional_rules = limits.max_additional_rules;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `HOSTAPPLY_PLANNER_THREADS`, `HOSTAPPLY_LIMITS_MAX_HOSTS_PER_PLAN`, etc.
    fn apply_env_overrides(config: &mut HostApplyConfig) -> Result<(), ConfigError> {
        if let Some(v) = env_parse::<usize>("HOSTAPPLY_PLANNER_THREADS")? {
            config.planner.threads = Some(v);
        }
        if let Some(v) = env_parse::<usize>("HOSTAPPLY_PLANNER_PARALLEL_THRESHOLD")? {
            config.planner.parallel_threshold = Some(v);
        }
        if let Some(v) = env_parse::<bool>("HOSTAPPLY_PLANNER_INCLUDE_EFFECTIVE_RULES")? {
            config.planner.include_effective_rules = Some(v);
        }
        if let Some(v) = env_parse::<bool>("HOSTAPPLY_PLANNER_CONFLICTS_FIRST")? {
            config.planner.conflicts_first = Some(v);
        }
        if let Some(v) = env_parse::<bool>("HOSTAPPLY_PLANNER_TRIM_STRING_VALUES")? {
            config.planner.trim_string_values = Some(v);
        }
        if let Some(v) = env_parse::<usize>("HOSTAPPLY_LIMITS_MAX_HOSTS_PER_PLAN")? {
            config.limits.max_hosts_per_plan = Some(v);
        }
        if let Some(v) = env_parse::<usize>("HOSTAPPLY_LIMITS_MAX_ADDITIONAL_RULES")? {
            config.limits.max_additional_rules = Some(v);
        }
        Ok(())
    }

    fn apply_cli_overrides(config: &mut HostApplyConfig, cli: &CliOverrides) {
        if let Some(v) = cli.threads {
            config.planner.threads = Some(v);
        }
        if let Some(v) = cli.parallel_threshold {
            config.planner.parallel_threshold = Some(v);
        }
        if let Some(v) = cli.max_hosts_per_plan {
            config.limits.max_hosts_per_plan = Some(v);
        }
    }
}

/// Read and parse an environment variable. Unset is `Ok(None)`;
/// a value that does not parse is an `InvalidValue` error.
fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: key.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
