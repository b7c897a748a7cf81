//! Configuration system for the planner.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod hostapply_config;
pub mod limits_config;
pub mod planner_config;

pub use hostapply_config::{CliOverrides, HostApplyConfig};
pub use limits_config::LimitsConfig;
pub use planner_config::PlannerConfig;
