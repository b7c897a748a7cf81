//! Subscriber installation for processes embedding the planner.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding per-target log directives.
pub const LOG_ENV: &str = "HOSTAPPLY_LOG";

/// Directives used when `HOSTAPPLY_LOG` is unset or does not parse.
pub const DEFAULT_DIRECTIVES: &str = "hostapply=info";

static INIT: Once = Once::new();

/// Install a global `fmt` subscriber filtered by `HOSTAPPLY_LOG`,
/// e.g. `HOSTAPPLY_LOG=hostapply_engine=debug` to see per-host conflicts.
///
/// Only the first call installs anything.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(planner_filter())
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init();
    });
}

/// The filter `init_tracing` installs.
pub fn planner_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}
