//! Provides utilities for extracting the launcher's environment variables.

use std::env;

/// Overrides the logging level, e.g. `AGENT_LAUNCHER_LOGLEVEL=debug`
pub const LOGLEVEL: &str = "AGENT_LAUNCHER_LOGLEVEL";

/// When set, the full cause chain of a launcher error is shown
pub const DEV: &str = "AGENT_LAUNCHER_DEV";

pub(crate) fn log_level() -> Option<String> {
    env::var(LOGLEVEL).ok()
}

pub(crate) fn dev_mode() -> bool {
    env::var_os(DEV).is_some()
}
