//! Configuration for the chesstty driver.
//!
//! Every value has a compile-time default and can be overridden at runtime
//! via a dedicated environment variable.

use std::path::PathBuf;

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Get the tracing filter directive.
///
/// Priority:
/// 1. `CHESSTTY_LOG` env variable if set
/// 2. `info` as fallback
pub fn get_log_filter() -> String {
    if let Ok(filter) = std::env::var("CHESSTTY_LOG") {
        return filter;
    }

    DEFAULT_LOG_FILTER.to_string()
}

/// Get the directory that daily log files are written to.
///
/// Priority:
/// 1. `CHESSTTY_LOG_DIR` env variable if set
/// 2. `None`: logs go to stderr so stdout stays clean JSON
pub fn get_log_dir() -> Option<PathBuf> {
    std::env::var_os("CHESSTTY_LOG_DIR").map(PathBuf::from)
}
