//! Tracing setup.
//!
//! The terminal page owns stdout, so events go to a log file. The filter is
//! read from `ATOME_LOG` (`EnvFilter` syntax) and defaults to `info`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::AppError;

pub const ENV_FILTER: &str = "ATOME_LOG";
pub const DEFAULT_LOG_FILE: &str = "atome.log";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(ENV_FILTER).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Append events to `path`. Safe to call more than once; later calls are no-ops.
pub fn init_file(path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::runtime(format!("Failed to open log file '{}': {e}", path.display())))?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .is_ok();
    if installed {
        tracing::info!(log_file = %path.display(), "logging initialized");
    }
    Ok(())
}

/// Write events to stderr; used by the non-interactive commands.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
