//! Tracing subscriber setup

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::AppConfig;
use crate::error::{BakfietsError, Result};

/// Filter from `RUST_LOG`, falling back to the configured default
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber.
///
/// Logs go to `config.log_file` when set (appended, no colors), otherwise to
/// stderr. Calling this twice is a no-op.
pub fn init_tracing(config: &AppConfig) -> Result<()> {
    let filter = env_filter(&config.log_filter);

    let result = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    BakfietsError::config(format!("cannot open log file {:?}: {}", path, e))
                })?;
            fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    };

    if result.is_err() {
        debug!("Global subscriber already set, keeping it");
    }
    Ok(())
}
