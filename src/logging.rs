//! Log output for the binary.
//!
//! The game owns stdout, so events go to a file or nowhere.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::config::Config;

/// Install a global `tracing` subscriber that appends to `config.log_path`.
///
/// Returns `Ok(false)` and installs nothing when no path is configured.
pub fn init_logging(config: &Config) -> Result<bool> {
    let Some(path) = config.log_path.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install log subscriber: {e}"))?;

    Ok(true)
}
