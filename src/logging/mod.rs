//! Diagnostic logging to disk.
//!
//! The terminal belongs to the UI, so `tracing` output goes to a daily file
//! named `crabshelf_<date>.log` in the configured log directory (default:
//! `~/.local/share/crabshelf/logs/`). Logging is off unless enabled in config.

use crate::config::{expand_home, LoggingConfig};
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Level;

fn log_file_name(date: NaiveDate) -> String {
    format!("crabshelf_{}.log", date.format("%Y-%m-%d"))
}

/// Install the global subscriber. Returns the log file path when logging is
/// enabled.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let level: Level = config
        .level
        .parse()
        .with_context(|| format!("Invalid log level '{}'", config.level))?;

    let log_dir = expand_home(&config.log_dir);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let path = log_dir.join(log_file_name(chrono::Local::now().date_naive()));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "logging started");
    Ok(Some(path))
}
