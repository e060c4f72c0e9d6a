//! Logging setup.
//!
//! The CLI logs to `$XDG_STATE_HOME/utmqr/utmqr.log`. When that file cannot
//! be opened it falls back to stderr at `warn`, so command output stays clean.
//! `RUST_LOG` overrides either default.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const FILE_FILTER: &str = "info,utmqr=debug,utmqr_core=debug";
const STDERR_FILTER: &str = "warn";

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Where the log file lives; the directory is not created.
pub fn log_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("utmqr")?;
    Ok(xdg_dirs.get_state_file("utmqr.log"))
}

/// Installs the file subscriber. An error leaves no subscriber installed, so
/// the caller can still pick [`init_logging_stderr`].
pub fn init_logging() -> Result<()> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("utmqr")?;
    let path = xdg_dirs
        .place_state_file("utmqr.log")
        .context("create log directory")?;
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter_or(FILE_FILTER))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    tracing::info!("utmqr logging to {}", path.display());
    Ok(())
}

/// Stderr-only subscriber for when the log file is unavailable.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_or(STDERR_FILTER))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
