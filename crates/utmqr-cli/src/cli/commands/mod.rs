//! CLI command handlers. Each command is in its own file.

mod completions;
mod filename;
mod generate;
mod interactive;
mod man;
mod url;

pub use completions::run_completions;
pub use filename::run_filename;
pub use generate::run_generate;
pub use interactive::run_interactive;
pub use man::run_man;
pub use url::run_url;

use anyhow::Result;
use std::path::{Path, PathBuf};
use utmqr_core::config::UtmQrConfig;

/// Export directory: explicit flag, then config `output_dir`, then the current directory.
pub fn output_dir(cfg: &UtmQrConfig, flag: Option<&Path>) -> Result<PathBuf> {
    match flag.or(cfg.output_dir.as_deref()) {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(std::env::current_dir()?),
    }
}
