//! Logging init: file under the XDG state dir, or graceful fallback to stderr.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,ffm=debug"))
}

fn try_init_file() -> Result<PathBuf> {
    let log_dir = xdg::BaseDirectories::with_prefix("ffm")?.get_state_home();
    fs::create_dir_all(&log_dir)?;
    let log_file_path = log_dir.join("ffm.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(log_file_path)
}

/// Initialize structured logging to `~/.local/state/ffm/ffm.log`.
/// When the state dir is unwritable, logs go to stderr instead so the CLI
/// still runs.
pub fn init() {
    match try_init_file() {
        Ok(path) => tracing::info!("ffm logging initialized at {}", path.display()),
        Err(err) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .init();
            tracing::warn!("file logging unavailable ({err:#}), using stderr");
        }
    }
}
