use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Timing bounds for the two UI-state waits in a cycle (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Milliseconds to wait for the bulk-download control to become actionable after selecting.
    pub trigger_timeout_ms: u64,
    /// Milliseconds to wait for the control to hide again after deselecting.
    pub settle_timeout_ms: u64,
    /// Sampling interval for both waits, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            trigger_timeout_ms: 4_000,
            settle_timeout_ms: 5_000,
            poll_interval_ms: 150,
        }
    }
}

/// Global configuration loaded from `~/.config/ffm/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FfmConfig {
    /// Number of rows selected per download cycle.
    pub batch_size: usize,
    /// Also select folder rows (the page zips them), not just files.
    pub include_folders: bool,
    /// DevTools websocket endpoint of an already-running Chrome, e.g.
    /// `ws://127.0.0.1:9222/devtools/browser/<id>`. When unset, a headful
    /// Chrome is launched instead.
    #[serde(default)]
    pub cdp_url: Option<String>,
    /// Optional wait-timing overrides; built-in defaults are used when missing.
    #[serde(default)]
    pub waits: Option<WaitConfig>,
}

impl Default for FfmConfig {
    fn default() -> Self {
        Self {
            batch_size: 50,
            include_folders: false,
            cdp_url: None,
            waits: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ffm")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FfmConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FfmConfig::default();
        save(&default_cfg)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FfmConfig = toml::from_str(&data)?;
    Ok(cfg)
}

/// Persist the configuration, e.g. after `ffm config --batch-size N`.
pub fn save(cfg: &FfmConfig) -> Result<()> {
    let path = config_path()?;
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, toml)?;
    Ok(())
}
