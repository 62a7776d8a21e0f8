//! `ffm config` – show or update the saved settings.

use anyhow::Result;
use ffm_core::config::{self, FfmConfig};

pub fn run_config(
    mut cfg: FfmConfig,
    batch_size: Option<usize>,
    include_folders: Option<bool>,
) -> Result<()> {
    if batch_size.is_none() && include_folders.is_none() {
        println!("batch_size = {}", cfg.batch_size);
        println!("include_folders = {}", cfg.include_folders);
        return Ok(());
    }

    if let Some(n) = batch_size {
        anyhow::ensure!(n > 0, "batch size must be a positive integer");
        cfg.batch_size = n;
    }
    if let Some(flag) = include_folders {
        cfg.include_folders = flag;
    }
    config::save(&cfg)?;
    println!("Settings saved.");
    Ok(())
}
