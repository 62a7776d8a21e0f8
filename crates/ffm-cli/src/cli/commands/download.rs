//! `ffm batch` / `ffm all` – drive the folder page through download cycles.

use anyhow::{bail, Context, Result};
use ffm_core::config::FfmConfig;
use ffm_core::cycle::CycleTimeouts;
use ffm_core::driver::{self, RunAction, RunRequest};
use ffm_core::folder_key;
use ffm_core::page::ChromePage;
use ffm_core::progress_db::ProgressDb;

use crate::cli::browser::BrowserSession;

pub async fn run_batch(
    db: &ProgressDb,
    cfg: &FfmConfig,
    url: &str,
    batch_size: Option<usize>,
    include_folders: bool,
) -> Result<()> {
    run_download(db, cfg, url, batch_size, include_folders, RunAction::Batch).await
}

pub async fn run_all(
    db: &ProgressDb,
    cfg: &FfmConfig,
    url: &str,
    batch_size: Option<usize>,
    include_folders: bool,
) -> Result<()> {
    run_download(db, cfg, url, batch_size, include_folders, RunAction::All).await
}

async fn run_download(
    db: &ProgressDb,
    cfg: &FfmConfig,
    url: &str,
    batch_size: Option<usize>,
    include_folders: bool,
    action: RunAction,
) -> Result<()> {
    if !folder_key::is_supported(url) {
        bail!("not a files.fm page: {url}");
    }
    let key = folder_key::folder_key(url)?;

    // Flags override the saved settings for this invocation only.
    let request = RunRequest::new(
        batch_size.unwrap_or(cfg.batch_size),
        include_folders || cfg.include_folders,
        key,
        action,
    )?;
    let timeouts = cfg
        .waits
        .as_ref()
        .map(CycleTimeouts::from)
        .unwrap_or_default();

    let session = BrowserSession::attach(cfg)
        .await
        .context("failed to attach to a browser")?;
    let page = session
        .folder_page(url)
        .await
        .context("failed to open the folder page")?;
    let page = ChromePage::new(page);

    tracing::info!(
        action = request.action.as_str(),
        folder_key = %request.folder_key,
        batch_size = request.batch_size,
        "starting run"
    );
    let outcome = driver::run(&page, db, &request, timeouts).await?;

    if outcome.completed {
        println!("All files for this folder have been processed!");
    } else {
        println!(
            "Processed: {} / {}\nRemaining: {}",
            outcome.processed, outcome.total_files, outcome.remaining
        );
    }
    Ok(())
}
