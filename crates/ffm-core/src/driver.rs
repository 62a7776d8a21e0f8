//! Orchestrates scan/cycle passes: one batch, or run to completion.

use anyhow::Result;
use tracing::{info, warn};

use crate::cycle::{self, CycleTimeouts};
use crate::page::{PageItem, PageUi};
use crate::progress_db::ProgressDb;
use crate::scanner;

/// The requested action, named as the invocation boundary names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAction {
    Batch,
    All,
}

impl RunAction {
    pub fn as_str(self) -> &'static str {
        match self {
            RunAction::Batch => "DOWNLOAD_BATCH",
            RunAction::All => "DOWNLOAD_ALL",
        }
    }
}

/// Immutable per-invocation request. Built once at the control surface and
/// passed explicitly; nothing in the engine reads ambient settings.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub batch_size: usize,
    pub include_folders: bool,
    pub folder_key: String,
    pub action: RunAction,
}

impl RunRequest {
    pub fn new(
        batch_size: usize,
        include_folders: bool,
        folder_key: String,
        action: RunAction,
    ) -> Result<Self> {
        anyhow::ensure!(batch_size > 0, "batch size must be a positive integer");
        Ok(Self {
            batch_size,
            include_folders,
            folder_key,
            action,
        })
    }
}

/// Result of a run, read back from the persisted record so callers report
/// exactly what a later `status` would show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub total_files: i64,
    pub processed: i64,
    pub remaining: i64,
    pub completed: bool,
    /// Cycles that actually executed in this run.
    pub cycles: usize,
}

pub async fn run(
    page: &dyn PageUi,
    db: &ProgressDb,
    req: &RunRequest,
    timeouts: CycleTimeouts,
) -> Result<RunOutcome> {
    match req.action {
        RunAction::Batch => run_batch(page, db, req, timeouts).await,
        RunAction::All => {
            page.show_banner().await?;
            let result = run_all(page, db, req, timeouts).await;
            // Every exit path, error included: the page must not stay
            // obstructed.
            if let Err(err) = page.remove_banner().await {
                warn!("failed to remove progress banner: {err}");
            }
            result
        }
    }
}

async fn run_batch(
    page: &dyn PageUi,
    db: &ProgressDb,
    req: &RunRequest,
    timeouts: CycleTimeouts,
) -> Result<RunOutcome> {
    let scan = scanner::scan(page, db, &req.folder_key, req.include_folders, true).await?;
    if scan.unprocessed.is_empty() {
        info!(folder_key = %req.folder_key, "nothing left to process");
        return outcome(db, &req.folder_key, 0).await;
    }

    let batch = take_batch(scan.unprocessed, req.batch_size);
    cycle::run_cycle(
        page,
        db,
        &req.folder_key,
        req.include_folders,
        &batch,
        timeouts,
    )
    .await?;
    outcome(db, &req.folder_key, 1).await
}

async fn run_all(
    page: &dyn PageUi,
    db: &ProgressDb,
    req: &RunRequest,
    timeouts: CycleTimeouts,
) -> Result<RunOutcome> {
    let mut cycles = 0;
    loop {
        let scan = scanner::scan(page, db, &req.folder_key, req.include_folders, true).await?;
        if scan.unprocessed.is_empty() {
            info!(folder_key = %req.folder_key, cycles, "run complete");
            break;
        }

        let batch = take_batch(scan.unprocessed, req.batch_size);
        cycle::run_cycle(
            page,
            db,
            &req.folder_key,
            req.include_folders,
            &batch,
            timeouts,
        )
        .await?;
        cycles += 1;

        let record = db.get_record(&req.folder_key).await?.unwrap_or_default();
        page.update_banner(&format!(
            "Processed {} of {} files.",
            record.processed(),
            record.total_files
        ))
        .await?;
    }
    outcome(db, &req.folder_key, cycles).await
}

fn take_batch(unprocessed: Vec<PageItem>, batch_size: usize) -> Vec<PageItem> {
    unprocessed.into_iter().take(batch_size).collect()
}

async fn outcome(db: &ProgressDb, folder_key: &str, cycles: usize) -> Result<RunOutcome> {
    let record = db.get_record(folder_key).await?.unwrap_or_default();
    Ok(RunOutcome {
        total_files: record.total_files,
        processed: record.processed(),
        remaining: record.remaining(),
        completed: record.remaining() <= 0,
        cycles,
    })
}
