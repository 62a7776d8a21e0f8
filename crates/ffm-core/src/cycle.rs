//! One select → download → deselect → reconcile pass over a bounded batch.

use anyhow::Result;
use futures::FutureExt;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::WaitConfig;
use crate::page::{ControlState, MasterDeselect, PageItem, PageUi, UiError};
use crate::progress_db::{ProgressDb, ProgressRecord};
use crate::scanner;
use crate::wait::{self, WaitOutcome};

/// Bounds for the two observed-state waits in a cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleTimeouts {
    /// How long to wait for the bulk-download control to become actionable
    /// after selecting.
    pub trigger: Duration,
    /// How long to wait for it to hide again after deselecting.
    pub settle: Duration,
    /// Sampling interval for both waits.
    pub poll: Duration,
}

impl Default for CycleTimeouts {
    fn default() -> Self {
        Self {
            trigger: Duration::from_secs(4),
            settle: Duration::from_secs(5),
            poll: Duration::from_millis(150),
        }
    }
}

impl From<&WaitConfig> for CycleTimeouts {
    fn from(cfg: &WaitConfig) -> Self {
        Self {
            trigger: Duration::from_millis(cfg.trigger_timeout_ms),
            settle: Duration::from_millis(cfg.settle_timeout_ms),
            poll: Duration::from_millis(cfg.poll_interval_ms),
        }
    }
}

/// Map an observed control state onto a wait signal. A control that is
/// absent altogether (not merely hidden) means the page changed under us:
/// fatal, per the missing-control taxonomy.
fn control_signal(state: ControlState, want_actionable: bool) -> Result<bool, UiError> {
    match state {
        ControlState::Missing => Err(UiError::MissingControl("bulk download control")),
        ControlState::Actionable => Ok(want_actionable),
        ControlState::Hidden => Ok(!want_actionable),
    }
}

/// Run one cycle over `batch`.
///
/// Returns false for an empty batch (a no-op, not an error) and true after
/// a completed pass. Wait timeouts are logged and the cycle proceeds
/// optimistically; a missing bulk-download control aborts the run.
pub async fn run_cycle(
    page: &dyn PageUi,
    db: &ProgressDb,
    folder_key: &str,
    include_folders: bool,
    batch: &[PageItem],
    timeouts: CycleTimeouts,
) -> Result<bool> {
    if batch.is_empty() {
        return Ok(false);
    }

    info!(folder_key, batch = batch.len(), "selecting batch");
    for item in batch {
        if !page.toggle_row(&item.id).await? {
            warn!(id = %item.id, "row vanished before selection");
        }
    }

    // The page enables the control asynchronously once the selection has
    // propagated; invoke as soon as it reports actionable.
    let outcome = wait::until_signaled(timeouts.trigger, timeouts.poll, move || {
        async move { control_signal(page.download_control().await?, true) }.boxed()
    })
    .await?;
    if outcome == WaitOutcome::TimedOut {
        warn!("bulk-download control not actionable in time, invoking anyway");
    }
    page.invoke_download().await?;

    match page.master_deselect().await? {
        MasterDeselect::Checked => page.clear_master_deselect().await?,
        MasterDeselect::Unchecked | MasterDeselect::Missing => {
            for item in batch {
                if !page.toggle_row(&item.id).await? {
                    debug!(id = %item.id, "row vanished before deselection");
                }
            }
        }
    }

    // Confirm the page registered the deselection before the next cycle
    // reselects; a stale selection would double-count the next batch.
    let outcome = wait::until_signaled(timeouts.settle, timeouts.poll, move || {
        async move { control_signal(page.download_control().await?, false) }.boxed()
    })
    .await?;
    if outcome == WaitOutcome::TimedOut {
        warn!("bulk-download control still visible after deselection, proceeding");
    }

    // Reconcile: every batch id counts as processed even if the page no
    // longer shows the row (downloaded items can disappear from view).
    let fresh = scanner::scan(page, db, folder_key, include_folders, false).await?;
    let mut record = ProgressRecord {
        total_files: fresh.total_files,
        processed_ids: fresh.processed_ids,
    };
    for item in batch {
        record.processed_ids.insert(item.id.clone());
    }
    db.set_record(folder_key, &record).await?;

    info!(
        folder_key,
        processed = record.processed(),
        total = record.total_files,
        "cycle complete"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fake::FakePage;
    use crate::progress_db::open_memory;

    const KEY: &str = "progress_files.fm/u/test";

    fn fast() -> CycleTimeouts {
        CycleTimeouts {
            trigger: Duration::from_millis(30),
            settle: Duration::from_millis(30),
            poll: Duration::from_millis(2),
        }
    }

    async fn first_batch(page: &FakePage, db: &crate::progress_db::ProgressDb, n: usize) -> Vec<PageItem> {
        let scan = scanner::scan(page, db, KEY, false, true).await.unwrap();
        scan.unprocessed.into_iter().take(n).collect()
    }

    #[tokio::test]
    async fn empty_batch_is_a_no_op() {
        let page = FakePage::with_rows(3, 0);
        let db = open_memory().await.unwrap();

        let ran = run_cycle(&page, &db, KEY, false, &[], fast()).await.unwrap();
        assert!(!ran);
        assert_eq!(page.invoke_count(), 0);
    }

    #[tokio::test]
    async fn cycle_processes_exactly_the_batch() {
        let page = FakePage::with_rows(7, 0);
        let db = open_memory().await.unwrap();
        let batch = first_batch(&page, &db, 5).await;
        assert_eq!(batch.len(), 5);

        let ran = run_cycle(&page, &db, KEY, false, &batch, fast()).await.unwrap();
        assert!(ran);
        assert_eq!(page.invoke_count(), 1);
        // Deselection went through the master checkbox.
        assert_eq!(page.selected_count(), 0);

        let record = db.get_record(KEY).await.unwrap().unwrap();
        assert_eq!(record.processed(), 5);
        assert_eq!(record.total_files, 7);
    }

    #[tokio::test]
    async fn batch_bound_is_min_of_size_and_remaining() {
        let page = FakePage::with_rows(3, 0);
        let db = open_memory().await.unwrap();
        let batch = first_batch(&page, &db, 5).await;
        assert_eq!(batch.len(), 3);

        run_cycle(&page, &db, KEY, false, &batch, fast()).await.unwrap();
        let record = db.get_record(KEY).await.unwrap().unwrap();
        assert_eq!(record.processed(), 3);
    }

    #[tokio::test]
    async fn missing_control_is_fatal() {
        let page = FakePage::with_rows(3, 0).without_control();
        let db = open_memory().await.unwrap();
        let batch = first_batch(&page, &db, 2).await;

        let err = run_cycle(&page, &db, KEY, false, &batch, fast())
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<UiError>(),
            Some(UiError::MissingControl(_))
        ));
        assert_eq!(page.invoke_count(), 0);
        // No progress is recorded for an aborted cycle.
        assert!(db.get_record(KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stuck_control_still_invoked_once() {
        // The control never becomes actionable: the trigger wait times out
        // and the cycle invokes optimistically instead of failing.
        let page = FakePage::with_rows(3, 0).stuck_hidden();
        let db = open_memory().await.unwrap();
        let batch = first_batch(&page, &db, 3).await;

        let ran = run_cycle(&page, &db, KEY, false, &batch, fast()).await.unwrap();
        assert!(ran);
        assert_eq!(page.invoke_count(), 1);
    }

    #[tokio::test]
    async fn per_row_deselect_when_master_missing() {
        let page = FakePage::with_rows(4, 0).without_master();
        let db = open_memory().await.unwrap();
        let batch = first_batch(&page, &db, 4).await;

        run_cycle(&page, &db, KEY, false, &batch, fast()).await.unwrap();
        assert_eq!(page.selected_count(), 0);
    }

    #[tokio::test]
    async fn vanished_batch_rows_still_recorded() {
        let page = FakePage::with_rows(2, 0);
        let db = open_memory().await.unwrap();
        let mut batch = first_batch(&page, &db, 2).await;
        batch.push(PageItem {
            id: "ghost".to_string(),
            is_folder: false,
        });

        run_cycle(&page, &db, KEY, false, &batch, fast()).await.unwrap();
        let record = db.get_record(KEY).await.unwrap().unwrap();
        assert!(record.processed_ids.contains("ghost"));
        assert_eq!(record.processed(), 3);
        assert_eq!(record.total_files, 2);
    }
}
