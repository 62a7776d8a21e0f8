//! Classifies the current page rows against the progress ledger.

use anyhow::Result;
use std::collections::BTreeSet;
use tracing::debug;

use crate::page::{PageItem, PageUi};
use crate::progress_db::ProgressDb;

#[derive(Debug)]
pub struct ScanOutcome {
    /// Rows whose id is not yet in the ledger, in page order.
    pub unprocessed: Vec<PageItem>,
    /// The ledger's processed set as loaded for this scan.
    pub processed_ids: BTreeSet<String>,
    /// Fresh count of qualifying rows.
    pub total_files: i64,
}

/// Enumerate qualifying rows and split them into processed/unprocessed.
///
/// An `authoritative` scan (start of a run, and each pass of a full run)
/// also reconciles the stored total with the fresh count before any batch
/// is selected, so status reporting stays truthful even if the run is
/// interrupted right after. Zero rows is a valid outcome, not an error:
/// an empty `unprocessed` list is the completion signal.
pub async fn scan(
    page: &dyn PageUi,
    db: &ProgressDb,
    folder_key: &str,
    include_folders: bool,
    authoritative: bool,
) -> Result<ScanOutcome> {
    let mut rows = page.list_rows().await?;
    if !include_folders {
        rows.retain(|row| !row.is_folder);
    }
    let total_files = rows.len() as i64;

    let mut record = db.get_record(folder_key).await?.unwrap_or_default();
    let unprocessed: Vec<PageItem> = rows
        .into_iter()
        .filter(|row| !record.processed_ids.contains(&row.id))
        .collect();

    if authoritative && record.total_files != total_files {
        debug!(
            folder_key,
            stored = record.total_files,
            fresh = total_files,
            "reconciling folder total"
        );
        record.total_files = total_files;
        db.set_record(folder_key, &record).await?;
    }

    debug!(
        folder_key,
        total_files,
        unprocessed = unprocessed.len(),
        "scan complete"
    );
    Ok(ScanOutcome {
        unprocessed,
        processed_ids: record.processed_ids,
        total_files,
    })
}
