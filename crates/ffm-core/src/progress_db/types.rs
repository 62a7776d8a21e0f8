//! Types stored in and derived from the progress ledger.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-folder progress: the resumable ledger behind every run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Last-observed count of qualifying rows in the folder. Items can be
    /// added or removed externally between runs, so authoritative scans
    /// correct this.
    pub total_files: i64,
    /// Ids of rows whose download was triggered. Grows monotonically until
    /// an explicit reset; ids of rows that later vanish from the page are
    /// tolerated, not purged.
    pub processed_ids: BTreeSet<String>,
}

impl ProgressRecord {
    pub fn processed(&self) -> i64 {
        self.processed_ids.len() as i64
    }

    pub fn remaining(&self) -> i64 {
        self.total_files - self.processed()
    }
}

/// Row for the all-folders status table.
#[derive(Debug, Clone)]
pub struct FolderSummary {
    pub folder_key: String,
    pub total_files: i64,
    pub processed: i64,
    pub updated_at: i64,
}

/// User-facing status text, derived purely from the stored record.
pub fn status_line(record: Option<&ProgressRecord>) -> String {
    match record {
        None => "Ready to start. Run `ffm batch <url>` or `ffm all <url>`.".to_string(),
        Some(record) => {
            let mut line = format!(
                "Processed: {} / {}\nRemaining: {}",
                record.processed(),
                record.total_files,
                record.remaining()
            );
            if record.remaining() <= 0 {
                line.push_str("\n\nAll items processed!");
            }
            line
        }
    }
}
