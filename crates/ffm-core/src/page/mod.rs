//! Host-page access behind a small adapter trait.
//!
//! Everything that knows the files.fm DOM lives in `chrome`; the rest of
//! the engine sees only [`PageUi`], so scans and cycles can run against a
//! scripted fake in tests. If files.fm changes its markup, this module is
//! the blast radius.

mod chrome;
#[cfg(test)]
pub(crate) mod fake;

pub use chrome::ChromePage;

use async_trait::async_trait;

/// One selectable row in the current folder view.
///
/// Transient: the page can re-render at any time, so rows are rediscovered
/// by scanning on every cycle and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageItem {
    pub id: String,
    pub is_folder: bool,
}

/// Visibility of the bulk-download control, the page's readiness signal.
/// The page shows it asynchronously once a selection has propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    Actionable,
    Hidden,
    Missing,
}

/// State of the master select/deselect checkbox. Optional on the page;
/// when missing the cycle falls back to per-row deselection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterDeselect {
    Checked,
    Unchecked,
    Missing,
}

/// Error raised by a page adapter.
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    /// A control the automation cannot work without is gone
    /// (page redesign, or not a folder page at all). Fatal to the run.
    #[error("required page control missing: {0}")]
    MissingControl(&'static str),
    /// Browser transport failure.
    #[error("browser call failed: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
    /// The page returned data in a shape the adapter doesn't understand.
    #[error("unexpected page payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// The structural affordances the automation depends on: selectable rows
/// with stable ids, a bulk-download control whose visibility signals
/// readiness, and an optional master-deselect checkbox.
#[async_trait]
pub trait PageUi: Send + Sync {
    /// All selectable rows currently rendered, in page order.
    async fn list_rows(&self) -> Result<Vec<PageItem>, UiError>;

    /// Toggle one row's selection checkbox. Returns false when the row is
    /// no longer in the DOM (already-downloaded rows can disappear).
    async fn toggle_row(&self, id: &str) -> Result<bool, UiError>;

    async fn download_control(&self) -> Result<ControlState, UiError>;

    /// Click the bulk-download control. Invoked at most once per cycle.
    async fn invoke_download(&self) -> Result<(), UiError>;

    async fn master_deselect(&self) -> Result<MasterDeselect, UiError>;

    /// Click the master checkbox to clear the whole selection at once.
    async fn clear_master_deselect(&self) -> Result<(), UiError>;

    /// Cover the page with the "automatic download in progress" banner.
    async fn show_banner(&self) -> Result<(), UiError>;

    async fn update_banner(&self, text: &str) -> Result<(), UiError>;

    /// Remove the banner. Called on every exit path of a full run so the
    /// page is never left obstructed.
    async fn remove_banner(&self) -> Result<(), UiError>;
}
