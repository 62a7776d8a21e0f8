//! files.fm page adapter over the Chrome DevTools Protocol.
//!
//! Row enumeration and state sampling go through `evaluate` so one CDP
//! round-trip covers the whole container; control clicks go through
//! `find_element`/`click` so the page sees real input events.

use async_trait::async_trait;
use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ControlState, MasterDeselect, PageItem, PageUi, UiError};

const ROW_SELECTOR: &str = "div.main_content div.item.item-selectable";
/// Class marking folder-type rows inside the item container.
const FOLDER_CLASS: &str = "upload";
const ROW_CHECKBOX_SELECTOR: &str = "input.item_selector";
const DOWNLOAD_CONTROL_ID: &str = "filebrowser_top_action__multi_download";
const MASTER_DESELECT_ID: &str = "filebrowser_top_action__multi_select_deselect";
const BANNER_ID: &str = "ffm-bulk-banner";
const BANNER_STATUS_ID: &str = "ffm-bulk-banner-status";

#[derive(Debug, Deserialize)]
struct RawRow {
    id: String,
    folder: bool,
}

/// [`PageUi`] over a live files.fm tab.
pub struct ChromePage {
    page: Page,
}

impl ChromePage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Evaluate JS that returns a value the adapter deserializes.
    async fn eval<T: DeserializeOwned>(&self, js: String) -> Result<T, UiError> {
        Ok(self.page.evaluate(js).await?.into_value()?)
    }

    /// Evaluate JS for its side effect only.
    async fn exec(&self, js: String) -> Result<(), UiError> {
        self.page.evaluate(js).await?;
        Ok(())
    }
}

#[async_trait]
impl PageUi for ChromePage {
    async fn list_rows(&self) -> Result<Vec<PageItem>, UiError> {
        let js = format!(
            "Array.from(document.querySelectorAll('{ROW_SELECTOR}'))\
             .map(el => ({{ id: el.id, folder: el.classList.contains('{FOLDER_CLASS}') }}))"
        );
        let rows: Vec<RawRow> = self.eval(js).await?;
        Ok(rows
            .into_iter()
            .map(|row| PageItem {
                id: row.id,
                is_folder: row.folder,
            })
            .collect())
    }

    async fn toggle_row(&self, id: &str) -> Result<bool, UiError> {
        let id_json = serde_json::to_string(id)?;
        let js = format!(
            r#"(() => {{
                const row = document.getElementById({id_json});
                if (!row) return false;
                const box = row.querySelector('{ROW_CHECKBOX_SELECTOR}');
                if (!box) return false;
                box.click();
                return true;
            }})()"#
        );
        self.eval(js).await
    }

    async fn download_control(&self) -> Result<ControlState, UiError> {
        let js = format!(
            r#"(() => {{
                const el = document.getElementById('{DOWNLOAD_CONTROL_ID}');
                if (!el) return 'missing';
                return el.style.display === 'none' ? 'hidden' : 'actionable';
            }})()"#
        );
        let state: String = self.eval(js).await?;
        Ok(match state.as_str() {
            "actionable" => ControlState::Actionable,
            "hidden" => ControlState::Hidden,
            _ => ControlState::Missing,
        })
    }

    async fn invoke_download(&self) -> Result<(), UiError> {
        let control = self
            .page
            .find_element(format!("#{DOWNLOAD_CONTROL_ID}"))
            .await
            .map_err(|_| UiError::MissingControl("bulk download control"))?;
        control.click().await?;
        Ok(())
    }

    async fn master_deselect(&self) -> Result<MasterDeselect, UiError> {
        let js = format!(
            r#"(() => {{
                const el = document.getElementById('{MASTER_DESELECT_ID}');
                if (!el) return 'missing';
                return el.checked ? 'checked' : 'unchecked';
            }})()"#
        );
        let state: String = self.eval(js).await?;
        Ok(match state.as_str() {
            "checked" => MasterDeselect::Checked,
            "unchecked" => MasterDeselect::Unchecked,
            _ => MasterDeselect::Missing,
        })
    }

    async fn clear_master_deselect(&self) -> Result<(), UiError> {
        let control = self
            .page
            .find_element(format!("#{MASTER_DESELECT_ID}"))
            .await
            .map_err(|_| UiError::MissingControl("master deselect control"))?;
        control.click().await?;
        Ok(())
    }

    async fn show_banner(&self) -> Result<(), UiError> {
        let js = format!(
            r#"(() => {{
                if (document.getElementById('{BANNER_ID}')) return;
                const overlay = document.createElement('div');
                overlay.id = '{BANNER_ID}';
                overlay.style.cssText =
                    'position: fixed; top: 0; left: 0; width: 100vw; height: 100vh;' +
                    'background-color: rgba(0, 0, 0, 0.75); z-index: 99999999;' +
                    'display: flex; justify-content: center; align-items: center;' +
                    'color: white; font-size: 24px; font-family: Arial, sans-serif;';
                overlay.innerHTML =
                    '<div style="text-align: center; padding: 20px; background: rgba(0,0,0,0.5); border-radius: 10px;">' +
                    '<p>Automatic download in progress...</p>' +
                    '<p style="font-size: 16px;">Please keep this tab open.</p>' +
                    '<p id="{BANNER_STATUS_ID}" style="font-size: 18px; margin-top: 20px;"></p>' +
                    '</div>';
                document.body.appendChild(overlay);
            }})()"#
        );
        self.exec(js).await
    }

    async fn update_banner(&self, text: &str) -> Result<(), UiError> {
        let text_json = serde_json::to_string(text)?;
        let js = format!(
            r#"(() => {{
                const el = document.getElementById('{BANNER_STATUS_ID}');
                if (el) el.textContent = {text_json};
            }})()"#
        );
        self.exec(js).await
    }

    async fn remove_banner(&self) -> Result<(), UiError> {
        let js = format!(
            r#"(() => {{
                const el = document.getElementById('{BANNER_ID}');
                if (el) el.remove();
            }})()"#
        );
        self.exec(js).await
    }
}
