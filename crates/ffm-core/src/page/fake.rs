//! Scripted in-memory page for scanner/cycle/driver tests.

use async_trait::async_trait;
use std::sync::Mutex;

use super::{ControlState, MasterDeselect, PageItem, PageUi, UiError};

#[derive(Debug, Clone)]
struct FakeRow {
    id: String,
    is_folder: bool,
    selected: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    rows: Vec<FakeRow>,
    control_present: bool,
    /// When set, the control never reports actionable even while rows are
    /// selected (the page "never reacts").
    control_stuck_hidden: bool,
    master_present: bool,
    invoke_count: usize,
    banner_visible: bool,
    banner_texts: Vec<String>,
    banner_removals: usize,
}

pub(crate) struct FakePage {
    state: Mutex<FakeState>,
}

impl FakePage {
    pub(crate) fn with_rows(files: usize, folders: usize) -> Self {
        let mut rows = Vec::new();
        for i in 0..files {
            rows.push(FakeRow {
                id: format!("file_{i}"),
                is_folder: false,
                selected: false,
            });
        }
        for i in 0..folders {
            rows.push(FakeRow {
                id: format!("folder_{i}"),
                is_folder: true,
                selected: false,
            });
        }
        Self {
            state: Mutex::new(FakeState {
                rows,
                control_present: true,
                master_present: true,
                ..Default::default()
            }),
        }
    }

    pub(crate) fn without_control(self) -> Self {
        self.state.lock().unwrap().control_present = false;
        self
    }

    pub(crate) fn stuck_hidden(self) -> Self {
        self.state.lock().unwrap().control_stuck_hidden = true;
        self
    }

    pub(crate) fn without_master(self) -> Self {
        self.state.lock().unwrap().master_present = false;
        self
    }

    pub(crate) fn invoke_count(&self) -> usize {
        self.state.lock().unwrap().invoke_count
    }

    pub(crate) fn selected_count(&self) -> usize {
        self.state
            .lock()
            .unwrap()
            .rows
            .iter()
            .filter(|row| row.selected)
            .count()
    }

    pub(crate) fn banner_visible(&self) -> bool {
        self.state.lock().unwrap().banner_visible
    }

    pub(crate) fn banner_texts(&self) -> Vec<String> {
        self.state.lock().unwrap().banner_texts.clone()
    }

    pub(crate) fn banner_removals(&self) -> usize {
        self.state.lock().unwrap().banner_removals
    }
}

#[async_trait]
impl PageUi for FakePage {
    async fn list_rows(&self) -> Result<Vec<PageItem>, UiError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .rows
            .iter()
            .map(|row| PageItem {
                id: row.id.clone(),
                is_folder: row.is_folder,
            })
            .collect())
    }

    async fn toggle_row(&self, id: &str) -> Result<bool, UiError> {
        let mut state = self.state.lock().unwrap();
        match state.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.selected = !row.selected;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn download_control(&self) -> Result<ControlState, UiError> {
        let state = self.state.lock().unwrap();
        if !state.control_present {
            return Ok(ControlState::Missing);
        }
        if state.control_stuck_hidden {
            return Ok(ControlState::Hidden);
        }
        if state.rows.iter().any(|row| row.selected) {
            Ok(ControlState::Actionable)
        } else {
            Ok(ControlState::Hidden)
        }
    }

    async fn invoke_download(&self) -> Result<(), UiError> {
        let mut state = self.state.lock().unwrap();
        if !state.control_present {
            return Err(UiError::MissingControl("bulk download control"));
        }
        state.invoke_count += 1;
        Ok(())
    }

    async fn master_deselect(&self) -> Result<MasterDeselect, UiError> {
        let state = self.state.lock().unwrap();
        if !state.master_present {
            return Ok(MasterDeselect::Missing);
        }
        if state.rows.iter().any(|row| row.selected) {
            Ok(MasterDeselect::Checked)
        } else {
            Ok(MasterDeselect::Unchecked)
        }
    }

    async fn clear_master_deselect(&self) -> Result<(), UiError> {
        let mut state = self.state.lock().unwrap();
        if !state.master_present {
            return Err(UiError::MissingControl("master deselect control"));
        }
        for row in &mut state.rows {
            row.selected = false;
        }
        Ok(())
    }

    async fn show_banner(&self) -> Result<(), UiError> {
        self.state.lock().unwrap().banner_visible = true;
        Ok(())
    }

    async fn update_banner(&self, text: &str) -> Result<(), UiError> {
        self.state.lock().unwrap().banner_texts.push(text.to_string());
        Ok(())
    }

    async fn remove_banner(&self) -> Result<(), UiError> {
        let mut state = self.state.lock().unwrap();
        state.banner_visible = false;
        state.banner_removals += 1;
        Ok(())
    }
}
