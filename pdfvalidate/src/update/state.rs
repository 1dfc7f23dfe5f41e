//! Persisted update-check state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// When the update check last ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCheckState {
    /// Calendar date of the last check, stored as `YYYY-MM-DD`.
    #[serde(alias = "last_check")]
    pub last_check_date: NaiveDate,
}

/// File-backed store for [`UpdateCheckState`].
///
/// The file holds a single record and is replaced wholesale on save.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state.
    ///
    /// A missing or unreadable file yields `None`.
    pub async fn load(&self) -> Option<UpdateCheckState> {
        let bytes = tokio::fs::read(&self.path).await.ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Replace the stored state.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be serialized or written.
    pub async fn save(&self, state: &UpdateCheckState) -> anyhow::Result<()> {
        let json = serde_json::to_vec(state)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
