//! Configuration loading and management

mod io;
mod settings;

pub use settings::{
    HistorySettings, ScoringSettings, StorageBackend, StorageSettings, TimerSettings,
};

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::{MemoryStore, SqliteStore, Storage};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub history: HistorySettings,

    #[serde(default)]
    pub scoring: ScoringSettings,

    #[serde(default)]
    pub timers: TimerSettings,
}

impl Config {
    /// Database path, honoring a `--data-dir` override
    pub fn database_path(&self, data_dir: Option<&Path>) -> PathBuf {
        match (data_dir, &self.storage.path) {
            (Some(dir), _) => dir.join("progress.db"),
            (None, Some(path)) => path.clone(),
            (None, None) => Self::global_config_dir().join("progress.db"),
        }
    }

    /// Open the configured backend wrapped in a [`Storage`]
    pub fn open_storage(&self, data_dir: Option<&Path>) -> Result<Storage> {
        let storage = match self.storage.backend {
            StorageBackend::Sqlite => {
                let path = self.database_path(data_dir);
                let store = SqliteStore::open(&path).with_context(|| {
                    format!("Failed to open progress database: {}", path.display())
                })?;
                Storage::new(store)
            }
            StorageBackend::Memory => {
                tracing::debug!("Using in-memory progress storage");
                Storage::new(MemoryStore::new())
            }
        };
        Ok(storage.with_history_limit(self.history.limit))
    }

    pub fn puzzle_sample(&self) -> Duration {
        Duration::from_millis(self.timers.puzzle_sample_ms.max(1))
    }
}
