//! Settings sections of `config.toml`

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::store::QUIZ_HISTORY_LIMIT;

/// Where progress blobs are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite database file
    #[default]
    Sqlite,
    /// Process memory; nothing survives exit
    Memory,
}

/// `[storage]`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file; defaults to `progress.db` in the config directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// `[history]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Quiz results kept, oldest evicted first
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    QUIZ_HISTORY_LIMIT
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            limit: default_history_limit(),
        }
    }
}

/// `[scoring]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringSettings {
    /// Points for a perfect quiz; partial scores get a floored share
    #[serde(default = "default_quiz_max_points")]
    pub quiz_max_points: i64,

    /// Points for a solved puzzle before the difficulty multiplier
    #[serde(default = "default_puzzle_base_points")]
    pub puzzle_base_points: i64,

    /// Quizzes finished within this many seconds count towards time challenges
    #[serde(default = "default_speed_run_secs")]
    pub speed_run_secs: f64,
}

fn default_quiz_max_points() -> i64 {
    100
}

fn default_puzzle_base_points() -> i64 {
    50
}

fn default_speed_run_secs() -> f64 {
    120.0
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            quiz_max_points: default_quiz_max_points(),
            puzzle_base_points: default_puzzle_base_points(),
            speed_run_secs: default_speed_run_secs(),
        }
    }
}

/// `[timers]`
///
/// The quiz countdown always ticks once per second and is not configurable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSettings {
    #[serde(default = "default_puzzle_sample_ms")]
    pub puzzle_sample_ms: u64,
}

fn default_puzzle_sample_ms() -> u64 {
    100
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            puzzle_sample_ms: default_puzzle_sample_ms(),
        }
    }
}
