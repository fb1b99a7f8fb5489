//! CLI command implementations

pub mod challenges;
pub mod history;
pub mod init;
pub mod puzzle;
pub mod quiz;
pub mod reset;
pub mod status;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use mindspark::clock::SystemClock;
use mindspark::config::Config;
use mindspark::events::ProgressEvent;
use mindspark::timer::TickToken;
use mindspark::tracker::Tracker;

/// Global flags shared by every command
pub struct CliContext {
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Self {
        Self {
            config_path,
            data_dir,
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn load_config(&self) -> Result<Config> {
        match &self.config_path {
            Some(path) => Config::load_or_init(path),
            None => Config::load(),
        }
    }

    /// Open the tracker on the configured storage, with event output on stdout
    pub fn open_tracker(&self) -> Result<(Tracker, Config)> {
        let config = self.load_config()?;
        let storage = config.open_storage(self.data_dir.as_deref())?;
        let mut tracker = Tracker::open(storage, Arc::new(SystemClock), &config)?;
        tracker.subscribe(print_event);
        Ok((tracker, config))
    }
}

/// Announce the events worth interrupting the player for
fn print_event(event: &ProgressEvent) {
    match event {
        ProgressEvent::AchievementUnlocked { title, .. } => {
            println!("🏆 Achievement unlocked: {}", title);
        }
        ProgressEvent::ChallengeCompleted { challenge_id } => {
            println!("✅ Daily challenge completed ({})", short_id(&challenge_id.to_string()));
        }
        _ => {}
    }
}

/// Next tick from an optional driver channel; pends forever without one
pub async fn next_tick(ticks: &mut Option<UnboundedReceiver<TickToken>>) -> Option<TickToken> {
    match ticks {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn format_secs(seconds: f64) -> String {
    let total = seconds.max(0.0);
    let minutes = (total / 60.0).floor() as u64;
    let secs = total - (minutes as f64) * 60.0;
    if minutes > 0 {
        format!("{}m {:04.1}s", minutes, secs)
    } else {
        format!("{:.1}s", secs)
    }
}
