//! Configuration file I/O operations

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use super::Config;

impl Config {
    /// Get the global config directory path (~/.mindspark/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mindspark")
    }

    /// Get the global config file path (~/.mindspark/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to a file with atomic write and file locking.
    ///
    /// An exclusive lock keeps concurrent writers out; the temp file + rename
    /// keeps a crash from leaving a half-written config.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        let _lock = lock_config(path)?;
        write_atomic(path, &content)
    }

    /// Load global configuration from ~/.mindspark/config.toml
    /// If no config exists, auto-creates one with defaults.
    pub fn load() -> Result<Self> {
        Self::load_or_init(&Self::global_config_path())
    }

    /// Load configuration from `path`, creating it with defaults if missing
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::auto_init(path)?;
        }
        Self::from_file(path)
    }

    /// Write the default configuration to `path` unless another process beat us to it
    fn auto_init(path: &Path) -> Result<()> {
        let _lock = lock_config(path)?;

        // Re-check after acquiring the lock
        if path.exists() {
            return Ok(());
        }

        let content = toml::to_string_pretty(&Self::default())
            .with_context(|| "Failed to serialize default config")?;
        write_atomic(path, &content)?;

        tracing::info!(path = %path.display(), "Created default config");
        Ok(())
    }
}

/// Take the exclusive lock guarding `path`; released when the file is dropped
fn lock_config(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
    }

    // Separate from the config itself so the rename can't drop the lock
    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    Ok(lock_file)
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("toml.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

    temp_file
        .write_all(content.as_bytes())
        .with_context(|| "Failed to write config content")?;

    temp_file
        .sync_all()
        .with_context(|| "Failed to sync config file")?;

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename config file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use tempfile::tempdir;

    #[test]
    fn test_load_or_init_creates_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_or_init(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
        assert!(!path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.storage.backend = StorageBackend::Memory;
        config.scoring.speed_run_secs = 45.5;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_or_init(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[history\nlimit = ").unwrap();
        assert!(Config::from_file(&path).is_err());
    }
}
