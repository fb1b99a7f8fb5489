//! Init command implementation

use anyhow::{Result, bail};
use std::path::Path;

use mindspark::config::Config;

/// Default configuration content for `mindspark init`
pub const DEFAULT_CONFIG: &str = r#"# MindSpark Configuration
# =======================

# ============================================================================
# STORAGE - Where progress is kept
# ============================================================================
#
#   backend - "sqlite" (default) or "memory" (nothing survives exit)
#   path    - Database file (default: ~/.mindspark/progress.db)

[storage]
backend = "sqlite"
# path = "/path/to/progress.db"

# ============================================================================
# HISTORY
# ============================================================================
#
#   limit - Quiz results kept; the oldest are dropped first (default: 100)

[history]
limit = 100

# ============================================================================
# SCORING
# ============================================================================
#
#   quiz_max_points    - Points for a perfect quiz, partial scores get a share (default: 100)
#   puzzle_base_points - Points per solved puzzle, times difficulty 1-4 (default: 50)
#   speed_run_secs     - Quizzes finished within this count for time challenges (default: 120)

[scoring]
quiz_max_points = 100
puzzle_base_points = 50
speed_run_secs = 120.0

# ============================================================================
# TIMERS
# ============================================================================
#
#   puzzle_sample_ms - Puzzle elapsed-time sampling interval (default: 100)
#
# Quiz countdowns always tick once per second.

[timers]
puzzle_sample_ms = 100
"#;

/// Write the default configuration.
/// By default creates the global config at ~/.mindspark/config.toml
pub fn init_command(config_path: Option<&Path>, force: bool) -> Result<()> {
    let global = Config::global_config_path();
    let config_path = config_path.unwrap_or(&global);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
