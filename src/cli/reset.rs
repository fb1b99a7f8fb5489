//! Reset command implementation

use anyhow::{Result, bail};

use super::CliContext;

/// Erase all progress
pub fn reset_command(ctx: &CliContext, yes: bool) -> Result<()> {
    if !yes {
        bail!("This erases your profile, history, puzzles and challenges.\nRe-run with --yes to confirm.");
    }

    let (mut tracker, _) = ctx.open_tracker()?;
    tracker.reset_all()?;
    println!("Progress reset. Welcome back, {}!", tracker.profile().profile().username);
    Ok(())
}
