//! History command implementation

use anyhow::Result;

use mindspark::clock::local_day;

use super::{CliContext, format_secs};

/// Show the most recent quiz results, newest first
pub fn history_command(ctx: &CliContext, limit: usize) -> Result<()> {
    let (tracker, _) = ctx.open_tracker()?;
    let results = tracker.quiz_history();

    if results.is_empty() {
        println!("No quiz results yet.");
        return Ok(());
    }

    println!("Quiz history ({} stored):\n", results.len());
    for result in results.iter().rev().take(limit) {
        let category = result
            .category
            .map(|c| c.label().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {} {} [{}] {}/{} ({:.0}%) in {}{}",
            local_day(result.completed_at),
            result.quiz_title,
            category,
            result.correct_answers,
            result.total_questions,
            result.score,
            format_secs(result.time_taken),
            if result.is_perfect() { " ⭐" } else { "" }
        );
    }
    Ok(())
}
