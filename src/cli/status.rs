//! Status command implementation

use anyhow::Result;

use mindspark::clock::local_day;
use mindspark::profile::StreakChange;

use super::{CliContext, format_secs};

/// Show profile, streak, statistics and achievements
pub fn status_command(ctx: &CliContext) -> Result<()> {
    let (tracker, _) = ctx.open_tracker()?;
    let profile = tracker.profile().profile();
    let stats = &profile.statistics;

    println!("{} ({} points)", profile.username, profile.total_points);
    println!("  Member since {}", local_day(profile.created_at));

    let streak_note = match tracker.streak_change() {
        StreakChange::Extended => " (extended today)",
        StreakChange::Restarted => " (new streak)",
        StreakChange::ClockSkew => " (clock moved backwards, left unchanged)",
        StreakChange::Unchanged => "",
    };
    println!(
        "  Streak: {} day(s){}, longest {}",
        profile.streak, streak_note, profile.longest_streak
    );

    println!("\nStatistics:");
    println!("  Quizzes completed:    {}", stats.total_quizzes_completed);
    println!("  Average quiz score:   {:.1}%", stats.average_quiz_score);
    println!("  Perfect scores:       {}", stats.perfect_scores);
    println!("  Puzzles solved:       {}", stats.total_puzzles_solved);
    println!("  Challenges completed: {}", stats.total_challenges_completed);
    println!("  Time spent:           {}", format_secs(stats.total_time_spent));

    println!(
        "\nAchievements ({}/{}):",
        profile.unlocked_count(),
        profile.achievements.len()
    );
    for badge in &profile.achievements {
        if badge.is_unlocked {
            let when = badge
                .unlocked_at
                .map(|t| local_day(t).to_string())
                .unwrap_or_default();
            println!("  {} {} - {} ({})", badge.icon, badge.title, badge.description, when);
        } else {
            println!("  🔒 {} - {}", badge.title, badge.description);
        }
    }

    Ok(())
}
