//! Daily challenge commands

use anyhow::{Result, bail};

use mindspark::domain::DailyChallenge;

use super::{CliContext, short_id};

/// Show today's challenges
pub fn challenges_command(ctx: &CliContext) -> Result<()> {
    let (tracker, _) = ctx.open_tracker()?;
    let challenges = tracker.challenges().challenges();

    println!("Daily challenges ({}):\n", challenges.len());
    for challenge in challenges {
        print_challenge(challenge);
    }
    Ok(())
}

fn print_challenge(challenge: &DailyChallenge) {
    let state = if challenge.is_claimed {
        "claimed"
    } else if challenge.is_completed {
        "ready to claim"
    } else {
        "in progress"
    };
    let badge = challenge.reward.badge.as_deref().unwrap_or("");

    println!(
        "  [{}] {} {} - {}",
        short_id(&challenge.id.to_string()),
        badge,
        challenge.title,
        challenge.description
    );
    println!(
        "    {}/{} ({:.0}%) | {} | {} points",
        challenge.current_progress,
        challenge.target_value,
        challenge.progress_fraction() * 100.0,
        state,
        challenge.reward.points
    );
}

/// Claim a completed challenge by id prefix
pub fn claim_command(ctx: &CliContext, prefix: &str) -> Result<()> {
    let (mut tracker, _) = ctx.open_tracker()?;
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        bail!("Challenge id must not be empty");
    }

    let matches: Vec<_> = tracker
        .challenges()
        .challenges()
        .iter()
        .filter(|c| c.id.to_string().starts_with(&prefix))
        .map(|c| (c.id, c.title.clone()))
        .collect();

    let (id, title) = match matches.as_slice() {
        [one] => one.clone(),
        [] => bail!("No challenge today matches '{}'", prefix),
        _ => bail!("'{}' matches {} challenges, use a longer prefix", prefix, matches.len()),
    };

    match tracker.claim_challenge(id)? {
        Some(report) => {
            println!(
                "Claimed '{}': +{} points {}",
                title,
                report.reward.points,
                report.reward.badge.as_deref().unwrap_or("")
            );
        }
        None => println!("'{}' has nothing to claim (not completed or already claimed)", title),
    }
    Ok(())
}
