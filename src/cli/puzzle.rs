//! Puzzle command implementation

use anyhow::{Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};

use mindspark::domain::{Puzzle, PuzzleAnswer, PuzzleData};
use mindspark::timer::TickDriver;

use super::{CliContext, format_secs};

/// Play collection puzzle `number` (1-based), or list the collection
pub async fn puzzle_command(ctx: &CliContext, number: Option<usize>) -> Result<()> {
    let (mut tracker, _) = ctx.open_tracker()?;

    let Some(number) = number else {
        list_puzzles(tracker.puzzle().puzzles());
        return Ok(());
    };
    let Some(puzzle) = number
        .checked_sub(1)
        .and_then(|i| tracker.puzzle().puzzles().get(i))
        .cloned()
    else {
        list_puzzles(tracker.puzzle().puzzles());
        bail!("No puzzle #{}", number);
    };

    println!("{} ({}, {})", puzzle.title, puzzle.kind.label(), puzzle.difficulty);
    println!("{}", puzzle.description);
    print_prompt(&puzzle.data);

    let data = puzzle.data.clone();
    let token = tracker.start_puzzle(puzzle);
    let (driver, mut ticks) = TickDriver::spawn(tracker.puzzle().sample_period(), token);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let line = loop {
        tokio::select! {
            Some(token) = ticks.recv() => {
                tracker.puzzle_tick(token);
            }
            line = lines.next_line() => break line?,
        }
    };
    driver.stop();

    let Some(line) = line else {
        tracker.reset_puzzle();
        println!("Puzzle abandoned.");
        return Ok(());
    };

    let input = line.trim();
    // No in-core rule for memory and logic payloads; take the player's word
    let success = judge(&data, input)
        .unwrap_or_else(|| matches!(input.to_lowercase().as_str(), "y" | "yes"));

    let Some(report) = tracker.finish_puzzle(success)? else {
        return Ok(());
    };
    let outcome = &report.outcome;
    if outcome.success {
        println!("✅ Solved in {}", format_secs(outcome.seconds));
        if outcome.new_best {
            println!("🏁 New best time!");
        }
        println!("+{} points", report.points);
    } else {
        println!("❌ Not quite. Time: {}", format_secs(outcome.seconds));
    }
    Ok(())
}

fn list_puzzles(puzzles: &[Puzzle]) {
    println!("Puzzles:");
    for (i, puzzle) in puzzles.iter().enumerate() {
        let best = puzzle
            .best_time
            .map(|t| format!(", best {}", format_secs(t)))
            .unwrap_or_default();
        let done = if puzzle.is_completed { " ✓" } else { "" };
        println!(
            "  {}. {} [{} / {}{}]{}",
            i + 1,
            puzzle.title,
            puzzle.kind.label(),
            puzzle.difficulty,
            best,
            done
        );
    }
}

fn print_prompt(data: &PuzzleData) {
    match data {
        PuzzleData::WordScramble {
            scrambled, hints, ..
        } => {
            println!("\n  {}", scrambled);
            if let Some(hint) = hints.first() {
                println!("  Hint: {}", hint);
            }
            println!("Your word:");
        }
        PuzzleData::MathChallenge { equation, .. } => {
            println!("\n  {} = ?", equation);
            println!("Your answer:");
        }
        PuzzleData::PatternSequence { sequence, options } => {
            let seq: Vec<String> = sequence.iter().map(|n| n.to_string()).collect();
            let opts: Vec<String> = options.iter().map(|n| n.to_string()).collect();
            println!("\n  {}, ?", seq.join(", "));
            println!("  Options: {}", opts.join(" / "));
            println!("Your choice:");
        }
        PuzzleData::MemoryGame { cards } => {
            println!("\n  {} cards, find every pair.", cards.len());
            println!("Solved? [y/N]");
        }
        PuzzleData::LogicGrid { grid } => {
            println!();
            for row in grid {
                let cells: Vec<String> = row
                    .iter()
                    .map(|n| if *n == 0 { "_".to_string() } else { n.to_string() })
                    .collect();
                println!("  {}", cells.join(" "));
            }
            println!("Solved? [y/N]");
        }
    }
}

/// Check typed input with the in-core rule. `None` when the payload has none.
///
/// Input that doesn't parse for the payload counts as a wrong answer.
fn judge(data: &PuzzleData, input: &str) -> Option<bool> {
    let answer = match data {
        PuzzleData::WordScramble { .. } => PuzzleAnswer::Word(input.to_string()),
        PuzzleData::MathChallenge { .. } => match input.parse::<f64>() {
            Ok(n) => PuzzleAnswer::Number(n),
            Err(_) => return Some(false),
        },
        PuzzleData::PatternSequence { .. } => match input.parse::<i64>() {
            Ok(n) => PuzzleAnswer::Choice(n),
            Err(_) => return Some(false),
        },
        PuzzleData::MemoryGame { .. } | PuzzleData::LogicGrid { .. } => return None,
    };
    Some(data.check_answer(&answer).unwrap_or(false))
}
