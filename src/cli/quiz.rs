//! Interactive quiz command

use anyhow::{Result, bail};
use tokio::io::{AsyncBufReadExt, BufReader};

use mindspark::catalog;
use mindspark::domain::Quiz;
use mindspark::timer::TickDriver;
use mindspark::tracker::{QuizReport, Tracker};

use super::{CliContext, format_secs, next_tick};

/// Play sample quiz `number` (1-based), or list the quizzes
pub async fn quiz_command(ctx: &CliContext, number: Option<usize>) -> Result<()> {
    let quizzes = catalog::sample_quizzes();

    let Some(number) = number else {
        list_quizzes(&quizzes);
        return Ok(());
    };
    let Some(quiz) = number.checked_sub(1).and_then(|i| quizzes.get(i)).cloned() else {
        list_quizzes(&quizzes);
        bail!("No quiz #{}", number);
    };

    let (mut tracker, _) = ctx.open_tracker()?;
    println!(
        "{} - {} ({}, {} questions)",
        quiz.title,
        quiz.category,
        quiz.difficulty,
        quiz.questions.len()
    );
    if let Some(limit) = quiz.time_limit {
        println!("Time limit: {}s", limit);
    }
    println!("Answer with the option number. 'p' goes back, 'n' skips, 'q' quits.\n");

    let token = tracker.start_quiz(quiz);
    let (_driver, mut ticks) = match token {
        Some(token) => {
            let (driver, rx) = TickDriver::spawn(tracker.quiz().tick_period(), token);
            (Some(driver), Some(rx))
        }
        None => (None, None),
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    print_question(&tracker);

    let report = loop {
        tokio::select! {
            Some(token) = next_tick(&mut ticks) => {
                if let Some(report) = tracker.quiz_tick(token)? {
                    println!("\n⏰ Time's up!");
                    break Some(report);
                }
                if let Some(left) = tracker.quiz().time_remaining() {
                    if left <= 5 || left % 15 == 0 {
                        println!("  ⏱ {}s left", left);
                    }
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracker.reset_quiz();
                    break None;
                };
                match line.trim() {
                    "q" => {
                        tracker.reset_quiz();
                        break None;
                    }
                    "p" => {
                        if !tracker.retreat_quiz() {
                            println!("Already at the first question.");
                        }
                        print_question(&tracker);
                    }
                    "n" | "" => {
                        if let Some(report) = tracker.advance_quiz()? {
                            break Some(report);
                        }
                        print_question(&tracker);
                    }
                    input => match input.parse::<usize>() {
                        Ok(choice) if choice >= 1 => {
                            tracker.select_answer(choice - 1);
                            if let Some(report) = tracker.advance_quiz()? {
                                break Some(report);
                            }
                            print_question(&tracker);
                        }
                        _ => println!("Enter an option number, 'p', 'n' or 'q'."),
                    },
                }
            }
        }
    };

    match report {
        Some(report) => print_report(&report),
        None => println!("Quiz abandoned."),
    }
    Ok(())
}

fn list_quizzes(quizzes: &[Quiz]) {
    println!("Sample quizzes:");
    for (i, quiz) in quizzes.iter().enumerate() {
        let timed = quiz
            .time_limit
            .map(|s| format!(", {}s", s))
            .unwrap_or_default();
        println!(
            "  {}. {} [{} / {}{}]",
            i + 1,
            quiz.title,
            quiz.category,
            quiz.difficulty,
            timed
        );
    }
}

fn print_question(tracker: &Tracker) {
    let session = tracker.quiz();
    let Some(quiz) = session.quiz() else {
        return;
    };
    let index = session.current_index();
    let Some(question) = quiz.questions.get(index) else {
        return;
    };
    let selected = session.selections().get(index).copied().flatten();

    println!("Q{}/{}: {}", index + 1, quiz.questions.len(), question.text);
    for (i, option) in question.options.iter().enumerate() {
        let marker = if selected == Some(i) { "*" } else { " " };
        println!("  {}{}. {}", marker, i + 1, option);
    }
}

fn print_report(report: &QuizReport) {
    let result = &report.result;
    println!(
        "\n{}: {}/{} correct ({:.0}%) in {}",
        result.quiz_title,
        result.correct_answers,
        result.total_questions,
        result.score,
        format_secs(result.time_taken)
    );
    if result.is_perfect() {
        println!("⭐ Perfect score!");
    }
    println!("+{} points", report.points);
}
