//! Shared test utilities for tracker integration tests

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;

use mindspark::clock::ManualClock;
use mindspark::config::Config;
use mindspark::domain::{Difficulty, Question, Quiz, QuizCategory};
use mindspark::store::Storage;
use mindspark::tracker::{QuizReport, Tracker};

/// Day every test starts on
pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date")
}

/// A manually driven clock plus storage that outlives individual trackers
pub struct TestEnv {
    pub clock: ManualClock,
    pub storage: Storage,
    pub config: Config,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_storage(Storage::in_memory())
    }

    pub fn with_storage(storage: Storage) -> Self {
        Self {
            clock: ManualClock::at_local_noon(start_date()),
            storage,
            config: Config::default(),
        }
    }

    /// Open a tracker as a fresh process launch would
    pub fn open(&self) -> Tracker {
        Tracker::open(self.storage.clone(), Arc::new(self.clock.clone()), &self.config)
            .expect("Failed to open tracker")
    }
}

/// Quiz of `len` questions whose correct option is always 0
pub fn quiz_with(len: usize, category: QuizCategory) -> Quiz {
    let questions = (0..len)
        .map(|i| Question::new(format!("Question {}", i + 1), &["right", "wrong", "also wrong"], 0))
        .collect();
    Quiz::new(format!("{} quiz", category), category, Difficulty::Medium, questions)
}

/// Answer every question (`true` = correct) taking `secs_per_question`, then finish
pub fn play_quiz(
    env: &TestEnv,
    tracker: &mut Tracker,
    quiz: Quiz,
    answers: &[bool],
    secs_per_question: f64,
) -> QuizReport {
    tracker.start_quiz(quiz);
    let mut report = None;
    for correct in answers {
        tracker.select_answer(if *correct { 0 } else { 1 });
        env.clock.advance_secs_f64(secs_per_question);
        report = tracker.advance_quiz().expect("advance failed");
    }
    report.expect("quiz did not complete")
}
