//! Quiz Session Engine
//!
//! Drives one quiz attempt through `Idle -> Active -> Completed`. A quiz can
//! only complete (by advancing past the last question or by the countdown
//! running out); abandoning it is a `reset` back to `Idle`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::clock::{Clock, elapsed_secs};
use crate::domain::{Quiz, QuizResult, QuizState};
use crate::events::{Observers, ProgressEvent, SubscriptionId};
use crate::store::Storage;
use crate::timer::{TickToken, Ticker};

/// Countdown granularity; every accepted tick is one second of the time limit
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

/// A single quiz attempt
pub struct QuizSession {
    storage: Storage,
    clock: Arc<dyn Clock>,
    ticker: Ticker,
    observers: Observers<ProgressEvent>,

    quiz: Option<Quiz>,
    state: QuizState,
    current_index: usize,
    /// One slot per question; `None` is unanswered
    selections: Vec<Option<usize>>,
    time_remaining: Option<u32>,
    started_at: Option<DateTime<Utc>>,
    result: Option<QuizResult>,
}

impl QuizSession {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            ticker: Ticker::new(COUNTDOWN_TICK),
            observers: Observers::new(),
            quiz: None,
            state: QuizState::Idle,
            current_index: 0,
            selections: Vec::new(),
            time_remaining: None,
            started_at: None,
            result: None,
        }
    }

    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&ProgressEvent) + Send + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ========================================
    // TRANSITIONS
    // ========================================

    /// Begin a new attempt, abandoning any current one.
    ///
    /// Returns the countdown token when the quiz has a time limit.
    pub fn start(&mut self, quiz: Quiz) -> Option<TickToken> {
        self.reset();

        self.selections = vec![None; quiz.questions.len()];
        self.time_remaining = quiz.time_limit;
        self.started_at = Some(self.clock.now());
        self.state = QuizState::Active;

        let token = quiz.time_limit.map(|_| self.ticker.start());
        tracing::debug!(
            quiz_id = %quiz.id,
            questions = quiz.questions.len(),
            time_limit = ?quiz.time_limit,
            "Quiz started"
        );

        let quiz_id = quiz.id;
        self.quiz = Some(quiz);
        self.observers.emit(&ProgressEvent::QuizStarted { quiz_id });
        token
    }

    /// Record `option` for the current question. Returns false if nothing was recorded.
    pub fn select_answer(&mut self, option: usize) -> bool {
        if self.state != QuizState::Active {
            return false;
        }
        match self.selections.get_mut(self.current_index) {
            Some(slot) => {
                *slot = Some(option);
                true
            }
            None => false,
        }
    }

    /// Move to the next question, completing the quiz when past the last one
    pub fn advance(&mut self) -> Result<Option<QuizResult>> {
        if self.state != QuizState::Active {
            return Ok(None);
        }
        if self.current_index + 1 < self.selections.len() {
            self.current_index += 1;
            return Ok(None);
        }
        self.complete().map(Some)
    }

    /// Move to the previous question; no-op on the first
    pub fn retreat(&mut self) -> bool {
        if self.state != QuizState::Active || self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Deliver one countdown tick. Stale tokens are ignored.
    pub fn tick(&mut self, token: TickToken) -> Result<Option<QuizResult>> {
        if !self.ticker.accepts(token) || self.state != QuizState::Active {
            return Ok(None);
        }
        let Some(remaining) = self.time_remaining.as_mut() else {
            return Ok(None);
        };

        *remaining = remaining.saturating_sub(1);
        let remaining = *remaining;
        self.observers.emit(&ProgressEvent::QuizTick { remaining });

        if remaining == 0 {
            tracing::debug!("Quiz countdown expired");
            return self.complete().map(Some);
        }
        Ok(None)
    }

    /// Abandon the attempt and return to `Idle`
    pub fn reset(&mut self) {
        self.ticker.stop();
        self.quiz = None;
        self.state = QuizState::Idle;
        self.current_index = 0;
        self.selections.clear();
        self.time_remaining = None;
        self.started_at = None;
        self.result = None;
    }

    /// Persist the result, then settle the session. On a storage error the
    /// attempt stays `Active` so it can be completed again.
    fn complete(&mut self) -> Result<QuizResult> {
        let quiz = self
            .quiz
            .as_ref()
            .context("Active quiz session has no quiz")?;
        let now = self.clock.now();
        let correct = self.correct_count();
        let total = quiz.questions.len() as u32;

        let result = QuizResult {
            id: Uuid::new_v4(),
            quiz_id: quiz.id,
            quiz_title: quiz.title.clone(),
            category: Some(quiz.category),
            score: score_percentage(correct, total),
            correct_answers: correct,
            total_questions: total,
            time_taken: self.started_at.map(|s| elapsed_secs(s, now)).unwrap_or(0.0),
            completed_at: now,
        };

        self.storage
            .append_quiz_result(&result)
            .context("Failed to save quiz result")?;

        self.ticker.stop();
        self.state = QuizState::Completed;
        self.result = Some(result.clone());

        tracing::info!(
            quiz_id = %result.quiz_id,
            correct = result.correct_answers,
            total = result.total_questions,
            score = result.score,
            "Quiz completed"
        );
        self.observers
            .emit(&ProgressEvent::QuizCompleted(result.clone()));
        Ok(result)
    }

    fn correct_count(&self) -> u32 {
        let Some(quiz) = &self.quiz else {
            return 0;
        };
        quiz.questions
            .iter()
            .zip(&self.selections)
            .filter(|(q, sel)| **sel == Some(q.correct_answer_index))
            .count() as u32
    }

    // ========================================
    // OBSERVATION
    // ========================================

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state == QuizState::Completed
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn selections(&self) -> &[Option<usize>] {
        &self.selections
    }

    /// Seconds left on the countdown, if the quiz is timed
    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    /// Correct answers so far (final once completed)
    pub fn score(&self) -> u32 {
        self.correct_count()
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    /// Token of the running countdown
    pub fn tick_token(&self) -> Option<TickToken> {
        self.ticker.token()
    }

    pub fn tick_period(&self) -> Duration {
        self.ticker.period()
    }
}

/// `correct / total * 100`, or 0 for an empty quiz
pub fn score_percentage(correct: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(correct) / f64::from(total) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::domain::{Difficulty, Question, QuizCategory};
    use crate::store::{BlobStore, StoreError};
    use chrono::NaiveDate;

    fn setup() -> (QuizSession, Storage, ManualClock) {
        let storage = Storage::in_memory();
        let clock = ManualClock::at_local_noon(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
        let session = QuizSession::new(storage.clone(), Arc::new(clock.clone()));
        (session, storage, clock)
    }

    fn five_question_quiz() -> Quiz {
        let questions = (0..5)
            .map(|i| Question::new(format!("Q{}", i), &["a", "b", "c", "d", "e"], i))
            .collect();
        Quiz::new("Five", QuizCategory::General, Difficulty::Easy, questions)
    }

    #[test]
    fn test_scoring_counts_matching_selections() {
        let (mut session, storage, clock) = setup();
        assert!(session.start(five_question_quiz()).is_none());

        let mut result = None;
        for choice in [0, 1, 9, 3, 4] {
            assert!(session.select_answer(choice));
            clock.advance_secs_f64(2.0);
            result = session.advance().unwrap();
        }

        let result = result.expect("completed on last advance");
        assert_eq!(result.correct_answers, 4);
        assert_eq!(result.score, 80.0);
        assert_eq!(result.time_taken, 10.0);
        assert_eq!(session.score(), 4);
        assert!(session.is_completed());
        assert_eq!(storage.load_quiz_results(), vec![result]);
    }

    #[test]
    fn test_unanswered_counts_as_incorrect() {
        let (mut session, _, _) = setup();
        session.start(five_question_quiz());
        session.select_answer(0);
        for _ in 0..5 {
            session.advance().unwrap();
        }
        assert_eq!(session.result().unwrap().correct_answers, 1);
        assert_eq!(session.selections()[1], None);
    }

    #[test]
    fn test_navigation_bounds() {
        let (mut session, _, _) = setup();
        assert!(!session.select_answer(0));

        session.start(five_question_quiz());
        assert!(!session.retreat());
        session.advance().unwrap();
        session.select_answer(3);
        assert!(session.retreat());
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.selections()[0], None);
        assert_eq!(session.selections()[1], Some(3));
    }

    #[test]
    fn test_empty_quiz_scores_zero() {
        let (mut session, _, _) = setup();
        session.start(Quiz::new("Empty", QuizCategory::Arts, Difficulty::Easy, Vec::new()));
        let result = session.advance().unwrap().unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.total_questions, 0);
        assert!(!result.is_perfect());
    }

    #[test]
    fn test_countdown_completes_at_zero() {
        let (mut session, storage, _) = setup();
        let token = session.start(five_question_quiz().with_time_limit(3)).unwrap();
        session.select_answer(0);

        assert!(session.tick(token).unwrap().is_none());
        assert!(session.tick(token).unwrap().is_none());
        assert_eq!(session.time_remaining(), Some(1));
        let result = session.tick(token).unwrap().expect("expired");
        assert_eq!(result.correct_answers, 1);
        assert!(session.tick_token().is_none());

        // Ticks after completion are dropped
        assert!(session.tick(token).unwrap().is_none());
        assert_eq!(storage.load_quiz_results().len(), 1);
    }

    #[test]
    fn test_reset_rejects_pending_ticks() {
        let (mut session, storage, _) = setup();
        let token = session.start(five_question_quiz().with_time_limit(1)).unwrap();
        session.reset();
        session.reset();

        assert_eq!(session.state(), QuizState::Idle);
        assert!(session.tick(token).unwrap().is_none());
        assert!(storage.load_quiz_results().is_empty());

        // A restarted session ignores the old run's token
        let fresh = session.start(five_question_quiz().with_time_limit(1)).unwrap();
        assert!(session.tick(token).unwrap().is_none());
        assert!(session.tick(fresh).unwrap().is_some());
    }

    #[test]
    fn test_countdown_ticks_every_second() {
        let (mut session, _, _) = setup();
        assert_eq!(session.tick_period(), Duration::from_secs(1));
        session.start(five_question_quiz().with_time_limit(10));
        assert_eq!(session.tick_period(), COUNTDOWN_TICK);
    }

    struct ReadOnlyStore;

    impl BlobStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn put(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }

        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_save_keeps_attempt_active() {
        let clock = ManualClock::at_local_noon(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap());
        let mut session = QuizSession::new(Storage::new(ReadOnlyStore), Arc::new(clock));

        let token = session.start(five_question_quiz().with_time_limit(1)).unwrap();
        session.select_answer(0);
        assert!(session.tick(token).is_err());

        assert_eq!(session.state(), QuizState::Active);
        assert!(!session.is_completed());
        assert!(session.result().is_none());
        assert_eq!(session.tick_token(), Some(token));
    }

    #[test]
    fn test_zero_time_limit_completes_on_first_tick() {
        let (mut session, _, _) = setup();
        let token = session.start(five_question_quiz().with_time_limit(0)).unwrap();
        assert!(session.tick(token).unwrap().is_some());
    }
}
