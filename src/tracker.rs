//! Progress coordinator
//!
//! [`Tracker`] owns one instance of every engine over a shared [`Storage`] and
//! [`Clock`], and turns session outcomes into profile updates, points and
//! challenge progress. Engines never call each other; all cross-engine rules
//! live here.

use std::sync::Arc;

use anyhow::Result;
use uuid::Uuid;

use crate::catalog;
use crate::challenge::ChallengeBoard;
use crate::clock::Clock;
use crate::config::{Config, ScoringSettings};
use crate::domain::{ChallengeReward, ChallengeType, Puzzle, Quiz, QuizResult};
use crate::events::ProgressEvent;
use crate::profile::{AchievementId, ProfileEngine, StreakChange};
use crate::puzzle::{PuzzleOutcome, PuzzleSession};
use crate::quiz::QuizSession;
use crate::store::Storage;
use crate::timer::TickToken;

/// What a finished quiz earned
#[derive(Debug, Clone, PartialEq)]
pub struct QuizReport {
    pub result: QuizResult,
    pub points: i64,
    pub unlocked: Vec<AchievementId>,
}

/// What a finished puzzle attempt earned
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleReport {
    pub outcome: PuzzleOutcome,
    pub points: i64,
    pub unlocked: Vec<AchievementId>,
}

/// What claiming a challenge earned
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimReport {
    pub reward: ChallengeReward,
    pub unlocked: Vec<AchievementId>,
}

pub struct Tracker {
    storage: Storage,
    clock: Arc<dyn Clock>,
    scoring: ScoringSettings,
    profile: ProfileEngine,
    quiz: QuizSession,
    puzzle: PuzzleSession,
    challenges: ChallengeBoard,
    streak_change: StreakChange,
}

impl Tracker {
    /// Load everything and evaluate today's streak
    pub fn open(storage: Storage, clock: Arc<dyn Clock>, config: &Config) -> Result<Self> {
        let profile = ProfileEngine::load_or_create(storage.clone(), clock.clone())?;
        let challenges = ChallengeBoard::open(storage.clone(), clock.clone())?;
        let mut puzzle =
            PuzzleSession::with_sample_period(storage.clone(), clock.clone(), config.puzzle_sample());
        puzzle.load_or_seed(catalog::sample_puzzles(clock.now()))?;
        let quiz = QuizSession::new(storage.clone(), clock.clone());

        let mut tracker = Self {
            storage,
            clock,
            scoring: config.scoring.clone(),
            profile,
            quiz,
            puzzle,
            challenges,
            streak_change: StreakChange::Unchanged,
        };
        tracker.streak_change = tracker.update_daily_streak()?;
        Ok(tracker)
    }

    fn update_daily_streak(&mut self) -> Result<StreakChange> {
        let change = self.profile.update_daily_streak()?;
        if change.is_new_day() {
            self.challenges.progress_kind(ChallengeType::Streak, 1)?;
            self.profile.check_achievements()?;
        }
        Ok(change)
    }

    /// Register one callback with every engine
    pub fn subscribe(&mut self, callback: impl FnMut(&ProgressEvent) + Send + Clone + 'static) {
        self.profile.subscribe(callback.clone());
        self.quiz.subscribe(callback.clone());
        self.puzzle.subscribe(callback.clone());
        self.challenges.subscribe(callback);
    }

    // ========================================
    // ACCESSORS
    // ========================================

    pub fn profile(&self) -> &ProfileEngine {
        &self.profile
    }

    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    pub fn puzzle(&self) -> &PuzzleSession {
        &self.puzzle
    }

    pub fn challenges(&self) -> &ChallengeBoard {
        &self.challenges
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Streak transition evaluated when the tracker was opened
    pub fn streak_change(&self) -> StreakChange {
        self.streak_change
    }

    pub fn quiz_history(&self) -> Vec<QuizResult> {
        self.storage.load_quiz_results()
    }

    // ========================================
    // QUIZ
    // ========================================

    pub fn start_quiz(&mut self, quiz: Quiz) -> Option<TickToken> {
        self.quiz.start(quiz)
    }

    pub fn select_answer(&mut self, option: usize) -> bool {
        self.quiz.select_answer(option)
    }

    pub fn advance_quiz(&mut self) -> Result<Option<QuizReport>> {
        match self.quiz.advance()? {
            Some(result) => self.settle_quiz(result).map(Some),
            None => Ok(None),
        }
    }

    pub fn retreat_quiz(&mut self) -> bool {
        self.quiz.retreat()
    }

    pub fn quiz_tick(&mut self, token: TickToken) -> Result<Option<QuizReport>> {
        match self.quiz.tick(token)? {
            Some(result) => self.settle_quiz(result).map(Some),
            None => Ok(None),
        }
    }

    pub fn reset_quiz(&mut self) {
        self.quiz.reset();
    }

    fn settle_quiz(&mut self, result: QuizResult) -> Result<QuizReport> {
        let points = quiz_points(
            result.correct_answers,
            result.total_questions,
            self.scoring.quiz_max_points,
        );
        let perfect = result.is_perfect();

        if points != 0 {
            self.profile
                .add_points(points, &format!("quiz: {}", result.quiz_title))?;
        }
        self.profile.record_quiz_result(result.score, perfect)?;
        self.profile.add_time_spent(result.time_taken)?;

        self.challenges
            .progress_kind(ChallengeType::CompleteQuizzes, 1)?;
        if perfect {
            self.challenges.progress_kind(ChallengeType::PerfectScore, 1)?;
        }
        if let Some(category) = result.category {
            if self.challenges.note_category(category)? {
                self.challenges.progress_kind(ChallengeType::Variety, 1)?;
            }
        }
        if result.time_taken <= self.scoring.speed_run_secs {
            self.challenges
                .progress_kind(ChallengeType::TimeChallenge, 1)?;
        }

        let unlocked = self.profile.check_achievements()?;
        Ok(QuizReport {
            result,
            points,
            unlocked,
        })
    }

    // ========================================
    // PUZZLE
    // ========================================

    pub fn start_puzzle(&mut self, puzzle: Puzzle) -> TickToken {
        self.puzzle.start(puzzle)
    }

    /// Start the collection puzzle with `id`
    pub fn start_puzzle_by_id(&mut self, id: Uuid) -> Option<TickToken> {
        let puzzle = self.puzzle.puzzle(id)?.clone();
        Some(self.puzzle.start(puzzle))
    }

    pub fn puzzle_tick(&mut self, token: TickToken) -> Option<f64> {
        self.puzzle.tick(token)
    }

    pub fn finish_puzzle(&mut self, success: bool) -> Result<Option<PuzzleReport>> {
        let Some(outcome) = self.puzzle.complete(success)? else {
            return Ok(None);
        };
        if !outcome.success {
            return Ok(Some(PuzzleReport {
                outcome,
                points: 0,
                unlocked: Vec::new(),
            }));
        }

        let points = self
            .scoring
            .puzzle_base_points
            .saturating_mul(outcome.difficulty.multiplier());
        self.profile.add_points(points, "puzzle")?;
        self.profile.record_puzzle_solved(outcome.seconds)?;
        self.challenges.progress_kind(ChallengeType::SolvePuzzles, 1)?;

        let unlocked = self.profile.check_achievements()?;
        Ok(Some(PuzzleReport {
            outcome,
            points,
            unlocked,
        }))
    }

    pub fn reset_puzzle(&mut self) {
        self.puzzle.reset();
    }

    // ========================================
    // CHALLENGES
    // ========================================

    /// Claim a completed challenge's reward. `None` if not claimable.
    pub fn claim_challenge(&mut self, id: Uuid) -> Result<Option<ClaimReport>> {
        let Some(reward) = self.challenges.claim(id)? else {
            return Ok(None);
        };

        self.profile.add_points(reward.points, "daily challenge")?;
        self.profile.record_challenge_completed()?;
        let unlocked = self.profile.check_achievements()?;

        Ok(Some(ClaimReport { reward, unlocked }))
    }

    // ========================================
    // RESET
    // ========================================

    /// Wipe all progress and start over
    pub fn reset_all(&mut self) -> Result<()> {
        self.quiz.reset();
        self.puzzle.clear_collection();
        self.profile.reset_all()?;
        self.puzzle
            .load_or_seed(catalog::sample_puzzles(self.clock.now()))?;
        self.challenges.load_or_generate()?;
        tracing::info!("All progress reset");
        Ok(())
    }
}

/// Floored share of `max_points` for `correct` out of `total`
pub fn quiz_points(correct: u32, total: u32, max_points: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    let points = i128::from(correct) * i128::from(max_points) / i128::from(total);
    i64::try_from(points).unwrap_or(if points < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_points_floor() {
        assert_eq!(quiz_points(4, 5, 100), 80);
        assert_eq!(quiz_points(2, 3, 100), 66);
        assert_eq!(quiz_points(0, 0, 100), 0);
        assert_eq!(quiz_points(5, 5, 100), 100);
    }

    #[test]
    fn test_quiz_points_extreme_max() {
        assert_eq!(quiz_points(u32::MAX, u32::MAX, i64::MAX), i64::MAX);
        assert_eq!(quiz_points(1, 2, i64::MAX), i64::MAX / 2);
    }

    #[test]
    fn test_extreme_puzzle_points_saturate() {
        use crate::clock::ManualClock;
        use chrono::NaiveDate;

        let mut config = Config::default();
        config.scoring.puzzle_base_points = i64::MAX;
        let clock = ManualClock::at_local_noon(NaiveDate::from_ymd_opt(2026, 5, 2).unwrap());
        let mut tracker =
            Tracker::open(Storage::in_memory(), Arc::new(clock.clone()), &config).unwrap();

        let id = tracker
            .puzzle()
            .puzzles()
            .iter()
            .find(|p| p.title == "Quick Math")
            .unwrap()
            .id;
        tracker.start_puzzle_by_id(id).unwrap();
        clock.advance_secs_f64(5.0);
        let report = tracker.finish_puzzle(true).unwrap().unwrap();
        assert_eq!(report.points, i64::MAX);
        assert_eq!(tracker.profile().profile().total_points, i64::MAX);
    }
}
