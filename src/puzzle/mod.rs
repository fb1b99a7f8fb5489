//! Puzzle Session Engine
//!
//! Drives one puzzle attempt through `Idle -> Active -> {Completed, Failed}`
//! and keeps the player's puzzle collection with completion flags and best
//! times. Whether an attempt succeeded is decided by the caller, optionally
//! with [`PuzzleData::check_answer`](crate::domain::PuzzleData::check_answer).

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::clock::{Clock, elapsed_secs};
use crate::domain::{Difficulty, Puzzle, PuzzleState};
use crate::events::{Observers, ProgressEvent, SubscriptionId};
use crate::store::Storage;
use crate::timer::{TickToken, Ticker};

/// Elapsed-time sampling period
pub const DEFAULT_SAMPLE: Duration = Duration::from_millis(100);

/// How a finished attempt went
#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleOutcome {
    pub puzzle_id: Uuid,
    pub difficulty: Difficulty,
    pub success: bool,
    /// Seconds from start to completion
    pub seconds: f64,
    /// Whether this run set a new best time
    pub new_best: bool,
}

pub struct PuzzleSession {
    storage: Storage,
    clock: Arc<dyn Clock>,
    ticker: Ticker,
    observers: Observers<ProgressEvent>,

    puzzles: Vec<Puzzle>,
    current: Option<Puzzle>,
    state: PuzzleState,
    started_at: Option<DateTime<Utc>>,
    elapsed: f64,
}

impl PuzzleSession {
    pub fn new(storage: Storage, clock: Arc<dyn Clock>) -> Self {
        Self::with_sample_period(storage, clock, DEFAULT_SAMPLE)
    }

    pub fn with_sample_period(storage: Storage, clock: Arc<dyn Clock>, period: Duration) -> Self {
        let puzzles = storage.load_puzzles();
        Self {
            storage,
            clock,
            ticker: Ticker::new(period),
            observers: Observers::new(),
            puzzles,
            current: None,
            state: PuzzleState::Idle,
            started_at: None,
            elapsed: 0.0,
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

    /// Use persisted progress when there is any, otherwise persist `seed`
    pub fn load_or_seed(&mut self, seed: Vec<Puzzle>) -> Result<&[Puzzle]> {
        let stored = self.storage.load_puzzles();
        if stored.is_empty() {
            tracing::debug!(count = seed.len(), "Seeding puzzle catalogue");
            self.storage
                .save_puzzles(&seed)
                .context("Failed to save puzzle catalogue")?;
            self.puzzles = seed;
        } else {
            self.puzzles = stored;
        }
        Ok(&self.puzzles)
    }

    // ========================================
    // TRANSITIONS
    // ========================================

    /// Begin an attempt, abandoning any current one. Returns the sampler token.
    pub fn start(&mut self, puzzle: Puzzle) -> TickToken {
        self.reset();

        let puzzle_id = puzzle.id;
        tracing::debug!(puzzle_id = %puzzle_id, kind = puzzle.kind.label(), "Puzzle started");

        self.current = Some(puzzle);
        self.started_at = Some(self.clock.now());
        self.elapsed = 0.0;
        self.state = PuzzleState::Active;
        let token = self.ticker.start();

        self.observers.emit(&ProgressEvent::PuzzleStarted { puzzle_id });
        token
    }

    /// Refresh the elapsed time. Stale tokens are ignored.
    pub fn tick(&mut self, token: TickToken) -> Option<f64> {
        if !self.ticker.accepts(token) || self.state != PuzzleState::Active {
            return None;
        }
        self.elapsed = self.measure();
        self.observers.emit(&ProgressEvent::PuzzleElapsed {
            seconds: self.elapsed,
        });
        Some(self.elapsed)
    }

    /// Finish the attempt. Returns `None` when no attempt is active.
    ///
    /// On success the puzzle is marked completed, its best time updated if
    /// beaten, and the collection persisted. Failure leaves progress untouched.
    pub fn complete(&mut self, success: bool) -> Result<Option<PuzzleOutcome>> {
        if self.state != PuzzleState::Active {
            return Ok(None);
        }
        self.ticker.stop();
        self.elapsed = self.measure();
        let seconds = self.elapsed;

        let Some(puzzle) = self.current.as_mut() else {
            return Ok(None);
        };
        let puzzle_id = puzzle.id;
        let difficulty = puzzle.difficulty;

        if !success {
            self.state = PuzzleState::Failed;
            tracing::debug!(puzzle_id = %puzzle_id, seconds, "Puzzle failed");
            self.observers.emit(&ProgressEvent::PuzzleFailed { puzzle_id });
            return Ok(Some(PuzzleOutcome {
                puzzle_id,
                difficulty,
                success: false,
                seconds,
                new_best: false,
            }));
        }

        let new_best = puzzle.record_success(seconds);
        let updated = puzzle.clone();
        self.state = PuzzleState::Completed;

        match self.puzzles.iter_mut().find(|p| p.id == puzzle_id) {
            Some(slot) => {
                *slot = updated;
                self.storage
                    .save_puzzles(&self.puzzles)
                    .context("Failed to save puzzle progress")?;
            }
            None => {
                tracing::debug!(puzzle_id = %puzzle_id, "Solved puzzle is not in the collection")
            }
        }

        tracing::info!(puzzle_id = %puzzle_id, seconds, new_best, "Puzzle solved");
        self.observers.emit(&ProgressEvent::PuzzleSolved {
            puzzle_id,
            seconds,
            new_best,
        });

        Ok(Some(PuzzleOutcome {
            puzzle_id,
            difficulty,
            success: true,
            seconds,
            new_best,
        }))
    }

    /// Abandon any attempt and return to `Idle`
    pub fn reset(&mut self) {
        self.ticker.stop();
        self.current = None;
        self.state = PuzzleState::Idle;
        self.started_at = None;
        self.elapsed = 0.0;
    }

    /// Forget the in-memory collection after storage was wiped
    pub(crate) fn clear_collection(&mut self) {
        self.reset();
        self.puzzles.clear();
    }

    fn measure(&self) -> f64 {
        self.started_at
            .map(|s| elapsed_secs(s, self.clock.now()))
            .unwrap_or(0.0)
    }

    // ========================================
    // OBSERVATION
    // ========================================

    pub fn state(&self) -> PuzzleState {
        self.state
    }

    /// Last sampled elapsed seconds (final once finished)
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn current(&self) -> Option<&Puzzle> {
        self.current.as_ref()
    }

    pub fn puzzles(&self) -> &[Puzzle] {
        &self.puzzles
    }

    pub fn puzzle(&self, id: Uuid) -> Option<&Puzzle> {
        self.puzzles.iter().find(|p| p.id == id)
    }

    pub fn tick_token(&self) -> Option<TickToken> {
        self.ticker.token()
    }

    pub fn sample_period(&self) -> Duration {
        self.ticker.period()
    }
}
