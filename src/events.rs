//! Change notifications emitted by the engines
//!
//! Front ends subscribe a callback per engine and get a [`ProgressEvent`] after
//! each state change, instead of polling or binding to engine fields.
//! Callbacks run synchronously inside the mutating call and must not call back
//! into the emitting engine.

use uuid::Uuid;

use crate::domain::{ChallengeReward, QuizResult};
use crate::profile::StreakChange;

/// Something that changed in the player's progress
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Profile fields changed and were persisted
    ProfileUpdated,
    /// Daily streak was evaluated on launch
    StreakUpdated { change: StreakChange, streak: u32 },
    PointsAwarded { amount: i64, reason: String },
    AchievementUnlocked { id: String, title: String },
    /// Whole profile was replaced by a fresh one
    ProfileReset,

    QuizStarted { quiz_id: Uuid },
    /// Countdown ticked; `remaining` in seconds
    QuizTick { remaining: u32 },
    QuizCompleted(QuizResult),

    PuzzleStarted { puzzle_id: Uuid },
    /// Elapsed-time sample, display only
    PuzzleElapsed { seconds: f64 },
    PuzzleSolved {
        puzzle_id: Uuid,
        seconds: f64,
        new_best: bool,
    },
    PuzzleFailed { puzzle_id: Uuid },

    ChallengesGenerated { count: usize },
    ChallengeProgressed {
        challenge_id: Uuid,
        progress: u32,
        target: u32,
    },
    ChallengeCompleted { challenge_id: Uuid },
    RewardClaimed {
        challenge_id: Uuid,
        reward: ChallengeReward,
    },
}

/// Handle returned by [`Observers::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<E> = Box<dyn FnMut(&E) + Send>;

/// Ordered list of change callbacks
pub struct Observers<E> {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback<E>)>,
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            callbacks: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&E) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the subscription was already gone
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        self.callbacks.len() != before
    }

    /// Deliver to every subscriber in subscription order
    pub fn emit(&mut self, event: &E) {
        for (_, callback) in self.callbacks.iter_mut() {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}
