//! Challenge Engine
//!
//! Keeps today's batch of daily challenges. A batch is generated at most once
//! per local calendar day: if storage holds any challenge dated today, that set
//! is used as-is; otherwise a new batch replaces the stored collection.
//!
//! The board also remembers which quiz categories were played today, which
//! drives the variety challenge independently of the quiz history cap.

pub mod templates;

pub use templates::{ChallengeTemplate, DAILY_TEMPLATES};

use std::sync::Arc;

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::clock::{Clock, same_day};
use crate::domain::{
    ChallengeReward, ChallengeType, DailyChallenge, PlayedCategories, QuizCategory,
};
use crate::events::{Observers, ProgressEvent, SubscriptionId};
use crate::store::Storage;

pub struct ChallengeBoard {
    storage: Storage,
    clock: Arc<dyn Clock>,
    challenges: Vec<DailyChallenge>,
    played: PlayedCategories,
    observers: Observers<ProgressEvent>,
}

impl ChallengeBoard {
    /// Board with today's challenges loaded (or generated)
    pub fn open(storage: Storage, clock: Arc<dyn Clock>) -> Result<Self> {
        let played = PlayedCategories::new(clock.now());
        let mut board = Self {
            storage,
            clock,
            challenges: Vec::new(),
            played,
            observers: Observers::new(),
        };
        board.load_or_generate()?;
        Ok(board)
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

    /// Load today's challenges, generating a fresh batch if there are none
    pub fn load_or_generate(&mut self) -> Result<&[DailyChallenge]> {
        let now = self.clock.now();
        let todays: Vec<DailyChallenge> = self
            .storage
            .load_challenges()
            .into_iter()
            .filter(|c| same_day(c.date, now))
            .collect();

        if todays.is_empty() {
            self.challenges = templates::generate(now);
            self.persist()?;
            tracing::info!(count = self.challenges.len(), "Generated daily challenges");
            self.observers.emit(&ProgressEvent::ChallengesGenerated {
                count: self.challenges.len(),
            });
        } else {
            tracing::debug!(count = todays.len(), "Loaded today's challenges");
            self.challenges = todays;
        }

        self.played = self
            .storage
            .load_played_categories()
            .filter(|p| same_day(p.date, now))
            .unwrap_or_else(|| PlayedCategories::new(now));

        Ok(&self.challenges)
    }

    pub fn challenges(&self) -> &[DailyChallenge] {
        &self.challenges
    }

    pub fn challenge(&self, id: Uuid) -> Option<&DailyChallenge> {
        self.challenges.iter().find(|c| c.id == id)
    }

    /// Add `delta` to one challenge's progress. Returns false if `id` is unknown.
    pub fn update_progress(&mut self, id: Uuid, delta: u32) -> Result<bool> {
        let Some(index) = self.challenges.iter().position(|c| c.id == id) else {
            return Ok(false);
        };
        self.bump(index, delta);
        self.persist()?;
        Ok(true)
    }

    /// Add `delta` to every challenge of `kind`. Returns how many were touched.
    pub fn progress_kind(&mut self, kind: ChallengeType, delta: u32) -> Result<usize> {
        let indices: Vec<usize> = self
            .challenges
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == kind)
            .map(|(i, _)| i)
            .collect();

        if indices.is_empty() {
            return Ok(0);
        }
        for &index in &indices {
            self.bump(index, delta);
        }
        self.persist()?;
        Ok(indices.len())
    }

    /// Note a completed quiz's category. Returns true the first time it is
    /// played on the current local day.
    pub fn note_category(&mut self, category: QuizCategory) -> Result<bool> {
        let now = self.clock.now();
        if !same_day(self.played.date, now) {
            self.played = PlayedCategories::new(now);
        }
        if !self.played.insert(category) {
            return Ok(false);
        }
        self.storage
            .save_played_categories(&self.played)
            .context("Failed to save played categories")?;
        Ok(true)
    }

    /// Mark a challenge completed without touching its progress
    pub fn complete(&mut self, id: Uuid) -> Result<bool> {
        let Some(challenge) = self.challenges.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        if !challenge.is_completed {
            challenge.is_completed = true;
            self.observers
                .emit(&ProgressEvent::ChallengeCompleted { challenge_id: id });
        }
        self.persist()?;
        Ok(true)
    }

    /// Hand out the reward of a completed challenge, exactly once
    pub fn claim(&mut self, id: Uuid) -> Result<Option<ChallengeReward>> {
        let Some(challenge) = self.challenges.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if !challenge.is_claimable() {
            tracing::debug!(
                challenge_id = %id,
                completed = challenge.is_completed,
                claimed = challenge.is_claimed,
                "Challenge not claimable"
            );
            return Ok(None);
        }

        challenge.is_claimed = true;
        let reward = challenge.reward.clone();
        self.persist()?;

        tracing::info!(challenge_id = %id, points = reward.points, "Challenge reward claimed");
        self.observers.emit(&ProgressEvent::RewardClaimed {
            challenge_id: id,
            reward: reward.clone(),
        });
        Ok(Some(reward))
    }

    fn bump(&mut self, index: usize, delta: u32) {
        let challenge = &mut self.challenges[index];
        challenge.current_progress = challenge.current_progress.saturating_add(delta);
        let newly_completed =
            !challenge.is_completed && challenge.current_progress >= challenge.target_value;
        if newly_completed {
            challenge.is_completed = true;
        }

        let id = challenge.id;
        let progress = challenge.current_progress;
        let target = challenge.target_value;

        self.observers.emit(&ProgressEvent::ChallengeProgressed {
            challenge_id: id,
            progress,
            target,
        });
        if newly_completed {
            tracing::info!(challenge_id = %id, "Daily challenge completed");
            self.observers
                .emit(&ProgressEvent::ChallengeCompleted { challenge_id: id });
        }
    }

    fn persist(&self) -> Result<()> {
        self.storage
            .save_challenges(&self.challenges)
            .context("Failed to save daily challenges")
    }
}
