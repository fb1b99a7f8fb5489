//! Profile Engine
//!
//! Sole owner of the [`UserProfile`]. Every mutation goes through here and is
//! persisted before the call returns.

pub mod achievements;
mod streaks;

pub use achievements::{ACHIEVEMENTS, AchievementDef, AchievementId};
pub use streaks::{StreakChange, apply_daily_streak};

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::clock::Clock;
use crate::domain::{DEFAULT_USERNAME, OnboardingState, UserPreferences, UserProfile};
use crate::events::{Observers, ProgressEvent, SubscriptionId};
use crate::store::Storage;

/// Owns the player's profile and onboarding state
pub struct ProfileEngine {
    storage: Storage,
    clock: Arc<dyn Clock>,
    profile: UserProfile,
    onboarding: OnboardingState,
    observers: Observers<ProgressEvent>,
}

impl ProfileEngine {
    /// Load the persisted profile, or create and persist a fresh one.
    ///
    /// An undecodable profile blob is treated like a missing one.
    pub fn load_or_create(storage: Storage, clock: Arc<dyn Clock>) -> Result<Self> {
        let (mut profile, created) = match storage.load_profile() {
            Some(profile) => (profile, false),
            None => (UserProfile::new(clock.now()), true),
        };

        let synced = achievements::sync_catalog(&mut profile);
        if created || synced {
            storage
                .save_profile(&profile)
                .context("Failed to persist profile")?;
        }

        if created {
            tracing::info!(profile_id = %profile.id, "Created new profile");
        } else {
            tracing::debug!(profile_id = %profile.id, streak = profile.streak, "Loaded profile");
        }

        let onboarding = storage.load_onboarding();

        Ok(Self {
            storage,
            clock,
            profile,
            onboarding,
            observers: Observers::new(),
        })
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn onboarding(&self) -> OnboardingState {
        self.onboarding
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

    /// Bump `updated_at`, persist, and notify
    fn commit(&mut self) -> Result<()> {
        self.profile.updated_at = self.clock.now();
        self.persist()?;
        self.observers.emit(&ProgressEvent::ProfileUpdated);
        Ok(())
    }

    fn persist(&self) -> Result<()> {
        self.storage
            .save_profile(&self.profile)
            .context("Failed to persist profile")
    }

    // ========================================
    // STREAK & POINTS
    // ========================================

    /// Evaluate the daily streak. Call once per process start.
    pub fn update_daily_streak(&mut self) -> Result<StreakChange> {
        let now = self.clock.now();
        let change = apply_daily_streak(&mut self.profile, now);
        self.persist()?;

        match change {
            StreakChange::ClockSkew => tracing::warn!(
                streak = self.profile.streak,
                "Clock moved backwards since last launch, streak left unchanged"
            ),
            _ => tracing::info!(
                change = change.as_str(),
                streak = self.profile.streak,
                longest = self.profile.longest_streak,
                "Daily streak evaluated"
            ),
        }

        self.observers.emit(&ProgressEvent::StreakUpdated {
            change,
            streak: self.profile.streak,
        });
        Ok(change)
    }

    /// Add `amount` points; the caller is trusted with the sign
    pub fn add_points(&mut self, amount: i64, reason: &str) -> Result<()> {
        self.profile.total_points = self.profile.total_points.saturating_add(amount);
        tracing::debug!(amount, reason, total = self.profile.total_points, "Points awarded");
        self.commit()?;
        self.observers.emit(&ProgressEvent::PointsAwarded {
            amount,
            reason: reason.to_string(),
        });
        Ok(())
    }

    // ========================================
    // STATISTICS
    // ========================================

    /// Fold a quiz score percentage (0-100) into the statistics
    pub fn record_quiz_result(&mut self, score: f64, is_perfect: bool) -> Result<()> {
        self.profile.statistics.update_quiz_stats(score, is_perfect);
        self.commit()
    }

    pub fn record_puzzle_solved(&mut self, seconds: f64) -> Result<()> {
        let stats = &mut self.profile.statistics;
        stats.total_puzzles_solved += 1;
        stats.total_time_spent += seconds.max(0.0);
        self.commit()
    }

    pub fn record_challenge_completed(&mut self) -> Result<()> {
        self.profile.statistics.total_challenges_completed += 1;
        self.commit()
    }

    pub fn add_time_spent(&mut self, seconds: f64) -> Result<()> {
        self.profile.statistics.total_time_spent += seconds.max(0.0);
        self.commit()
    }

    // ========================================
    // EDITING
    // ========================================

    /// Set the display name; blank names fall back to the default.
    ///
    /// Returns false when the name did not change.
    pub fn set_username(&mut self, name: &str) -> Result<bool> {
        let trimmed = name.trim();
        let name = if trimmed.is_empty() {
            DEFAULT_USERNAME
        } else {
            trimmed
        };

        if self.profile.username == name {
            return Ok(false);
        }
        self.profile.username = name.to_string();
        self.commit()?;
        Ok(true)
    }

    pub fn update_preferences(&mut self, f: impl FnOnce(&mut UserPreferences)) -> Result<()> {
        f(&mut self.profile.preferences);
        self.commit()
    }

    // ========================================
    // ONBOARDING
    // ========================================

    pub fn set_onboarding_step(&mut self, step: u32) -> Result<()> {
        self.onboarding.step = step;
        self.storage
            .save_onboarding(&self.onboarding)
            .context("Failed to persist onboarding state")
    }

    pub fn complete_onboarding(&mut self) -> Result<()> {
        self.onboarding.completed = true;
        self.storage
            .save_onboarding(&self.onboarding)
            .context("Failed to persist onboarding state")?;
        tracing::info!("Onboarding completed");
        Ok(())
    }

    // ========================================
    // ACHIEVEMENTS
    // ========================================

    /// Unlock one achievement. Returns false if unknown or already unlocked.
    pub fn unlock_achievement(&mut self, id: AchievementId) -> Result<bool> {
        if !self.unlock_in_place(id) {
            return Ok(false);
        }
        self.commit()?;
        Ok(true)
    }

    /// Unlock every achievement whose rule is now met
    pub fn check_achievements(&mut self) -> Result<Vec<AchievementId>> {
        let unlocked: Vec<AchievementId> = achievements::check_unlocks(&self.profile)
            .into_iter()
            .filter(|id| self.unlock_in_place(*id))
            .collect();

        if !unlocked.is_empty() {
            self.commit()?;
        }
        Ok(unlocked)
    }

    fn unlock_in_place(&mut self, id: AchievementId) -> bool {
        let now = self.clock.now();
        let Some(badge) = self
            .profile
            .achievements
            .iter_mut()
            .find(|a| a.id == id.as_str())
        else {
            return false;
        };
        if badge.is_unlocked {
            return false;
        }

        badge.is_unlocked = true;
        badge.unlocked_at = Some(now);
        tracing::info!(achievement = id.as_str(), "Achievement unlocked");

        let event = ProgressEvent::AchievementUnlocked {
            id: badge.id.clone(),
            title: badge.title.clone(),
        };
        self.observers.emit(&event);
        true
    }

    // ========================================
    // RESET
    // ========================================

    /// Wipe every persisted blob and start over with a fresh profile
    pub fn reset_all(&mut self) -> Result<()> {
        self.storage
            .reset_all()
            .context("Failed to clear progress storage")?;

        let mut profile = UserProfile::new(self.clock.now());
        achievements::sync_catalog(&mut profile);
        self.profile = profile;
        self.onboarding = OnboardingState::default();
        self.persist()?;

        tracing::info!(profile_id = %self.profile.id, "Profile reset");
        self.observers.emit(&ProgressEvent::ProfileReset);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::store::keys;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn setup() -> (ProfileEngine, Storage, ManualClock) {
        let storage = Storage::in_memory();
        let clock = ManualClock::at_local_noon(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        let engine = ProfileEngine::load_or_create(storage.clone(), Arc::new(clock.clone())).unwrap();
        (engine, storage, clock)
    }

    #[test]
    fn test_new_profile_is_persisted_with_locked_catalogue() {
        let (engine, storage, _) = setup();
        let stored = storage.load_profile().unwrap();
        assert_eq!(&stored, engine.profile());
        assert_eq!(stored.achievements.len(), ACHIEVEMENTS.len());
        assert_eq!(stored.unlocked_count(), 0);
        assert_eq!(stored.username, DEFAULT_USERNAME);
    }

    #[test]
    fn test_corrupt_profile_falls_back_to_fresh() {
        let storage = Storage::in_memory();
        storage.backend().put(keys::USER_PROFILE, "garbage").unwrap();
        let clock = ManualClock::at_local_noon(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap());
        let engine = ProfileEngine::load_or_create(storage, Arc::new(clock)).unwrap();
        assert_eq!(engine.profile().total_points, 0);
        assert_eq!(engine.profile().streak, 0);
    }

    #[test]
    fn test_streak_over_days() {
        let (mut engine, storage, clock) = setup();

        clock.advance_days(1);
        assert_eq!(engine.update_daily_streak().unwrap(), StreakChange::Extended);
        assert_eq!(engine.update_daily_streak().unwrap(), StreakChange::Unchanged);
        clock.advance_days(1);
        engine.update_daily_streak().unwrap();
        assert_eq!(engine.profile().streak, 2);

        clock.advance_days(3);
        assert_eq!(engine.update_daily_streak().unwrap(), StreakChange::Restarted);
        assert_eq!(engine.profile().streak, 1);
        assert_eq!(engine.profile().longest_streak, 2);
        assert_eq!(storage.load_profile().unwrap().streak, 1);
    }

    #[test]
    fn test_points_and_quiz_stats_persist() {
        let (mut engine, storage, clock) = setup();
        clock.advance(chrono::Duration::minutes(5));

        engine.add_points(80, "quiz").unwrap();
        engine.record_quiz_result(80.0, false).unwrap();
        engine.record_quiz_result(100.0, true).unwrap();

        let stored = storage.load_profile().unwrap();
        assert_eq!(stored.total_points, 80);
        assert_eq!(stored.statistics.total_quizzes_completed, 2);
        assert_eq!(stored.statistics.perfect_scores, 1);
        assert!((stored.statistics.average_quiz_score - 90.0).abs() < 1e-9);
        assert_eq!(stored.updated_at, clock.now());
        assert!(stored.updated_at > stored.created_at);
    }

    #[test]
    fn test_set_username() {
        let (mut engine, _, _) = setup();
        assert!(engine.set_username("  Ada ").unwrap());
        assert_eq!(engine.profile().username, "Ada");
        assert!(!engine.set_username("Ada").unwrap());
        assert!(engine.set_username("   ").unwrap());
        assert_eq!(engine.profile().username, DEFAULT_USERNAME);
    }

    #[test]
    fn test_update_preferences_persists() {
        let (mut engine, storage, clock) = setup();
        let created = engine.profile().updated_at;
        clock.advance_secs_f64(30.0);

        engine
            .update_preferences(|prefs| {
                prefs.sound_enabled = false;
                prefs.selected_categories.clear();
            })
            .unwrap();

        let stored = storage.load_profile().unwrap();
        assert!(!stored.preferences.sound_enabled);
        assert!(stored.preferences.enable_notifications);
        assert!(stored.preferences.selected_categories.is_empty());
        assert!(stored.updated_at > created);
        assert_eq!(&stored, engine.profile());
    }

    #[test]
    fn test_add_points_saturates() {
        let (mut engine, _, _) = setup();
        engine.add_points(i64::MAX, "huge").unwrap();
        engine.add_points(10, "more").unwrap();
        assert_eq!(engine.profile().total_points, i64::MAX);
    }

    #[test]
    fn test_check_achievements_unlocks_once() {
        let (mut engine, _, _) = setup();
        let events = Arc::new(Mutex::new(Vec::new()));
        {
            let events = events.clone();
            engine.subscribe(move |e| {
                if let ProgressEvent::AchievementUnlocked { id, .. } = e {
                    events.lock().unwrap().push(id.clone());
                }
            });
        }

        engine.record_quiz_result(100.0, true).unwrap();
        let first = engine.check_achievements().unwrap();
        assert_eq!(first, vec![AchievementId::FirstQuiz, AchievementId::FirstPerfect]);
        assert!(engine.check_achievements().unwrap().is_empty());
        assert!(!engine.unlock_achievement(AchievementId::FirstQuiz).unwrap());

        let badge = engine.profile().achievement("first_quiz").unwrap();
        assert!(badge.is_unlocked);
        assert!(badge.unlocked_at.is_some());
        assert_eq!(*events.lock().unwrap(), vec!["first_quiz", "first_perfect"]);
    }

    #[test]
    fn test_reset_all_returns_to_onboarding() {
        let (mut engine, storage, _) = setup();
        engine.add_points(500, "test").unwrap();
        engine.set_onboarding_step(3).unwrap();
        engine.complete_onboarding().unwrap();
        let old_id = engine.profile().id;

        engine.reset_all().unwrap();

        assert_ne!(engine.profile().id, old_id);
        assert_eq!(engine.profile().total_points, 0);
        assert_eq!(engine.onboarding(), OnboardingState::default());
        assert_eq!(storage.load_onboarding(), OnboardingState::default());
        assert_eq!(storage.load_profile().unwrap().id, engine.profile().id);
    }
}
