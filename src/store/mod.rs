//! Persistence gateway
//!
//! Progress is kept as a handful of JSON blobs under fixed logical keys:
//!
//! ```text
//! user_profile      UserProfile
//! onboarding        OnboardingState
//! quiz_results      [QuizResult]      newest last, capped
//! puzzle_progress   [Puzzle]          overwritten wholesale
//! daily_challenges  [DailyChallenge]  overwritten wholesale
//! played_categories PlayedCategories  quiz categories seen today
//! ```
//!
//! [`BlobStore`] is the raw key-value backend; [`Storage`] adds typed access on
//! top. Reads never fail: an unreadable or undecodable blob is logged and
//! treated as absent.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::{
    DailyChallenge, OnboardingState, PlayedCategories, Puzzle, QuizResult, UserProfile,
};

/// Default number of quiz results kept in history
pub const QUIZ_HISTORY_LIMIT: usize = 100;

/// Logical blob keys
pub mod keys {
    pub const USER_PROFILE: &str = "user_profile";
    pub const ONBOARDING: &str = "onboarding";
    pub const QUIZ_RESULTS: &str = "quiz_results";
    pub const PUZZLE_PROGRESS: &str = "puzzle_progress";
    pub const DAILY_CHALLENGES: &str = "daily_challenges";
    pub const PLAYED_CATEGORIES: &str = "played_categories";

    pub const ALL: &[&str] = &[
        USER_PROFILE,
        ONBOARDING,
        QUIZ_RESULTS,
        PUZZLE_PROGRESS,
        DAILY_CHALLENGES,
        PLAYED_CATEGORIES,
    ];
}

/// Error type for the persistence layer
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Store lock poisoned")]
    Poisoned,
}

/// Raw key-value backend holding serialized blobs
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Typed access to the progress blobs
///
/// Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn BlobStore>,
    history_limit: usize,
}

impl Storage {
    pub fn new(backend: impl BlobStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            history_limit: QUIZ_HISTORY_LIMIT,
        }
    }

    /// Storage backed by a fresh in-memory map
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Override the quiz history cap (minimum 1)
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit.max(1);
        self
    }

    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Decode a blob, treating read and decode failures as absence
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read blob, using default");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to decode blob, using default");
                None
            }
        }
    }

    fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.backend.put(key, &raw)
    }

    // ========================================
    // PROFILE
    // ========================================

    pub fn load_profile(&self) -> Option<UserProfile> {
        self.load(keys::USER_PROFILE)
    }

    pub fn save_profile(&self, profile: &UserProfile) -> Result<(), StoreError> {
        self.save(keys::USER_PROFILE, profile)
    }

    pub fn load_onboarding(&self) -> OnboardingState {
        self.load(keys::ONBOARDING).unwrap_or_default()
    }

    pub fn save_onboarding(&self, state: &OnboardingState) -> Result<(), StoreError> {
        self.save(keys::ONBOARDING, state)
    }

    // ========================================
    // QUIZ HISTORY
    // ========================================

    pub fn load_quiz_results(&self) -> Vec<QuizResult> {
        self.load(keys::QUIZ_RESULTS).unwrap_or_default()
    }

    /// Append a result, evicting the oldest entries beyond the history limit
    pub fn append_quiz_result(&self, result: &QuizResult) -> Result<(), StoreError> {
        let mut results = self.load_quiz_results();
        results.push(result.clone());
        if results.len() > self.history_limit {
            let excess = results.len() - self.history_limit;
            results.drain(..excess);
        }
        self.save(keys::QUIZ_RESULTS, &results)
    }

    // ========================================
    // PUZZLES & CHALLENGES
    // ========================================

    pub fn load_puzzles(&self) -> Vec<Puzzle> {
        self.load(keys::PUZZLE_PROGRESS).unwrap_or_default()
    }

    pub fn save_puzzles(&self, puzzles: &[Puzzle]) -> Result<(), StoreError> {
        self.save(keys::PUZZLE_PROGRESS, puzzles)
    }

    pub fn load_challenges(&self) -> Vec<DailyChallenge> {
        self.load(keys::DAILY_CHALLENGES).unwrap_or_default()
    }

    pub fn save_challenges(&self, challenges: &[DailyChallenge]) -> Result<(), StoreError> {
        self.save(keys::DAILY_CHALLENGES, challenges)
    }

    pub fn load_played_categories(&self) -> Option<PlayedCategories> {
        self.load(keys::PLAYED_CATEGORIES)
    }

    pub fn save_played_categories(&self, played: &PlayedCategories) -> Result<(), StoreError> {
        self.save(keys::PLAYED_CATEGORIES, played)
    }

    /// Remove every progress blob
    pub fn reset_all(&self) -> Result<(), StoreError> {
        for key in keys::ALL {
            self.backend.remove(key)?;
        }
        Ok(())
    }

    /// Raw access for tooling and tests
    pub fn backend(&self) -> &dyn BlobStore {
        self.backend.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn result(n: u32) -> QuizResult {
        QuizResult {
            id: Uuid::new_v4(),
            quiz_id: Uuid::new_v4(),
            quiz_title: format!("Quiz {}", n),
            category: None,
            score: 50.0,
            correct_answers: 1,
            total_questions: 2,
            time_taken: f64::from(n),
            completed_at: Utc::now() + Duration::seconds(i64::from(n)),
        }
    }

    #[test]
    fn test_history_keeps_most_recent_hundred() {
        let storage = Storage::in_memory();
        let saved: Vec<QuizResult> = (0..105).map(result).collect();
        for r in &saved {
            storage.append_quiz_result(r).unwrap();
        }

        let kept = storage.load_quiz_results();
        assert_eq!(kept.len(), 100);
        assert_eq!(kept, saved[5..].to_vec());
    }

    #[test]
    fn test_corrupt_blob_falls_back_to_default() {
        let storage = Storage::in_memory();
        storage.backend().put(keys::USER_PROFILE, "{not json").unwrap();
        storage.backend().put(keys::QUIZ_RESULTS, "42").unwrap();

        assert!(storage.load_profile().is_none());
        assert!(storage.load_quiz_results().is_empty());
        assert_eq!(storage.load_onboarding(), OnboardingState::default());
    }

    #[test]
    fn test_reset_all_removes_every_key() {
        let storage = Storage::in_memory();
        storage.save_profile(&UserProfile::new(Utc::now())).unwrap();
        storage.append_quiz_result(&result(1)).unwrap();
        storage
            .save_onboarding(&OnboardingState {
                completed: true,
                step: 0,
            })
            .unwrap();

        storage.reset_all().unwrap();

        for key in keys::ALL {
            assert!(storage.backend().get(key).unwrap().is_none(), "{} survived", key);
        }
    }

    #[test]
    fn test_custom_history_limit() {
        let storage = Storage::in_memory().with_history_limit(3);
        for n in 0..5 {
            storage.append_quiz_result(&result(n)).unwrap();
        }
        let titles: Vec<String> = storage
            .load_quiz_results()
            .into_iter()
            .map(|r| r.quiz_title)
            .collect();
        assert_eq!(titles, vec!["Quiz 2", "Quiz 3", "Quiz 4"]);
    }
}
