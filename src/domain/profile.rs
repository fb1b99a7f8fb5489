use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Difficulty, QuizCategory};

/// Display name used until the player picks one
pub const DEFAULT_USERNAME: &str = "Player";

/// The player's persisted profile
///
/// Only [`crate::profile::ProfileEngine`] mutates a profile; everything else
/// reads it through the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub total_points: i64,
    pub streak: u32,
    pub longest_streak: u32,
    /// Instant of the last streak update
    pub last_active_date: DateTime<Utc>,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub statistics: UserStatistics,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// A fresh profile as created on first launch
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: DEFAULT_USERNAME.to_string(),
            total_points: 0,
            streak: 0,
            longest_streak: 0,
            last_active_date: now,
            preferences: UserPreferences::default(),
            statistics: UserStatistics::default(),
            achievements: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Number of unlocked achievements
    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.is_unlocked).count()
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }
}

/// Content and feedback preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    /// May be empty; no minimum is enforced
    pub selected_categories: Vec<QuizCategory>,
    pub preferred_difficulty: Difficulty,
    pub enable_notifications: bool,
    pub sound_enabled: bool,
    pub haptic_enabled: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            selected_categories: QuizCategory::all().to_vec(),
            preferred_difficulty: Difficulty::Medium,
            enable_notifications: true,
            sound_enabled: true,
            haptic_enabled: true,
        }
    }
}

/// Aggregated play statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStatistics {
    pub total_quizzes_completed: u32,
    pub total_puzzles_solved: u32,
    pub total_challenges_completed: u32,
    /// Running mean of quiz score percentages (0-100)
    pub average_quiz_score: f64,
    /// Seconds spent in completed sessions
    pub total_time_spent: f64,
    pub perfect_scores: u32,
}

impl UserStatistics {
    /// Fold one quiz score (0-100) into the running mean
    pub fn update_quiz_stats(&mut self, score: f64, is_perfect: bool) {
        let old_count = f64::from(self.total_quizzes_completed);
        let new_count = self.total_quizzes_completed + 1;
        self.average_quiz_score = (self.average_quiz_score * old_count + score) / f64::from(new_count);
        self.total_quizzes_completed = new_count;
        if is_perfect {
            self.perfect_scores += 1;
        }
    }
}

/// A badge on the profile, locked or unlocked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// Stable identifier from the achievement catalogue
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: Option<DateTime<Utc>>,
    pub is_unlocked: bool,
}

/// First-launch flow progress
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardingState {
    pub completed: bool,
    pub step: u32,
}
