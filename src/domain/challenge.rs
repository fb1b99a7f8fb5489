use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::QuizCategory;

/// One daily task with a numeric target and a claimable reward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyChallenge {
    pub id: Uuid,
    /// Generation instant; the challenge belongs to this local calendar day
    pub date: DateTime<Utc>,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ChallengeType,
    pub target_value: u32,
    pub current_progress: u32,
    pub is_completed: bool,
    /// Set once the reward has been handed out
    #[serde(default)]
    pub is_claimed: bool,
    pub reward: ChallengeReward,
}

impl DailyChallenge {
    /// Progress towards the target (0.0 - 1.0)
    pub fn progress_fraction(&self) -> f64 {
        if self.target_value == 0 {
            return 0.0;
        }
        (f64::from(self.current_progress) / f64::from(self.target_value)).min(1.0)
    }

    /// Whether `claim` would hand out the reward right now
    pub fn is_claimable(&self) -> bool {
        self.is_completed && !self.is_claimed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChallengeType {
    CompleteQuizzes,
    SolvePuzzles,
    PerfectScore,
    TimeChallenge,
    Streak,
    Variety,
}

impl ChallengeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompleteQuizzes => "complete_quizzes",
            Self::SolvePuzzles => "solve_puzzles",
            Self::PerfectScore => "perfect_score",
            Self::TimeChallenge => "time_challenge",
            Self::Streak => "streak",
            Self::Variety => "variety",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::CompleteQuizzes => "Complete Quizzes",
            Self::SolvePuzzles => "Solve Puzzles",
            Self::PerfectScore => "Perfect Score",
            Self::TimeChallenge => "Time Challenge",
            Self::Streak => "Streak",
            Self::Variety => "Variety",
        }
    }
}

/// What a challenge pays out when claimed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeReward {
    pub points: i64,
    pub badge: Option<String>,
    pub title: Option<String>,
}

/// Quiz categories completed on one local calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedCategories {
    pub date: DateTime<Utc>,
    pub categories: Vec<QuizCategory>,
}

impl PlayedCategories {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            date,
            categories: Vec::new(),
        }
    }

    /// Add `category`. Returns false if it was already played.
    pub fn insert(&mut self, category: QuizCategory) -> bool {
        if self.categories.contains(&category) {
            return false;
        }
        self.categories.push(category);
        true
    }
}
