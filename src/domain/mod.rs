//! Core domain types for MindSpark

mod challenge;
mod profile;
mod puzzle;
mod quiz;

pub use challenge::{ChallengeReward, ChallengeType, DailyChallenge, PlayedCategories};
pub use profile::{
    Achievement, OnboardingState, UserPreferences, UserProfile, UserStatistics, DEFAULT_USERNAME,
};
pub use puzzle::{MemoryCard, Puzzle, PuzzleAnswer, PuzzleData, PuzzleState, PuzzleType};
pub use quiz::{Question, Quiz, QuizResult, QuizState};

use serde::{Deserialize, Serialize};

/// Content category shared by quizzes and user preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuizCategory {
    Science,
    History,
    Geography,
    Literature,
    Mathematics,
    Technology,
    Arts,
    Sports,
    General,
}

impl QuizCategory {
    pub fn all() -> &'static [QuizCategory] {
        &[
            Self::Science,
            Self::History,
            Self::Geography,
            Self::Literature,
            Self::Mathematics,
            Self::Technology,
            Self::Arts,
            Self::Sports,
            Self::General,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Science => "Science",
            Self::History => "History",
            Self::Geography => "Geography",
            Self::Literature => "Literature",
            Self::Mathematics => "Mathematics",
            Self::Technology => "Technology",
            Self::Arts => "Arts",
            Self::Sports => "Sports",
            Self::General => "General Knowledge",
        }
    }
}

impl std::fmt::Display for QuizCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Difficulty level of a quiz or puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    /// Point multiplier applied to puzzle rewards
    pub fn multiplier(&self) -> i64 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
            Self::Expert => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
