//! Daily challenge templates

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{ChallengeReward, ChallengeType, DailyChallenge};

/// Blueprint for one daily challenge
#[derive(Debug, Clone)]
pub struct ChallengeTemplate {
    pub kind: ChallengeType,
    pub title: &'static str,
    pub description: &'static str,
    pub target: u32,
    pub points: i64,
    pub badge: &'static str,
}

impl ChallengeTemplate {
    /// Fresh challenge dated `now`
    pub fn instantiate(&self, now: DateTime<Utc>) -> DailyChallenge {
        DailyChallenge {
            id: Uuid::new_v4(),
            date: now,
            title: self.title.to_string(),
            description: self.description.to_string(),
            kind: self.kind,
            target_value: self.target,
            current_progress: 0,
            is_completed: false,
            is_claimed: false,
            reward: ChallengeReward {
                points: self.points,
                badge: Some(self.badge.to_string()),
                title: None,
            },
        }
    }
}

/// The batch generated every day, in display order
pub static DAILY_TEMPLATES: &[ChallengeTemplate] = &[
    ChallengeTemplate {
        kind: ChallengeType::CompleteQuizzes,
        title: "Quiz Master",
        description: "Complete 3 quizzes today",
        target: 3,
        points: 100,
        badge: "📚",
    },
    ChallengeTemplate {
        kind: ChallengeType::SolvePuzzles,
        title: "Puzzle Solver",
        description: "Solve 2 puzzles today",
        target: 2,
        points: 150,
        badge: "🧩",
    },
    ChallengeTemplate {
        kind: ChallengeType::PerfectScore,
        title: "Perfect Score",
        description: "Get a perfect score on any quiz",
        target: 1,
        points: 200,
        badge: "⭐",
    },
    ChallengeTemplate {
        kind: ChallengeType::Variety,
        title: "Variety Seeker",
        description: "Complete quizzes from 3 different categories",
        target: 3,
        points: 120,
        badge: "🌈",
    },
];

/// Instantiate every template for `now`
pub fn generate(now: DateTime<Utc>) -> Vec<DailyChallenge> {
    DAILY_TEMPLATES.iter().map(|t| t.instantiate(now)).collect()
}
