//! Achievement definitions and unlock rules
//!
//! Every profile carries the whole catalogue in definition order. Badges start
//! locked and unlock at most once.

use crate::domain::{Achievement, UserProfile};

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AchievementId {
    // Quiz milestones
    FirstQuiz,
    TenQuizzes,
    FiftyQuizzes,

    // Perfect scores
    FirstPerfect,
    FivePerfect,

    // Puzzles
    FirstPuzzle,
    TenPuzzles,

    // Streaks
    Streak3,
    Streak7,
    Streak30,

    // Challenges
    FirstChallenge,
    TenChallenges,

    // Points
    Points1000,
    Points10000,
}

impl AchievementId {
    /// Stable string id stored in the profile
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstQuiz => "first_quiz",
            Self::TenQuizzes => "ten_quizzes",
            Self::FiftyQuizzes => "fifty_quizzes",
            Self::FirstPerfect => "first_perfect",
            Self::FivePerfect => "five_perfect",
            Self::FirstPuzzle => "first_puzzle",
            Self::TenPuzzles => "ten_puzzles",
            Self::Streak3 => "streak_3",
            Self::Streak7 => "streak_7",
            Self::Streak30 => "streak_30",
            Self::FirstChallenge => "first_challenge",
            Self::TenChallenges => "ten_challenges",
            Self::Points1000 => "points_1000",
            Self::Points10000 => "points_10000",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        ACHIEVEMENTS.iter().map(|a| a.id).find(|id| id.as_str() == s)
    }
}

/// Profile figure an unlock rule looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    QuizzesCompleted(u32),
    PerfectScores(u32),
    PuzzlesSolved(u32),
    /// Current or longest streak reached N days
    Streak(u32),
    ChallengesCompleted(u32),
    TotalPoints(i64),
}

impl Requirement {
    pub fn is_met(&self, profile: &UserProfile) -> bool {
        let stats = &profile.statistics;
        match *self {
            Self::QuizzesCompleted(n) => stats.total_quizzes_completed >= n,
            Self::PerfectScores(n) => stats.perfect_scores >= n,
            Self::PuzzlesSolved(n) => stats.total_puzzles_solved >= n,
            Self::Streak(n) => profile.streak.max(profile.longest_streak) >= n,
            Self::ChallengesCompleted(n) => stats.total_challenges_completed >= n,
            Self::TotalPoints(n) => profile.total_points >= n,
        }
    }
}

/// Achievement definition
#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: AchievementId,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub requirement: Requirement,
}

impl AchievementDef {
    /// Locked profile badge for this definition
    fn to_badge(&self) -> Achievement {
        Achievement {
            id: self.id.as_str().to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            icon: self.icon.to_string(),
            unlocked_at: None,
            is_unlocked: false,
        }
    }
}

/// All achievement definitions, in display order
pub static ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: AchievementId::FirstQuiz,
        title: "First Steps",
        description: "Complete your first quiz",
        icon: "🎓",
        requirement: Requirement::QuizzesCompleted(1),
    },
    AchievementDef {
        id: AchievementId::TenQuizzes,
        title: "Quiz Enthusiast",
        description: "Complete 10 quizzes",
        icon: "📚",
        requirement: Requirement::QuizzesCompleted(10),
    },
    AchievementDef {
        id: AchievementId::FiftyQuizzes,
        title: "Quiz Veteran",
        description: "Complete 50 quizzes",
        icon: "🏛️",
        requirement: Requirement::QuizzesCompleted(50),
    },
    AchievementDef {
        id: AchievementId::FirstPerfect,
        title: "Flawless",
        description: "Get a perfect score on any quiz",
        icon: "⭐",
        requirement: Requirement::PerfectScores(1),
    },
    AchievementDef {
        id: AchievementId::FivePerfect,
        title: "Perfectionist",
        description: "Get 5 perfect scores",
        icon: "🌟",
        requirement: Requirement::PerfectScores(5),
    },
    AchievementDef {
        id: AchievementId::FirstPuzzle,
        title: "Puzzle Solver",
        description: "Solve your first puzzle",
        icon: "🧩",
        requirement: Requirement::PuzzlesSolved(1),
    },
    AchievementDef {
        id: AchievementId::TenPuzzles,
        title: "Puzzle Master",
        description: "Solve 10 puzzles",
        icon: "🧠",
        requirement: Requirement::PuzzlesSolved(10),
    },
    AchievementDef {
        id: AchievementId::Streak3,
        title: "On Fire",
        description: "Reach a 3-day streak",
        icon: "🔥",
        requirement: Requirement::Streak(3),
    },
    AchievementDef {
        id: AchievementId::Streak7,
        title: "Week Warrior",
        description: "Reach a 7-day streak",
        icon: "🗓️",
        requirement: Requirement::Streak(7),
    },
    AchievementDef {
        id: AchievementId::Streak30,
        title: "Unstoppable",
        description: "Reach a 30-day streak",
        icon: "🏅",
        requirement: Requirement::Streak(30),
    },
    AchievementDef {
        id: AchievementId::FirstChallenge,
        title: "Challenger",
        description: "Claim your first daily challenge",
        icon: "🎯",
        requirement: Requirement::ChallengesCompleted(1),
    },
    AchievementDef {
        id: AchievementId::TenChallenges,
        title: "Daily Devotee",
        description: "Claim 10 daily challenges",
        icon: "🏆",
        requirement: Requirement::ChallengesCompleted(10),
    },
    AchievementDef {
        id: AchievementId::Points1000,
        title: "Point Collector",
        description: "Earn 1,000 points",
        icon: "💰",
        requirement: Requirement::TotalPoints(1_000),
    },
    AchievementDef {
        id: AchievementId::Points10000,
        title: "Point Hoarder",
        description: "Earn 10,000 points",
        icon: "💎",
        requirement: Requirement::TotalPoints(10_000),
    },
];

/// Append badges for definitions the profile doesn't carry yet.
///
/// Existing badges keep their position and unlock state. Returns true if the
/// profile changed.
pub fn sync_catalog(profile: &mut UserProfile) -> bool {
    let mut changed = false;
    for def in ACHIEVEMENTS {
        if profile.achievement(def.id.as_str()).is_none() {
            profile.achievements.push(def.to_badge());
            changed = true;
        }
    }
    changed
}

/// Definitions whose requirement is met but whose badge is still locked
pub fn check_unlocks(profile: &UserProfile) -> Vec<AchievementId> {
    ACHIEVEMENTS
        .iter()
        .filter(|def| def.requirement.is_met(profile))
        .filter(|def| {
            profile
                .achievement(def.id.as_str())
                .is_none_or(|badge| !badge.is_unlocked)
        })
        .map(|def| def.id)
        .collect()
}
