use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Difficulty;

/// A puzzle plus its per-player progress (best time, completion)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub id: Uuid,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: PuzzleType,
    pub difficulty: Difficulty,
    pub description: String,
    pub data: PuzzleData,
    /// Advisory limit in seconds; not enforced by the session engine
    pub time_limit: Option<f64>,
    /// Fastest successful completion in seconds
    pub best_time: Option<f64>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Puzzle {
    pub fn new(
        title: impl Into<String>,
        kind: PuzzleType,
        difficulty: Difficulty,
        description: impl Into<String>,
        data: PuzzleData,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            kind,
            difficulty,
            description: description.into(),
            data,
            time_limit: None,
            best_time: None,
            is_completed: false,
            created_at,
        }
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Record a successful run. Returns true if `seconds` became the new best time.
    pub fn record_success(&mut self, seconds: f64) -> bool {
        self.is_completed = true;
        match self.best_time {
            Some(best) if seconds >= best => false,
            _ => {
                self.best_time = Some(seconds);
                true
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PuzzleType {
    Logic,
    Memory,
    Pattern,
    WordPuzzle,
    MathPuzzle,
    Spatial,
}

impl PuzzleType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Logic => "Logic",
            Self::Memory => "Memory",
            Self::Pattern => "Pattern",
            Self::WordPuzzle => "Word Puzzle",
            Self::MathPuzzle => "Math Puzzle",
            Self::Spatial => "Spatial",
        }
    }
}

/// Type-specific puzzle payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PuzzleData {
    MemoryGame {
        cards: Vec<MemoryCard>,
    },
    LogicGrid {
        grid: Vec<Vec<i32>>,
    },
    PatternSequence {
        sequence: Vec<i64>,
        options: Vec<i64>,
    },
    WordScramble {
        word: String,
        scrambled: String,
        hints: Vec<String>,
    },
    MathChallenge {
        equation: String,
        answer: f64,
    },
}

/// A player's attempt at a puzzle, checked against [`PuzzleData`]
#[derive(Debug, Clone, PartialEq)]
pub enum PuzzleAnswer {
    /// Ids of the cards the player has matched
    MatchedCards(Vec<Uuid>),
    /// Chosen next value of a sequence
    Choice(i64),
    Word(String),
    Number(f64),
}

impl PuzzleData {
    /// Check an answer with the in-core rule for this payload.
    ///
    /// Returns `None` when the payload has no in-core rule (logic grids) or the
    /// answer is of the wrong shape; the caller decides success in that case.
    pub fn check_answer(&self, answer: &PuzzleAnswer) -> Option<bool> {
        match (self, answer) {
            (Self::WordScramble { word, .. }, PuzzleAnswer::Word(guess)) => {
                Some(guess.trim().to_lowercase() == word.trim().to_lowercase())
            }
            (Self::MathChallenge { answer, .. }, PuzzleAnswer::Number(n)) => {
                Some((answer - n).abs() < 1e-6)
            }
            (Self::PatternSequence { sequence, .. }, PuzzleAnswer::Choice(choice)) => {
                next_term(sequence).map(|next| next == *choice)
            }
            (Self::MemoryGame { cards }, PuzzleAnswer::MatchedCards(matched)) => Some(
                !cards.is_empty() && cards.iter().all(|c| c.is_matched || matched.contains(&c.id)),
            ),
            _ => None,
        }
    }
}

/// Next term of an arithmetic or geometric integer sequence
fn next_term(sequence: &[i64]) -> Option<i64> {
    let [.., a, b, c] = sequence else {
        return None;
    };
    if b - a == c - b {
        return Some(c + (c - b));
    }
    if *a != 0 && *b != 0 && b % a == 0 && c % b == 0 && b / a == c / b {
        return Some(c * (c / b));
    }
    None
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryCard {
    pub id: Uuid,
    pub emoji: String,
    pub is_matched: bool,
    pub is_face_up: bool,
}

impl MemoryCard {
    pub fn new(emoji: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            emoji: emoji.into(),
            is_matched: false,
            is_face_up: false,
        }
    }

    /// Two face-down cards per symbol
    pub fn pairs(symbols: &[&str]) -> Vec<MemoryCard> {
        symbols
            .iter()
            .flat_map(|s| [MemoryCard::new(*s), MemoryCard::new(*s)])
            .collect()
    }
}

/// Lifecycle of a puzzle session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PuzzleState {
    #[default]
    Idle,
    Active,
    Completed,
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_scramble_is_case_insensitive() {
        let data = PuzzleData::WordScramble {
            word: "CHALLENGE".into(),
            scrambled: "EGNELLAHC".into(),
            hints: vec![],
        };
        assert_eq!(data.check_answer(&PuzzleAnswer::Word(" challenge ".into())), Some(true));
        assert_eq!(data.check_answer(&PuzzleAnswer::Word("change".into())), Some(false));
        assert_eq!(data.check_answer(&PuzzleAnswer::Number(1.0)), None);
    }

    #[test]
    fn test_pattern_sequence_rules() {
        let geometric = PuzzleData::PatternSequence {
            sequence: vec![2, 4, 8, 16],
            options: vec![24, 32, 20, 28],
        };
        assert_eq!(geometric.check_answer(&PuzzleAnswer::Choice(32)), Some(true));
        assert_eq!(geometric.check_answer(&PuzzleAnswer::Choice(24)), Some(false));

        let arithmetic = PuzzleData::PatternSequence {
            sequence: vec![3, 6, 9],
            options: vec![12, 18],
        };
        assert_eq!(arithmetic.check_answer(&PuzzleAnswer::Choice(12)), Some(true));

        let irregular = PuzzleData::PatternSequence {
            sequence: vec![1, 5, 2],
            options: vec![],
        };
        assert_eq!(irregular.check_answer(&PuzzleAnswer::Choice(3)), None);
    }

    #[test]
    fn test_logic_grid_has_no_rule() {
        let data = PuzzleData::LogicGrid {
            grid: vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 0]],
        };
        assert_eq!(data.check_answer(&PuzzleAnswer::Choice(0)), None);
    }

    #[test]
    fn test_memory_game_needs_every_card() {
        let cards = MemoryCard::pairs(&["a", "b"]);
        let ids: Vec<Uuid> = cards.iter().map(|c| c.id).collect();
        let data = PuzzleData::MemoryGame { cards };

        assert_eq!(data.check_answer(&PuzzleAnswer::MatchedCards(ids[..3].to_vec())), Some(false));
        assert_eq!(data.check_answer(&PuzzleAnswer::MatchedCards(ids)), Some(true));
    }

    #[test]
    fn test_payload_tagged_by_type() {
        let data = PuzzleData::MathChallenge {
            equation: "(15 × 4) + (36 ÷ 3) - 8".into(),
            answer: 64.0,
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["type"], "mathChallenge");
        assert_eq!(json["answer"], 64.0);
    }

    #[test]
    fn test_best_time_only_improves() {
        let mut puzzle = Puzzle::new(
            "Quick Math",
            PuzzleType::MathPuzzle,
            Difficulty::Hard,
            "",
            PuzzleData::MathChallenge {
                equation: "1 + 1".into(),
                answer: 2.0,
            },
            Utc::now(),
        );
        assert!(puzzle.record_success(12.0));
        assert!(!puzzle.record_success(15.0));
        assert!(!puzzle.record_success(12.0));
        assert!(puzzle.record_success(9.5));
        assert_eq!(puzzle.best_time, Some(9.5));
        assert!(puzzle.is_completed);
    }
}
