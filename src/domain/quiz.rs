use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Difficulty, QuizCategory};

/// Immutable quiz content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: Uuid,
    pub title: String,
    pub category: QuizCategory,
    pub difficulty: Difficulty,
    pub questions: Vec<Question>,
    /// Countdown length in whole seconds, if the quiz is timed
    pub time_limit: Option<u32>,
}

impl Quiz {
    pub fn new(
        title: impl Into<String>,
        category: QuizCategory,
        difficulty: Difficulty,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            category,
            difficulty,
            questions,
            time_limit: None,
        }
    }

    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit = Some(seconds);
        self
    }
}

/// A multiple-choice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Uuid,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer_index: usize,
    pub explanation: Option<String>,
}

impl Question {
    pub fn new(text: impl Into<String>, options: &[&str], correct_answer_index: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer_index,
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }
}

/// Historical record of one finished quiz attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub quiz_title: String,
    /// Category snapshot; absent in records written before categories were tracked
    #[serde(default)]
    pub category: Option<QuizCategory>,
    /// Score percentage, 0-100
    pub score: f64,
    pub correct_answers: u32,
    pub total_questions: u32,
    /// Seconds from start to completion
    pub time_taken: f64,
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn is_perfect(&self) -> bool {
        self.total_questions > 0 && self.correct_answers == self.total_questions
    }
}

/// Lifecycle of a quiz session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizState {
    #[default]
    Idle,
    Active,
    Completed,
}
