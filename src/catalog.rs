//! Built-in sample content
//!
//! Static quizzes and puzzles used by the CLI and as the first-launch puzzle
//! catalogue. Content is reference data; only puzzle progress is persisted.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;

use crate::domain::{
    Difficulty, MemoryCard, Puzzle, PuzzleData, PuzzleType, Question, Quiz, QuizCategory,
};

pub fn sample_quizzes() -> Vec<Quiz> {
    vec![
        Quiz::new(
            "Science Fundamentals",
            QuizCategory::Science,
            Difficulty::Easy,
            vec![
                Question::new("What is the chemical symbol for gold?", &["Au", "Ag", "Fe", "Cu"], 0)
                    .with_explanation("Au comes from the Latin word 'aurum' meaning gold."),
                Question::new(
                    "What planet is known as the Red Planet?",
                    &["Venus", "Mars", "Jupiter", "Saturn"],
                    1,
                )
                .with_explanation("Mars appears red due to iron oxide on its surface."),
                Question::new(
                    "What is the speed of light?",
                    &["299,792 km/s", "150,000 km/s", "400,000 km/s", "250,000 km/s"],
                    0,
                )
                .with_explanation(
                    "Light travels at approximately 299,792 kilometers per second in a vacuum.",
                ),
                Question::new(
                    "How many bones are in the adult human body?",
                    &["196", "206", "216", "186"],
                    1,
                )
                .with_explanation("An adult human has 206 bones."),
                Question::new(
                    "What is the most abundant gas in Earth's atmosphere?",
                    &["Oxygen", "Carbon Dioxide", "Nitrogen", "Hydrogen"],
                    2,
                )
                .with_explanation("Nitrogen makes up about 78% of Earth's atmosphere."),
            ],
        ),
        Quiz::new(
            "History 101",
            QuizCategory::History,
            Difficulty::Medium,
            vec![
                Question::new("In which year did World War II end?", &["1943", "1944", "1945", "1946"], 2)
                    .with_explanation("World War II ended in 1945."),
                Question::new(
                    "Who was the first President of the United States?",
                    &["Thomas Jefferson", "George Washington", "John Adams", "Benjamin Franklin"],
                    1,
                )
                .with_explanation("George Washington served as the first U.S. President from 1789 to 1797."),
                Question::new("What year did the Titanic sink?", &["1910", "1911", "1912", "1913"], 2)
                    .with_explanation("The Titanic sank on April 15, 1912."),
                Question::new(
                    "Who painted the Mona Lisa?",
                    &["Michelangelo", "Leonardo da Vinci", "Raphael", "Donatello"],
                    1,
                )
                .with_explanation("Leonardo da Vinci painted the Mona Lisa in the early 16th century."),
            ],
        ),
        Quiz::new(
            "Tech Trivia",
            QuizCategory::Technology,
            Difficulty::Medium,
            vec![
                Question::new(
                    "What does CPU stand for?",
                    &[
                        "Central Processing Unit",
                        "Computer Personal Unit",
                        "Central Program Utility",
                        "Computer Processing Utility",
                    ],
                    0,
                ),
                Question::new(
                    "Who is the founder of Apple Inc.?",
                    &["Bill Gates", "Steve Jobs", "Mark Zuckerberg", "Elon Musk"],
                    1,
                ),
                Question::new(
                    "What year was the first iPhone released?",
                    &["2005", "2006", "2007", "2008"],
                    2,
                ),
                Question::new(
                    "What does HTML stand for?",
                    &[
                        "Hyper Text Markup Language",
                        "High Tech Modern Language",
                        "Home Tool Markup Language",
                        "Hyperlinks and Text Markup Language",
                    ],
                    0,
                ),
                Question::new(
                    "Which company developed the Android operating system?",
                    &["Apple", "Microsoft", "Google", "Samsung"],
                    2,
                ),
            ],
        )
        .with_time_limit(90),
        Quiz::new(
            "Math Basics",
            QuizCategory::Mathematics,
            Difficulty::Easy,
            vec![
                Question::new("What is the square root of 144?", &["10", "11", "12", "13"], 2),
                Question::new("What is 15% of 200?", &["25", "30", "35", "40"], 1),
                Question::new("If x + 5 = 12, what is x?", &["5", "6", "7", "8"], 2),
                Question::new(
                    "What is the value of π (pi) to two decimal places?",
                    &["3.12", "3.14", "3.16", "3.18"],
                    1,
                ),
            ],
        )
        .with_time_limit(60),
        Quiz::new(
            "World Geography",
            QuizCategory::Geography,
            Difficulty::Easy,
            vec![
                Question::new("What is the capital of France?", &["London", "Berlin", "Paris", "Madrid"], 2),
                Question::new("Which is the largest ocean?", &["Atlantic", "Indian", "Arctic", "Pacific"], 3),
                Question::new("How many continents are there?", &["5", "6", "7", "8"], 2),
                Question::new(
                    "What is the tallest mountain in the world?",
                    &["K2", "Mount Everest", "Kilimanjaro", "Denali"],
                    1,
                ),
                Question::new(
                    "Which country has the largest population?",
                    &["India", "United States", "China", "Indonesia"],
                    2,
                ),
            ],
        ),
    ]
}

/// Memory cards in random order
fn shuffled_pairs(symbols: &[&str]) -> Vec<MemoryCard> {
    let mut cards = MemoryCard::pairs(symbols);
    cards.shuffle(&mut rand::thread_rng());
    cards
}

pub fn sample_puzzles(now: DateTime<Utc>) -> Vec<Puzzle> {
    vec![
        Puzzle::new(
            "Memory Match",
            PuzzleType::Memory,
            Difficulty::Easy,
            "Match all the pairs of cards",
            PuzzleData::MemoryGame {
                cards: shuffled_pairs(&["🎮", "🎯", "🎨", "🎭", "🎪", "🎸"]),
            },
            now,
        )
        .with_time_limit(120.0),
        Puzzle::new(
            "Number Slide",
            PuzzleType::Logic,
            Difficulty::Medium,
            "Arrange numbers in order by sliding tiles",
            PuzzleData::LogicGrid {
                grid: vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 0]],
            },
            now,
        )
        .with_time_limit(180.0),
        Puzzle::new(
            "Pattern Master",
            PuzzleType::Pattern,
            Difficulty::Medium,
            "Find the next number in the sequence: 2, 4, 8, 16, ?",
            PuzzleData::PatternSequence {
                sequence: vec![2, 4, 8, 16],
                options: vec![24, 32, 20, 28],
            },
            now,
        )
        .with_time_limit(60.0),
        Puzzle::new(
            "Word Unscrambler",
            PuzzleType::WordPuzzle,
            Difficulty::Easy,
            "Unscramble the word",
            PuzzleData::WordScramble {
                word: "CHALLENGE".into(),
                scrambled: "EGNELLAHC".into(),
                hints: vec![
                    "It means a difficult task".into(),
                    "9 letters".into(),
                    "Starts with C".into(),
                ],
            },
            now,
        )
        .with_time_limit(90.0),
        Puzzle::new(
            "Quick Math",
            PuzzleType::MathPuzzle,
            Difficulty::Hard,
            "Solve: (15 × 4) + (36 ÷ 3) - 8",
            PuzzleData::MathChallenge {
                equation: "(15 × 4) + (36 ÷ 3) - 8".into(),
                answer: 64.0,
            },
            now,
        )
        .with_time_limit(45.0),
        Puzzle::new(
            "Cosmic Memory",
            PuzzleType::Memory,
            Difficulty::Hard,
            "Match all space-themed pairs",
            PuzzleData::MemoryGame {
                cards: shuffled_pairs(&["🚀", "🛸", "🌟", "⭐", "💫", "✨", "🌙", "☀️"]),
            },
            now,
        )
        .with_time_limit(150.0),
    ]
}
