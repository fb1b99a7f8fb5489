//! MindSpark - offline progress engine
//!
//! Tracks a single player's progress through quizzes, puzzles and daily
//! challenges, entirely on the local machine.
//!
//! ## Engines
//!
//! - **Profile** ([`profile::ProfileEngine`]): the player's profile, daily
//!   streak, points, statistics and achievements.
//! - **Quiz sessions** ([`quiz::QuizSession`]): one quiz attempt with an
//!   optional countdown.
//! - **Puzzle sessions** ([`puzzle::PuzzleSession`]): one puzzle attempt with
//!   elapsed-time tracking and best times.
//! - **Daily challenges** ([`challenge::ChallengeBoard`]): one batch per
//!   calendar day with exactly-once reward claims.
//!
//! [`tracker::Tracker`] wires the engines together over a shared
//! [`store::Storage`] and [`clock::Clock`].

pub mod catalog;
pub mod challenge;
pub mod clock;
pub mod config;
pub mod domain;
pub mod events;
pub mod profile;
pub mod puzzle;
pub mod quiz;
pub mod store;
pub mod timer;
pub mod tracker;

pub use domain::*;
