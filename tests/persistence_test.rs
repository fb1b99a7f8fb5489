//! Integration tests for progress surviving process restarts

mod common;

use common::{TestEnv, play_quiz, quiz_with};
use mindspark::config::{Config, StorageBackend};
use mindspark::domain::{ChallengeType, QuizCategory};
use mindspark::profile::{AchievementId, StreakChange};
use mindspark::store::{SqliteStore, Storage, keys};
use tempfile::TempDir;
use uuid::Uuid;

fn sqlite_env(dir: &TempDir) -> TestEnv {
    let store = SqliteStore::open(&dir.path().join("progress.db")).expect("open sqlite");
    TestEnv::with_storage(Storage::new(store))
}

#[test]
fn test_streak_grows_across_daily_launches() {
    let dir = TempDir::new().unwrap();
    let env = sqlite_env(&dir);

    let tracker = env.open();
    assert_eq!(tracker.streak_change(), StreakChange::Unchanged);
    assert_eq!(tracker.profile().profile().streak, 0);

    for expected in 1..=3 {
        env.clock.advance_days(1);
        let tracker = env.open();
        assert_eq!(tracker.streak_change(), StreakChange::Extended);
        assert_eq!(tracker.profile().profile().streak, expected);
    }

    let tracker = env.open();
    let profile = tracker.profile().profile();
    assert_eq!(tracker.streak_change(), StreakChange::Unchanged);
    assert!(
        profile
            .achievement(AchievementId::Streak3.as_str())
            .is_some_and(|a| a.is_unlocked)
    );

    env.clock.advance_days(3);
    let tracker = env.open();
    assert_eq!(tracker.streak_change(), StreakChange::Restarted);
    assert_eq!(tracker.profile().profile().streak, 1);
    assert_eq!(tracker.profile().profile().longest_streak, 3);
}

#[test]
fn test_challenges_kept_within_a_day() {
    let dir = TempDir::new().unwrap();
    let env = sqlite_env(&dir);

    let mut tracker = env.open();
    play_quiz(&env, &mut tracker, quiz_with(2, QuizCategory::History), &[true, false], 3.0);
    let ids: Vec<Uuid> = tracker.challenges().challenges().iter().map(|c| c.id).collect();
    drop(tracker);

    env.clock.advance_secs_f64(3600.0);
    let tracker = env.open();
    let reopened: Vec<Uuid> = tracker.challenges().challenges().iter().map(|c| c.id).collect();
    assert_eq!(reopened, ids);
    assert!(
        tracker
            .challenges()
            .challenges()
            .iter()
            .any(|c| c.current_progress > 0)
    );

    env.clock.advance_days(1);
    let tracker = env.open();
    assert!(
        tracker
            .challenges()
            .challenges()
            .iter()
            .all(|c| !ids.contains(&c.id))
    );
}

#[test]
fn test_history_and_best_times_survive_restart() {
    let dir = TempDir::new().unwrap();
    let env = sqlite_env(&dir);

    let mut tracker = env.open();
    play_quiz(&env, &mut tracker, quiz_with(4, QuizCategory::Geography), &[true; 4], 2.0);

    let puzzle_id = tracker.puzzle().puzzles()[0].id;
    tracker.start_puzzle_by_id(puzzle_id).unwrap();
    env.clock.advance_secs_f64(42.0);
    tracker.finish_puzzle(true).unwrap().unwrap();
    let points = tracker.profile().profile().total_points;
    drop(tracker);

    let tracker = env.open();
    let history = tracker.quiz_history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].score, 100.0);
    assert_eq!(history[0].category, Some(QuizCategory::Geography));

    let puzzle = tracker.puzzle().puzzle(puzzle_id).unwrap();
    assert!(puzzle.is_completed);
    assert_eq!(puzzle.best_time, Some(42.0));
    assert_eq!(tracker.profile().profile().total_points, points);
}

#[test]
fn test_corrupt_profile_starts_fresh() {
    let env = TestEnv::new();
    let mut tracker = env.open();
    play_quiz(&env, &mut tracker, quiz_with(1, QuizCategory::Sports), &[true], 1.0);
    let old_id = tracker.profile().profile().id;
    drop(tracker);

    env.storage
        .backend()
        .put(keys::USER_PROFILE, "{not json")
        .unwrap();

    let tracker = env.open();
    let profile = tracker.profile().profile();
    assert_ne!(profile.id, old_id);
    assert_eq!(profile.total_points, 0);
    // Other blobs are untouched
    assert_eq!(tracker.quiz_history().len(), 1);
}

#[test]
fn test_history_limit_from_config() {
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Memory;
    config.history.limit = 3;

    let mut env = TestEnv::with_storage(config.open_storage(None).unwrap());
    env.config = config;
    let mut tracker = env.open();

    for category in [
        QuizCategory::Science,
        QuizCategory::History,
        QuizCategory::Arts,
        QuizCategory::Sports,
        QuizCategory::Literature,
    ] {
        play_quiz(&env, &mut tracker, quiz_with(1, category), &[true], 1.0);
    }

    let history = tracker.quiz_history();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].category, Some(QuizCategory::Arts));
    assert_eq!(history[2].category, Some(QuizCategory::Literature));
    assert_eq!(
        tracker.profile().profile().statistics.total_quizzes_completed,
        5
    );
}

#[test]
fn test_variety_unaffected_by_history_cap() {
    let mut config = Config::default();
    config.storage.backend = StorageBackend::Memory;
    config.history.limit = 1;

    let mut env = TestEnv::with_storage(config.open_storage(None).unwrap());
    env.config = config;
    let mut tracker = env.open();

    for _ in 0..3 {
        play_quiz(&env, &mut tracker, quiz_with(1, QuizCategory::Science), &[true], 1.0);
    }
    let variety = tracker
        .challenges()
        .challenges()
        .iter()
        .find(|c| c.kind == ChallengeType::Variety)
        .unwrap()
        .clone();
    assert_eq!(tracker.quiz_history().len(), 1);
    assert_eq!(variety.current_progress, 1);
    assert!(!variety.is_completed);

    // Same day, fresh process: Science is still remembered
    drop(tracker);
    let mut tracker = env.open();
    play_quiz(&env, &mut tracker, quiz_with(1, QuizCategory::Science), &[true], 1.0);
    play_quiz(&env, &mut tracker, quiz_with(1, QuizCategory::History), &[true], 1.0);
    let progress = tracker
        .challenges()
        .challenge(variety.id)
        .unwrap()
        .current_progress;
    assert_eq!(progress, 2);
}
