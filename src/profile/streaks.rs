//! Daily streak tracking
//!
//! A streak counts consecutive local calendar days with a launch. It is
//! evaluated once per process start against the day of the last evaluation.

use chrono::{DateTime, Utc};

use crate::clock::days_between;
use crate::domain::UserProfile;

/// Outcome of a daily streak evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakChange {
    /// Same calendar day as the last evaluation
    Unchanged,
    /// Exactly one day later; streak grew by one
    Extended,
    /// Gap of more than one day; streak starts over at 1
    Restarted,
    /// The clock moved backwards; streak left as is
    ClockSkew,
}

impl StreakChange {
    /// True when the evaluation landed on a new calendar day
    pub fn is_new_day(&self) -> bool {
        matches!(self, Self::Extended | Self::Restarted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Extended => "extended",
            Self::Restarted => "restarted",
            Self::ClockSkew => "clock_skew",
        }
    }
}

/// Apply the daily streak transition for `now` to `profile`.
///
/// `last_active_date` and `updated_at` move to `now` in every case.
pub fn apply_daily_streak(profile: &mut UserProfile, now: DateTime<Utc>) -> StreakChange {
    let change = match days_between(profile.last_active_date, now) {
        0 => StreakChange::Unchanged,
        1 => {
            profile.streak += 1;
            StreakChange::Extended
        }
        d if d > 1 => {
            profile.streak = 1;
            StreakChange::Restarted
        }
        _ => StreakChange::ClockSkew,
    };

    // longest_streak >= streak holds after every transition, including a restart
    profile.longest_streak = profile.longest_streak.max(profile.streak);
    profile.last_active_date = now;
    profile.updated_at = now;

    change
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::local_noon;
    use chrono::{Duration, NaiveDate};

    fn profile_on(date: NaiveDate, streak: u32, longest: u32) -> UserProfile {
        let mut profile = UserProfile::new(local_noon(date));
        profile.streak = streak;
        profile.longest_streak = longest;
        profile
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    #[test]
    fn test_consecutive_day_extends() {
        let mut profile = profile_on(day(1), 4, 4);
        let change = apply_daily_streak(&mut profile, local_noon(day(2)));
        assert_eq!(change, StreakChange::Extended);
        assert_eq!(profile.streak, 5);
        assert_eq!(profile.longest_streak, 5);
    }

    #[test]
    fn test_gap_restarts_at_one() {
        let mut profile = profile_on(day(1), 9, 12);
        let change = apply_daily_streak(&mut profile, local_noon(day(5)));
        assert_eq!(change, StreakChange::Restarted);
        assert_eq!(profile.streak, 1);
        assert_eq!(profile.longest_streak, 12);
    }

    #[test]
    fn test_same_day_is_unchanged_but_touches_dates() {
        let mut profile = profile_on(day(1), 3, 3);
        let later = local_noon(day(1)) + Duration::hours(2);
        let change = apply_daily_streak(&mut profile, later);
        assert_eq!(change, StreakChange::Unchanged);
        assert_eq!(profile.streak, 3);
        assert_eq!(profile.last_active_date, later);
        assert_eq!(profile.updated_at, later);
    }

    #[test]
    fn test_clock_skew_is_noop_for_streak() {
        let mut profile = profile_on(day(10), 6, 8);
        let earlier = local_noon(day(7));
        let change = apply_daily_streak(&mut profile, earlier);
        assert_eq!(change, StreakChange::ClockSkew);
        assert_eq!(profile.streak, 6);
        assert_eq!(profile.longest_streak, 8);
        assert_eq!(profile.last_active_date, earlier);
    }

    #[test]
    fn test_restart_keeps_longest_at_least_streak() {
        let mut profile = profile_on(day(1), 0, 0);
        apply_daily_streak(&mut profile, local_noon(day(4)));
        assert_eq!(profile.streak, 1);
        assert_eq!(profile.longest_streak, 1);
    }
}
