//! Time source and calendar-day helpers
//!
//! Every engine reads the current time through a [`Clock`] so that date-driven
//! behavior (streaks, daily challenge rollover, session timing) can be driven
//! deterministically. Calendar-day comparisons always use the local time zone.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and simulations
///
/// Clones share the same instant, so a test can keep one handle and hand
/// another to the engines under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Clock pinned to local noon of the given date.
    ///
    /// Noon keeps a few hours of slack on both sides so that advancing by
    /// seconds or minutes never crosses a calendar-day boundary by accident.
    pub fn at_local_noon(date: NaiveDate) -> Self {
        Self::new(local_noon(date))
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = instant;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn advance_secs_f64(&self, secs: f64) {
        self.advance(Duration::milliseconds((secs * 1000.0).round() as i64));
    }

    pub fn advance_days(&self, days: i64) {
        self.advance(Duration::days(days));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Calendar day of an instant in the local time zone
pub fn local_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&Local).date_naive()
}

/// Whole calendar days from `earlier` to `later` (negative if `later` is before)
pub fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (local_day(later) - local_day(earlier)).num_days()
}

/// True when both instants fall on the same local calendar day
pub fn same_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    local_day(a) == local_day(b)
}

/// Seconds between two instants as a float, never negative
pub fn elapsed_secs(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let ms = (to - from).num_milliseconds().max(0);
    ms as f64 / 1000.0
}

/// Local noon of `date` as a UTC instant
pub fn local_noon(date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_hms_opt(12, 0, 0).unwrap_or_default();
    match naive.and_local_timezone(Local) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
        chrono::LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        chrono::LocalResult::None => naive.and_utc(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::at_local_noon(date(2026, 3, 10));
        let other = clock.clone();
        clock.advance(Duration::seconds(30));
        assert_eq!(clock.now(), other.now());
        assert_eq!(local_day(other.now()), date(2026, 3, 10));
    }

    #[test]
    fn test_days_between_uses_calendar_days() {
        let start = local_noon(date(2026, 3, 10));
        let next = local_noon(date(2026, 3, 11));
        assert_eq!(days_between(start, next), 1);
        assert_eq!(days_between(next, start), -1);
        assert_eq!(days_between(start, start + Duration::hours(3)), 0);
    }

    #[test]
    fn test_elapsed_secs_clamps_negative() {
        let t = local_noon(date(2026, 3, 10));
        assert_eq!(elapsed_secs(t, t + Duration::milliseconds(1500)), 1.5);
        assert_eq!(elapsed_secs(t + Duration::seconds(5), t), 0.0);
    }
}
