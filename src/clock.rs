//! Clock sources for the lap timer.
//!
//! The timer reads the clock synchronously on `start` and on every lap
//! completion. Lap durations are only meaningful if the clock never goes
//! backwards between those reads.

use chrono::{DateTime, SubsecRound, Utc};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Source of absolute timestamps.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock, truncated to millisecond resolution.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same reading, so a test (or a replay of a recorded
/// session) can hand one clone to the timer and advance the other.
///
/// # Example
///
/// ```rust
/// use lapcount::clock::{Clock, ManualClock};
/// use std::time::Duration;
///
/// let clock = ManualClock::default();
/// let handle = clock.clone();
/// let before = clock.now();
///
/// handle.advance(Duration::from_secs(10));
/// assert_eq!((clock.now() - before).num_seconds(), 10);
/// ```
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Jump to an absolute time. Moving backwards is allowed but produces
    /// zero-length laps.
    pub fn set(&self, time: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = time;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        let advanced = chrono::Duration::from_std(by)
            .ok()
            .and_then(|by| now.checked_add_signed(by))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        *now = advanced;
    }

    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Default for ManualClock {
    /// Starts at the Unix epoch.
    fn default() -> Self {
        Self::new(DateTime::<Utc>::default())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_has_millisecond_resolution() {
        let now = SystemClock.now();
        assert_eq!(now.timestamp_subsec_nanos() % 1_000_000, 0);
    }

    #[test]
    fn system_clock_does_not_go_backwards() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(second >= first);
    }

    #[test]
    fn manual_clock_starts_at_epoch() {
        assert_eq!(ManualClock::default().now(), DateTime::<Utc>::default());
    }

    #[test]
    fn clones_share_the_reading() {
        let clock = ManualClock::default();
        let handle = clock.clone();

        handle.advance_millis(1_500);

        assert_eq!(clock.now().timestamp_millis(), 1_500);
    }

    #[test]
    fn set_jumps_to_absolute_time() {
        let clock = ManualClock::default();
        let target = DateTime::<Utc>::default() + chrono::Duration::hours(1);

        clock.set(target);

        assert_eq!(clock.now(), target);
    }
}
