//! A single measured lap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One completed lap: how long it took and when it was closed.
///
/// Lap durations are immutable once created. `elapsed` is never negative:
/// if the clock reported an earlier time for the closing checkpoint than
/// for the previous one, the lap is recorded as zero length.
///
/// # Example
///
/// ```rust
/// use lapcount::core::LapDuration;
/// use chrono::{Duration, Utc};
///
/// let start = Utc::now();
/// let lap = LapDuration::between(start, start + Duration::milliseconds(15_250));
///
/// assert_eq!(lap.as_millis(), 15_250);
/// assert_eq!(lap.to_string(), "0:15.250");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapDuration {
    elapsed: Duration,
    closed_at: Option<DateTime<Utc>>,
}

impl LapDuration {
    /// Measure a lap from the previous checkpoint to the closing one.
    pub fn between(previous: DateTime<Utc>, closed_at: DateTime<Utc>) -> Self {
        let elapsed = closed_at
            .signed_duration_since(previous)
            .to_std()
            .unwrap_or(Duration::ZERO);
        Self {
            elapsed,
            closed_at: Some(closed_at),
        }
    }

    /// A lap with a known length but no absolute end time.
    pub fn from_elapsed(elapsed: Duration) -> Self {
        Self {
            elapsed,
            closed_at: None,
        }
    }

    /// Time since the previous checkpoint (or race start for lap 0).
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Absolute time of the checkpoint that closed this lap.
    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    pub fn as_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

impl fmt::Display for LapDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let millis = self.elapsed.as_millis();
        let minutes = millis / 60_000;
        let seconds = (millis / 1_000) % 60;
        let rest = millis % 1_000;
        write!(f, "{minutes}:{seconds:02}.{rest:03}")
    }
}
