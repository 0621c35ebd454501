//! Read-only report of a race.

use crate::core::LapDuration;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Snapshot of a race ledger, taken with [`LapTimer::summary`](super::LapTimer::summary).
///
/// The snapshot does not follow later changes to the timer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceSummary {
    pub lap_count: u32,
    /// Completed laps, in order.
    pub laps: Vec<LapDuration>,
    pub has_bonus_checkpoint: bool,
    pub bonus_found: bool,
    /// The timer reached `Finished`, on the last lap or through `end`.
    pub finished: bool,
    pub started_at: Option<DateTime<Utc>>,
}

impl RaceSummary {
    /// Sum of all completed lap durations.
    pub fn total(&self) -> Duration {
        self.laps.iter().map(LapDuration::elapsed).sum()
    }

    /// Every configured lap has been recorded.
    pub fn all_laps_completed(&self) -> bool {
        self.lap_count > 0 && self.laps.len() == self.lap_count as usize
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(laps: &[u64], lap_count: u32) -> RaceSummary {
        RaceSummary {
            lap_count,
            laps: laps
                .iter()
                .map(|ms| LapDuration::from_elapsed(Duration::from_millis(*ms)))
                .collect(),
            has_bonus_checkpoint: false,
            bonus_found: false,
            finished: false,
            started_at: None,
        }
    }

    #[test]
    fn total_sums_laps() {
        let summary = summary(&[10_000, 15_000, 15_000], 3);
        assert_eq!(summary.total(), Duration::from_secs(40));
        assert!(summary.all_laps_completed());
    }

    #[test]
    fn partial_race_is_not_completed() {
        let summary = summary(&[10_000], 3);
        assert_eq!(summary.total(), Duration::from_secs(10));
        assert!(!summary.all_laps_completed());
    }

    #[test]
    fn empty_summary_totals_zero() {
        let summary = summary(&[], 0);
        assert_eq!(summary.total(), Duration::ZERO);
        assert!(!summary.all_laps_completed());
    }

    #[test]
    fn summary_exports_to_json() {
        let summary = summary(&[1_000, 2_000], 2);
        let json = summary.to_json().unwrap();
        let decoded: RaceSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, decoded);
    }
}
