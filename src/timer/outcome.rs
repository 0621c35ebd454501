//! Result of feeding one checkpoint crossing to the lap timer.

use serde::{Deserialize, Serialize};

/// What a single `check_passed` call did.
///
/// Callers map each variant to distinct feedback (sound, animation).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum CheckOutcome {
    /// A lap was recorded and more laps remain.
    LapCompleted,
    /// The last lap was recorded; the race is over.
    RaceFinished,
    /// The bonus checkpoint was crossed and this race counts it.
    BonusAccepted,
    /// The bonus checkpoint was crossed but this race has none configured.
    BonusRejected,
    /// Unreserved key, or the timer was not running.
    Ignored,
}

impl CheckOutcome {
    /// Whether the crossing changed race state.
    pub fn changed_state(&self) -> bool {
        matches!(
            self,
            Self::LapCompleted | Self::RaceFinished | Self::BonusAccepted
        )
    }
}
