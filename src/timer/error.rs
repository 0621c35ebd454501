//! Lap timer errors.

use crate::config::ConfigError;
use crate::core::RacePhase;
use thiserror::Error;

/// Errors raised by the lap timer.
///
/// `NotInitialized` is a defect in the calling code, not a runtime
/// condition to branch on: [`LapTimer::start`](super::LapTimer::start)
/// panics with it. [`LapTimer::try_start`](super::LapTimer::try_start)
/// hands it back for callers that prefer to check.
#[derive(Debug, Error)]
pub enum TimerError {
    #[error("Lap timer started while {phase}; call initialize first")]
    NotInitialized { phase: RacePhase },

    #[error("Invalid race configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
