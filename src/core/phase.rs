//! Phases of the lap timer.
//!
//! A race moves `Uninitialized -> Initialized -> Running -> Finished`.
//! Each `initialize` call starts a fresh race from `Initialized`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the lap timer currently is in its race lifecycle.
///
/// # Example
///
/// ```rust
/// use lapcount::core::RacePhase;
///
/// assert!(!RacePhase::Uninitialized.is_initialized());
/// assert!(RacePhase::Initialized.is_initialized());
/// assert!(RacePhase::Running.accepts_checkpoints());
/// assert!(RacePhase::Finished.is_final());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum RacePhase {
    /// No race has been configured yet.
    #[default]
    Uninitialized,
    /// A race is configured but the clock has not been started.
    Initialized,
    /// The clock is running and checkpoints are being counted.
    Running,
    /// The race ended, either on its last lap or explicitly.
    Finished,
}

impl RacePhase {
    /// Get the phase name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Initialized => "Initialized",
            Self::Running => "Running",
            Self::Finished => "Finished",
        }
    }

    /// True between `initialize` and `end`.
    ///
    /// This is the precondition of `start`.
    pub fn is_initialized(&self) -> bool {
        matches!(self, Self::Initialized | Self::Running)
    }

    /// True between `start` and `end`.
    pub fn accepts_checkpoints(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Check if this is the terminal phase of a race.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for RacePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_name_returns_correct_value() {
        assert_eq!(RacePhase::Uninitialized.name(), "Uninitialized");
        assert_eq!(RacePhase::Initialized.name(), "Initialized");
        assert_eq!(RacePhase::Running.name(), "Running");
        assert_eq!(RacePhase::Finished.name(), "Finished");
    }

    #[test]
    fn only_configured_phases_are_initialized() {
        assert!(!RacePhase::Uninitialized.is_initialized());
        assert!(RacePhase::Initialized.is_initialized());
        assert!(RacePhase::Running.is_initialized());
        assert!(!RacePhase::Finished.is_initialized());
    }

    #[test]
    fn only_running_accepts_checkpoints() {
        assert!(!RacePhase::Uninitialized.accepts_checkpoints());
        assert!(!RacePhase::Initialized.accepts_checkpoints());
        assert!(RacePhase::Running.accepts_checkpoints());
        assert!(!RacePhase::Finished.accepts_checkpoints());
    }

    #[test]
    fn finished_is_the_only_final_phase() {
        assert!(RacePhase::Finished.is_final());
        assert!(!RacePhase::Running.is_final());
        assert!(!RacePhase::Initialized.is_final());
        assert!(!RacePhase::Uninitialized.is_final());
    }

    #[test]
    fn default_phase_is_uninitialized() {
        assert_eq!(RacePhase::default(), RacePhase::Uninitialized);
    }

    #[test]
    fn phase_serializes_correctly() {
        let phase = RacePhase::Running;
        let json = serde_json::to_string(&phase).unwrap();
        assert_eq!(json, "\"Running\"");
        let deserialized: RacePhase = serde_json::from_str(&json).unwrap();
        assert_eq!(phase, deserialized);
    }
}
