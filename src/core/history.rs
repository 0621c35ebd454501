//! Race phase history tracking.
//!
//! Keeps an immutable, timestamped record of the phases a race went
//! through, so a finished race can report when it was set up, started
//! and ended.

use super::phase::RacePhase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single phase change.
///
/// # Example
///
/// ```rust
/// use lapcount::core::{PhaseTransition, RacePhase};
/// use chrono::Utc;
///
/// let transition = PhaseTransition {
///     from: RacePhase::Initialized,
///     to: RacePhase::Running,
///     timestamp: Utc::now(),
/// };
/// assert!(transition.to.accepts_checkpoints());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseTransition {
    /// The phase being left
    pub from: RacePhase,
    /// The phase being entered
    pub to: RacePhase,
    /// Clock reading at the moment of the change
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of phase changes for one race.
///
/// History is immutable - `record` returns a new history with the
/// transition appended.
///
/// # Example
///
/// ```rust
/// use lapcount::core::{PhaseHistory, PhaseTransition, RacePhase};
/// use chrono::{Duration, Utc};
///
/// let start = Utc::now();
/// let history = PhaseHistory::new()
///     .record(PhaseTransition {
///         from: RacePhase::Initialized,
///         to: RacePhase::Running,
///         timestamp: start,
///     })
///     .record(PhaseTransition {
///         from: RacePhase::Running,
///         to: RacePhase::Finished,
///         timestamp: start + Duration::seconds(40),
///     });
///
/// assert_eq!(
///     history.get_path(),
///     vec![&RacePhase::Initialized, &RacePhase::Running, &RacePhase::Finished]
/// );
/// assert_eq!(history.duration(), Some(std::time::Duration::from_secs(40)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseHistory {
    transitions: Vec<PhaseTransition>,
}

impl PhaseHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// The existing history is left untouched.
    pub fn record(&self, transition: PhaseTransition) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Get the path of phases traversed.
    ///
    /// Returns the `from` phase of the first transition followed by the
    /// `to` phase of every transition.
    pub fn get_path(&self) -> Vec<&RacePhase> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and the last recorded transition.
    ///
    /// Returns `None` for an empty history. A clock that went backwards
    /// yields `None` rather than a negative span.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.transitions.first()?, self.transitions.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Timestamp of the first transition into `phase`, if any.
    pub fn entered_at(&self, phase: RacePhase) -> Option<DateTime<Utc>> {
        self.transitions
            .iter()
            .find(|t| t.to == phase)
            .map(|t| t.timestamp)
    }

    /// Get all transitions in recording order.
    pub fn transitions(&self) -> &[PhaseTransition] {
        &self.transitions
    }
}
