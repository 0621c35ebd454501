//! Core race values.
//!
//! This module contains the plain data of a timed race:
//! - The phases of the lap timer via `RacePhase`
//! - Immutable, timestamped phase history
//! - Measured laps via `LapDuration`
//!
//! Nothing in here reads a clock or calls back into user code; the
//! lap timer feeds these values with timestamps it obtained itself.

mod history;
mod lap;
mod phase;

pub use history::{PhaseHistory, PhaseTransition};
pub use lap::LapDuration;
pub use phase::RacePhase;
