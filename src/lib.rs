//! Lapcount: lap timing for checkpoint-instrumented toy raceways
//!
//! A vehicle crosses checkpoints embedded in the track and a wireless link
//! reports each crossing as a single key. Lapcount turns that stream into
//! per-lap durations, detects the end of the race and records whether the
//! optional bonus checkpoint was found.
//!
//! # Core Concepts
//!
//! - **Checkpoint keys**: two reserved keys, one for laps and one for the
//!   bonus checkpoint, classified by `CheckpointKeys`
//! - **Lap timer**: a single-owner state machine driven by `initialize`,
//!   `start`, `check_passed` and `end`
//! - **Observers**: callbacks notified synchronously after every change
//!
//! # Example
//!
//! ```rust
//! use lapcount::{CheckOutcome, CheckpointKeys, LapTimer, ManualClock};
//!
//! let clock = ManualClock::default();
//! let mut timer = LapTimer::with_clock(CheckpointKeys::default(), clock.clone());
//!
//! timer.initialize(3, true).unwrap();
//! timer.start();
//!
//! clock.advance_millis(10_000);
//! assert_eq!(timer.check_passed('C'), CheckOutcome::LapCompleted);
//! assert_eq!(timer.check_passed('K'), CheckOutcome::BonusAccepted);
//! clock.advance_millis(15_000);
//! assert_eq!(timer.check_passed('C'), CheckOutcome::LapCompleted);
//! clock.advance_millis(15_000);
//! assert_eq!(timer.check_passed('C'), CheckOutcome::RaceFinished);
//!
//! let summary = timer.summary();
//! assert_eq!(summary.total().as_secs(), 40);
//! assert!(summary.bonus_found);
//! ```

pub mod checkpoint;
pub mod clock;
pub mod config;
pub mod core;
pub mod notify;
pub mod timer;

// Re-export commonly used types
pub use checkpoint::{CheckpointKey, CheckpointKeys, CheckpointKind};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, RaceConfig};
pub use crate::core::{LapDuration, PhaseHistory, PhaseTransition, RacePhase};
pub use notify::{ChangeNotifier, Subscription};
pub use timer::{CheckOutcome, LapTimer, RaceSummary, TimerError};
