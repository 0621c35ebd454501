//! The lap timer state machine.
//!
//! # Key Concepts
//!
//! - **Phases**: `Uninitialized -> Initialized -> Running -> Finished`
//! - **Crossings**: each checkpoint key is classified and applied as one
//!   synchronous transition, yielding a [`CheckOutcome`]
//! - **Observers**: every state change is announced to subscribers before
//!   the mutating call returns
//!
//! The timer is not internally synchronized. Delivering crossings from
//! several threads requires wrapping it in a mutex owned by the caller.

mod error;
mod machine;
mod outcome;
mod summary;

pub use error::TimerError;
pub use machine::LapTimer;
pub use outcome::CheckOutcome;
pub use summary::RaceSummary;
