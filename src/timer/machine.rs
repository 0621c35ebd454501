//! Lap timer that turns checkpoint crossings into lap durations.

use crate::checkpoint::{CheckpointKey, CheckpointKeys, CheckpointKind};
use crate::clock::{Clock, SystemClock};
use crate::config::RaceConfig;
use crate::core::{LapDuration, PhaseHistory, PhaseTransition, RacePhase};
use crate::notify::{ChangeNotifier, Subscription};
use crate::timer::error::TimerError;
use crate::timer::outcome::CheckOutcome;
use crate::timer::summary::RaceSummary;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::fmt;

/// Owns the progress of one race at a time.
///
/// # Example
///
/// ```rust
/// use lapcount::checkpoint::CheckpointKeys;
/// use lapcount::clock::ManualClock;
/// use lapcount::timer::{CheckOutcome, LapTimer};
///
/// let clock = ManualClock::default();
/// let mut timer = LapTimer::with_clock(CheckpointKeys::default(), clock.clone());
///
/// timer.initialize(2, false).unwrap();
/// timer.start();
///
/// clock.advance_millis(12_000);
/// assert_eq!(timer.check_passed('C'), CheckOutcome::LapCompleted);
/// clock.advance_millis(11_500);
/// assert_eq!(timer.check_passed('C'), CheckOutcome::RaceFinished);
///
/// assert!(!timer.is_running());
/// let laps: Vec<u128> = timer.lap_durations().map(|lap| lap.as_millis()).collect();
/// assert_eq!(laps, vec![12_000, 11_500]);
/// ```
pub struct LapTimer {
    keys: CheckpointKeys,
    clock: Box<dyn Clock>,
    phase: RacePhase,
    config: Option<RaceConfig>,
    current_lap: u32,
    lap_durations: Vec<LapDuration>,
    last_checkpoint_time: Option<DateTime<Utc>>,
    bonus_found: bool,
    history: PhaseHistory,
    notifier: ChangeNotifier<LapTimer>,
}

impl LapTimer {
    /// Create an uninitialized timer reading the wall clock.
    pub fn new(keys: CheckpointKeys) -> Self {
        Self::with_clock(keys, SystemClock)
    }

    /// Create an uninitialized timer reading the given clock.
    pub fn with_clock(keys: CheckpointKeys, clock: impl Clock + 'static) -> Self {
        Self {
            keys,
            clock: Box::new(clock),
            phase: RacePhase::Uninitialized,
            config: None,
            current_lap: 0,
            lap_durations: Vec::new(),
            last_checkpoint_time: None,
            bonus_found: false,
            history: PhaseHistory::new(),
            notifier: ChangeNotifier::new(),
        }
    }

    /// Set up a fresh race, discarding everything about the previous one.
    ///
    /// Subscriptions are kept. A zero lap count is rejected and leaves the
    /// timer untouched.
    pub fn initialize(
        &mut self,
        lap_count: u32,
        has_bonus_checkpoint: bool,
    ) -> Result<(), TimerError> {
        self.initialize_with(RaceConfig {
            lap_count,
            has_bonus_checkpoint,
        })
    }

    pub fn initialize_with(&mut self, config: RaceConfig) -> Result<(), TimerError> {
        config.validate()?;

        let now = self.clock.now();
        self.config = Some(config);
        self.current_lap = 0;
        self.lap_durations = Vec::new();
        self.last_checkpoint_time = None;
        self.bonus_found = false;
        self.history = PhaseHistory::new();
        self.transition_to(RacePhase::Initialized, now);

        debug!(
            "Race initialized: {} laps, bonus checkpoint {}",
            config.lap_count,
            if config.has_bonus_checkpoint { "on" } else { "off" }
        );

        self.notify_observers();
        Ok(())
    }

    /// Start the race clock.
    ///
    /// # Panics
    ///
    /// Panics if the timer is not initialized (never initialized, or
    /// already ended). That is a wiring bug in the caller; see
    /// [`try_start`](Self::try_start) for the checked form.
    pub fn start(&mut self) {
        if let Err(err) = self.try_start() {
            panic!("{err}");
        }
    }

    /// Start the race clock, or report why it cannot start.
    ///
    /// Nothing is modified on error. Starting a running race again resets
    /// the reference time of the lap in progress. Observers are not
    /// notified.
    pub fn try_start(&mut self) -> Result<(), TimerError> {
        if !self.phase.is_initialized() {
            return Err(TimerError::NotInitialized { phase: self.phase });
        }
        if self.phase == RacePhase::Running {
            warn!(
                "Race restarted on lap {}; lap reference time reset",
                self.current_lap
            );
        }

        let now = self.clock.now();
        self.last_checkpoint_time = Some(now);
        self.transition_to(RacePhase::Running, now);
        info!("Race started with {} laps", self.lap_count());
        Ok(())
    }

    /// Apply one checkpoint crossing.
    ///
    /// Observers are notified exactly once before this returns, whatever
    /// the outcome. Crossings while the race is not running are ignored.
    pub fn check_passed(&mut self, key: impl Into<CheckpointKey>) -> CheckOutcome {
        let key = key.into();

        let outcome = if self.phase.accepts_checkpoints() {
            let outcome = match self.keys.classify(key) {
                CheckpointKind::LapCompletion => self.complete_lap(),
                CheckpointKind::BonusCheckpoint => self.pass_bonus_checkpoint(),
                CheckpointKind::Unrecognized => CheckOutcome::Ignored,
            };
            if !outcome.changed_state() {
                debug!("Checkpoint {key} left the race unchanged ({outcome:?})");
            }
            outcome
        } else {
            warn!("Checkpoint {key} ignored: race is {}", self.phase);
            CheckOutcome::Ignored
        };

        self.notify_observers();
        outcome
    }

    /// Apply a sequence of crossings in order, e.g. a recorded session.
    pub fn feed<I, K>(&mut self, keys: I) -> Vec<CheckOutcome>
    where
        I: IntoIterator<Item = K>,
        K: Into<CheckpointKey>,
    {
        keys.into_iter().map(|key| self.check_passed(key)).collect()
    }

    /// End the race. The lap ledger stays readable until the next
    /// `initialize`.
    ///
    /// Calling this on a timer that is not initialized does nothing.
    pub fn end(&mut self) {
        if !self.phase.is_initialized() {
            return;
        }
        let now = self.clock.now();
        self.finish(now);
        self.notify_observers();
    }

    fn complete_lap(&mut self) -> CheckOutcome {
        let (Some(config), Some(previous)) = (self.config, self.last_checkpoint_time) else {
            return CheckOutcome::Ignored;
        };

        let now = self.clock.now();
        let lap = LapDuration::between(previous, now);
        self.lap_durations.push(lap);
        self.last_checkpoint_time = Some(now);
        self.current_lap += 1;
        debug!(
            "Lap {}/{} completed in {lap}",
            self.current_lap, config.lap_count
        );

        if self.current_lap == config.lap_count {
            self.finish(now);
            CheckOutcome::RaceFinished
        } else {
            CheckOutcome::LapCompleted
        }
    }

    fn pass_bonus_checkpoint(&mut self) -> CheckOutcome {
        if !self.has_bonus_checkpoint() {
            return CheckOutcome::BonusRejected;
        }
        if !self.bonus_found {
            debug!("Bonus checkpoint found on lap {}", self.current_lap);
        }
        self.bonus_found = true;
        CheckOutcome::BonusAccepted
    }

    fn finish(&mut self, at: DateTime<Utc>) {
        self.transition_to(RacePhase::Finished, at);

        info!(
            "Race finished after {}/{} laps",
            self.current_lap,
            self.lap_count()
        );
        for (index, lap) in self.lap_durations().enumerate() {
            info!("Lap {index}: {lap}");
        }
        info!("Bonus checkpoint found: {}", self.bonus_found);
    }

    fn transition_to(&mut self, to: RacePhase, at: DateTime<Utc>) {
        self.history = self.history.record(PhaseTransition {
            from: self.phase,
            to,
            timestamp: at,
        });
        self.phase = to;
    }

    fn notify_observers(&mut self) {
        let notifier = std::mem::take(&mut self.notifier);
        let mut guard = NotifierGuard {
            timer: self,
            notifier,
        };
        guard.notifier.notify(&*guard.timer);
    }

    /// Register a callback run after every state change.
    ///
    /// The callback receives the timer itself and should query what it
    /// needs. It stays registered across races until unsubscribed.
    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&LapTimer) + Send + 'static,
    {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.notifier.unsubscribe(subscription)
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn is_initialized(&self) -> bool {
        self.phase.is_initialized()
    }

    pub fn is_running(&self) -> bool {
        self.phase.accepts_checkpoints()
    }

    pub fn has_bonus_checkpoint(&self) -> bool {
        self.config.is_some_and(|c| c.has_bonus_checkpoint)
    }

    pub fn is_bonus_found(&self) -> bool {
        self.bonus_found
    }

    /// Laps required to finish; zero before the first `initialize`.
    pub fn lap_count(&self) -> u32 {
        self.config.map_or(0, |c| c.lap_count)
    }

    /// Laps fully completed so far.
    pub fn current_lap(&self) -> u32 {
        self.current_lap
    }

    /// Completed laps in order. Each call starts a fresh iteration.
    pub fn lap_durations(&self) -> impl Iterator<Item = LapDuration> + '_ {
        self.lap_durations.iter().copied()
    }

    pub fn last_checkpoint_time(&self) -> Option<DateTime<Utc>> {
        self.last_checkpoint_time
    }

    pub fn config(&self) -> Option<RaceConfig> {
        self.config
    }

    pub fn keys(&self) -> &CheckpointKeys {
        &self.keys
    }

    /// Phase changes of the current race.
    pub fn history(&self) -> &PhaseHistory {
        &self.history
    }

    pub fn summary(&self) -> RaceSummary {
        RaceSummary {
            lap_count: self.lap_count(),
            laps: self.lap_durations().collect(),
            has_bonus_checkpoint: self.has_bonus_checkpoint(),
            bonus_found: self.bonus_found,
            finished: self.phase.is_final(),
            started_at: self.history.entered_at(RacePhase::Running),
        }
    }
}

/// Puts the notifier back into the timer once callbacks are done, even
/// when one of them panics.
struct NotifierGuard<'a> {
    timer: &'a mut LapTimer,
    notifier: ChangeNotifier<LapTimer>,
}

impl Drop for NotifierGuard<'_> {
    fn drop(&mut self) {
        self.timer.notifier = std::mem::take(&mut self.notifier);
    }
}

impl fmt::Debug for LapTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LapTimer")
            .field("keys", &self.keys)
            .field("phase", &self.phase)
            .field("config", &self.config)
            .field("current_lap", &self.current_lap)
            .field("bonus_found", &self.bonus_found)
            .field("notifier", &self.notifier)
            .finish()
    }
}
