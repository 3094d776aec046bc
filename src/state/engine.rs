//! Stopwatch engine: timer state driven by a clock

use std::time::Duration;

use tracing::{debug, info};

use super::timer_state::{format_hms, TimerPhase, TimerState};
use crate::{
    clock::{Clock, SystemClock},
    error::ValidationError,
    validation::{validate_commit, ManualTime, TimeInput},
};

/// Owns the timer state and answers elapsed-time queries on demand.
///
/// The engine does no locking and schedules nothing; callers serialize
/// commands and poll `elapsed` at whatever cadence they render at.
#[derive(Debug, Clone)]
pub struct TimerEngine<C: Clock = SystemClock> {
    state: TimerState,
    clock: C,
}

impl TimerEngine<SystemClock> {
    /// Create an engine on the wall clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for TimerEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TimerEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            state: TimerState::new(),
            clock,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.phase()
    }

    /// Start from idle or resume from paused. No-op while running.
    pub fn start(&mut self) -> TimerPhase {
        let previous = self.state.phase();
        if self.state.start(self.clock.now()) {
            info!("Timer started ({:?} -> Running)", previous);
        } else {
            debug!("Start ignored, timer already running");
        }
        self.state.phase()
    }

    /// Pause a running timer. No-op in any other phase.
    pub fn pause(&mut self) -> TimerPhase {
        if self.state.pause(self.clock.now()) {
            info!(
                "Timer paused, banked {:.3}s",
                self.state.accumulated().as_secs_f64()
            );
        } else {
            debug!("Pause ignored in {:?} phase", self.state.phase());
        }
        self.state.phase()
    }

    /// Return to idle at zero from any phase
    pub fn reset(&mut self) -> TimerPhase {
        self.state.reset();
        info!("Timer reset");
        self.state.phase()
    }

    /// Validate and apply a manual starting time.
    ///
    /// On failure the timer is left untouched. On success returns the newly
    /// formatted display value.
    pub fn set_manual_time(
        &mut self,
        hours: impl Into<TimeInput>,
        minutes: impl Into<TimeInput>,
        seconds: impl Into<TimeInput>,
    ) -> Result<String, ValidationError> {
        let manual = validate_commit(&hours.into(), &minutes.into(), &seconds.into())?;
        Ok(self.apply_manual_time(manual))
    }

    /// Apply an already validated manual time.
    ///
    /// The phase does not change. While running, the live segment restarts
    /// now so the display jumps to exactly the entered value and keeps
    /// counting from there.
    pub fn apply_manual_time(&mut self, manual: ManualTime) -> String {
        let offset = Duration::from_secs(manual.total_seconds());
        self.state.set_base_offset(offset, self.clock.now());
        info!(
            "Manual time set to {}h {}m {}s in {:?} phase",
            manual.hours,
            manual.minutes,
            manual.seconds,
            self.state.phase()
        );
        self.formatted()
    }

    /// Total elapsed time
    pub fn elapsed_duration(&self) -> Duration {
        self.state.elapsed_at(self.clock.now())
    }

    /// Total elapsed seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed_duration().as_secs_f64()
    }

    /// Elapsed time formatted for display
    pub fn formatted(&self) -> String {
        format_hms(self.elapsed_duration())
    }
}
