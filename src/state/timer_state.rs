//! Timer state structure and elapsed-time accounting

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Lifecycle phase of the stopwatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Stopwatch state as a plain value.
///
/// `start_instant` is `Some` exactly while the phase is `Running`. Every
/// transition takes the current instant from the caller so the state itself
/// never reads a clock.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimerState {
    phase: TimerPhase,
    start_instant: Option<Instant>,
    accumulated: Duration,
    base_offset: Duration,
}

impl TimerState {
    /// Create an idle timer at zero
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// True once started and until reset, including while paused
    pub fn is_running(&self) -> bool {
        self.phase != TimerPhase::Idle
    }

    pub fn is_paused(&self) -> bool {
        self.phase == TimerPhase::Paused
    }

    /// True while the live segment is counting
    pub fn is_counting(&self) -> bool {
        self.start_instant.is_some()
    }

    pub fn start_instant(&self) -> Option<Instant> {
        self.start_instant
    }

    /// Time banked from completed run segments
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Manually injected starting value
    pub fn base_offset(&self) -> Duration {
        self.base_offset
    }

    /// Begin counting from idle or resume from paused.
    ///
    /// Returns false when already running.
    pub fn start(&mut self, now: Instant) -> bool {
        match self.phase {
            TimerPhase::Running => false,
            TimerPhase::Idle | TimerPhase::Paused => {
                self.phase = TimerPhase::Running;
                self.start_instant = Some(now);
                true
            }
        }
    }

    /// Bank the live segment and stop counting.
    ///
    /// Returns false unless the timer was running.
    pub fn pause(&mut self, now: Instant) -> bool {
        if self.phase != TimerPhase::Running {
            return false;
        }
        if let Some(started) = self.start_instant.take() {
            self.accumulated = self
                .accumulated
                .saturating_add(now.saturating_duration_since(started));
        }
        self.phase = TimerPhase::Paused;
        true
    }

    /// Return to idle at zero, clearing any manual offset
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Replace the starting offset and drop banked time.
    ///
    /// The phase is left alone. A running timer restarts its live segment at
    /// `now` so the next read shows exactly `offset`.
    pub fn set_base_offset(&mut self, offset: Duration, now: Instant) {
        self.base_offset = offset;
        self.accumulated = Duration::ZERO;
        if self.start_instant.is_some() {
            self.start_instant = Some(now);
        }
    }

    /// Total elapsed time as of `now`
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        let live = self
            .start_instant
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or_default();
        // Saturates rather than panicking near the largest manual offsets
        self.accumulated
            .saturating_add(self.base_offset)
            .saturating_add(live)
    }
}

/// Format a duration as `HH:MM:SS`, flooring to whole seconds.
///
/// Hours are padded to two digits and grow without wrapping.
pub fn format_hms(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
