//! State management module
//!
//! This module contains the timer state, the engine that drives it, and the
//! shared application state the HTTP layer works against.

pub mod app_state;
pub mod engine;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, CommandOutcome, DisplaySnapshot, TimerSnapshot};
pub use engine::TimerEngine;
pub use timer_state::{format_hms, TimerPhase, TimerState};
