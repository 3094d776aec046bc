//! Neko Stopwatch - the core of a chroma-keyable stopwatch overlay
//!
//! This library provides the timer state machine and its elapsed-time
//! accounting, validation for manually entered times, persisted appearance
//! settings, and an HTTP surface a rendering front end drives it through.

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod settings;
pub mod state;
pub mod tasks;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use api::create_router;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{AppError, SettingsError, ValidationError};
pub use settings::{SettingsRecord, SettingsStore};
pub use state::{AppState, TimerEngine, TimerPhase};
pub use utils::signals::shutdown_signal;
pub use validation::{ManualTimeValidator, TimeField, TimeInput, ValidationResult};
