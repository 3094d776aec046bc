//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, watch};
use tracing::warn;

use super::{TimerEngine, TimerPhase};
use crate::{
    error::{AppError, SettingsError},
    settings::{FontSize, SettingsRecord, SettingsStore},
    validation::{ManualTimeValidator, TimeField, TimeInput, ValidationResult},
};

/// What the overlay should currently show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub text: String,
    pub phase: TimerPhase,
}

impl DisplaySnapshot {
    /// The initial reset render
    pub fn zero() -> Self {
        Self {
            text: "00:00:00".to_string(),
            phase: TimerPhase::Idle,
        }
    }
}

/// Result of a timer command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub phase: TimerPhase,
    pub elapsed: String,
}

/// Point-in-time view of the timer for status reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub elapsed: String,
    pub elapsed_seconds: f64,
    pub accumulated_seconds: f64,
    pub base_offset_seconds: f64,
}

/// Shared application state. The mutexes serialize every command so the
/// engine and the settings store never see concurrent callers.
#[derive(Debug)]
pub struct AppState {
    pub engine: Arc<Mutex<TimerEngine>>,
    pub validator: Arc<Mutex<ManualTimeValidator>>,
    pub settings: Arc<Mutex<SettingsStore>>,
    /// Display refresh cadence while running
    pub tick_interval: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Phase change notifications for the display ticker
    pub phase_change_tx: broadcast::Sender<TimerPhase>,
    /// Latest rendered display value
    pub display_tx: watch::Sender<DisplaySnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _display_rx: watch::Receiver<DisplaySnapshot>,
}

impl AppState {
    pub fn new(port: u16, host: String, settings: SettingsStore, tick_interval: Duration) -> Self {
        let (phase_change_tx, _) = broadcast::channel(100);
        let (display_tx, display_rx) = watch::channel(DisplaySnapshot::zero());

        Self {
            engine: Arc::new(Mutex::new(TimerEngine::new())),
            validator: Arc::new(Mutex::new(ManualTimeValidator::new())),
            settings: Arc::new(Mutex::new(settings)),
            tick_interval,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            phase_change_tx,
            display_tx,
            _display_rx: display_rx,
        }
    }

    /// Run a command against the engine, then record it and notify listeners
    fn command<F>(&self, action: &str, apply: F) -> Result<CommandOutcome, AppError>
    where
        F: FnOnce(&mut TimerEngine),
    {
        let mut engine = self.engine.lock()
            .map_err(|_| AppError::LockPoisoned("timer engine"))?;

        apply(&mut *engine);
        let outcome = CommandOutcome {
            phase: engine.phase(),
            elapsed: engine.formatted(),
        };
        drop(engine); // Release the lock early

        self.record_action(action);
        self.publish_display(DisplaySnapshot {
            text: outcome.elapsed.clone(),
            phase: outcome.phase,
        });

        if let Err(e) = self.phase_change_tx.send(outcome.phase) {
            // No ticker subscribed, e.g. in tests
            warn!("Failed to send phase change notification: {}", e);
        }

        Ok(outcome)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    pub fn start(&self) -> Result<CommandOutcome, AppError> {
        self.command("start", |engine| {
            engine.start();
        })
    }

    pub fn pause(&self) -> Result<CommandOutcome, AppError> {
        self.command("pause", |engine| {
            engine.pause();
        })
    }

    pub fn reset(&self) -> Result<CommandOutcome, AppError> {
        self.command("reset", |engine| {
            engine.reset();
        })
    }

    /// Commit a manual time. Validation failures leave the engine untouched.
    pub fn set_manual_time(
        &self,
        hours: &TimeInput,
        minutes: &TimeInput,
        seconds: &TimeInput,
    ) -> Result<CommandOutcome, AppError> {
        let manual = self.validator.lock()
            .map_err(|_| AppError::LockPoisoned("validator"))?
            .commit(hours, minutes, seconds)?;

        self.command("manual-time", |engine| {
            engine.apply_manual_time(manual);
        })
    }

    /// Per-keystroke validation of one field
    pub fn validate_field(&self, field: TimeField, text: &str) -> Result<ValidationResult, AppError> {
        let mut validator = self.validator.lock()
            .map_err(|_| AppError::LockPoisoned("validator"))?;
        Ok(validator.check(field, text))
    }

    pub fn errored_fields(&self) -> Result<Vec<TimeField>, AppError> {
        self.validator.lock()
            .map(|v| v.errored_fields())
            .map_err(|_| AppError::LockPoisoned("validator"))
    }

    /// Read the timer without changing it
    pub fn timer_snapshot(&self) -> Result<TimerSnapshot, AppError> {
        let engine = self.engine.lock()
            .map_err(|_| AppError::LockPoisoned("timer engine"))?;
        let elapsed = engine.elapsed_duration();

        Ok(TimerSnapshot {
            phase: engine.phase(),
            elapsed: super::format_hms(elapsed),
            elapsed_seconds: elapsed.as_secs_f64(),
            accumulated_seconds: engine.state().accumulated().as_secs_f64(),
            base_offset_seconds: engine.state().base_offset().as_secs_f64(),
        })
    }

    /// Publish a new display value to watchers
    pub fn publish_display(&self, snapshot: DisplaySnapshot) {
        self.display_tx.send_replace(snapshot);
    }

    pub fn get_display(&self) -> DisplaySnapshot {
        self.display_tx.borrow().clone()
    }

    pub fn get_settings(&self) -> Result<SettingsRecord, AppError> {
        self.settings.lock()
            .map(|store| store.record().clone())
            .map_err(|_| AppError::LockPoisoned("settings"))
    }

    /// Apply a settings mutation and persist it
    fn update_settings<F>(&self, action: &str, update: F) -> Result<SettingsRecord, AppError>
    where
        F: FnOnce(&mut SettingsStore) -> Result<(), SettingsError>,
    {
        let mut store = self.settings.lock()
            .map_err(|_| AppError::LockPoisoned("settings"))?;

        let result = update(&mut *store);
        self.record_action(action);
        result?;

        Ok(store.record().clone())
    }

    pub fn set_font(&self, font: String) -> Result<SettingsRecord, AppError> {
        self.update_settings("font", |store| store.set_font(font))
    }

    pub fn set_font_size(&self, size: FontSize) -> Result<SettingsRecord, AppError> {
        self.update_settings("font-size", |store| store.set_font_size(size))
    }

    pub fn set_text_color(&self, color: String) -> Result<SettingsRecord, AppError> {
        self.update_settings("text-color", |store| store.set_text_color(color))
    }

    pub fn set_background_color(&self, color: String) -> Result<SettingsRecord, AppError> {
        self.update_settings("bg-color", |store| store.set_background_color(color))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
