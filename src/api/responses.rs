//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    settings::SettingsRecord,
    state::{CommandOutcome, TimerPhase},
    validation::{TimeField, TimeInput},
};

/// Response for timer commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub phase: TimerPhase,
    pub elapsed: String,
    pub timestamp: DateTime<Utc>,
}

impl From<CommandOutcome> for CommandResponse {
    fn from(outcome: CommandOutcome) -> Self {
        Self {
            phase: outcome.phase,
            elapsed: outcome.elapsed,
            timestamp: Utc::now(),
        }
    }
}

/// Body of POST /manual-time. Missing fields count as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualTimeRequest {
    pub hours: TimeInput,
    pub minutes: TimeInput,
    pub seconds: TimeInput,
}

/// Body of POST /validate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub field: TimeField,
    #[serde(default)]
    pub text: String,
}

/// Body of the settings setters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingValue<T> {
    pub value: T,
}

/// Response for GET /elapsed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElapsedResponse {
    pub elapsed: String,
    pub seconds: f64,
}

/// Full status report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub phase: TimerPhase,
    pub elapsed: String,
    pub elapsed_seconds: f64,
    pub accumulated_seconds: f64,
    pub base_offset_seconds: f64,
    pub errored_fields: Vec<TimeField>,
    pub settings: SettingsRecord,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Error body. Settings failures carry the in-memory record, which stays
/// valid even when the write did not land.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsRecord>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            settings: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_settings(mut self, settings: SettingsRecord) -> Self {
        self.settings = Some(settings);
        self
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
