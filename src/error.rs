//! Error types shared across the crate

use std::path::PathBuf;

use thiserror::Error;

use crate::validation::TimeField;

/// Manual time input rejected by the validator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} must contain digits only")]
    NonNumericInput(TimeField),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: TimeField, min: u64, max: u64 },
}

impl ValidationError {
    /// The field the failure belongs to
    pub fn field(&self) -> TimeField {
        match self {
            Self::NonNumericInput(field) => *field,
            Self::OutOfRange { field, .. } => *field,
        }
    }
}

/// Settings persistence failures
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Recovered inside `SettingsStore::load` by substituting defaults
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ini::Error,
    },

    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced by `AppState` to the HTTP layer
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to lock {0}")]
    LockPoisoned(&'static str),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
