//! Manual time input validation
//!
//! Two modes share the same rules. Incremental validation runs on every
//! keystroke for a single field and treats an empty field as pending. Commit
//! validation runs when a value is accepted into the timer and treats an
//! empty field as zero.

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;

/// Largest hours value that can be committed on its own; the total with
/// minutes and seconds must also fit in a `u64`
pub const MAX_HOURS: u64 = u64::MAX / 3600;
/// Upper bound for the minutes and seconds fields
pub const MAX_MINUTES_SECONDS: u64 = 59;

const MSG_NON_NUMERIC: &str = "Enter numbers only";
const MSG_MINUTES_SECONDS_RANGE: &str = "Minutes/Seconds must be 0-59";
const MSG_HOURS_RANGE: &str = "Hours value is too large";
const MSG_INVALID: &str = "Invalid input";

/// One of the three manual time entry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
}

impl TimeField {
    pub const ALL: [TimeField; 3] = [TimeField::Hours, TimeField::Minutes, TimeField::Seconds];

    fn index(self) -> usize {
        match self {
            TimeField::Hours => 0,
            TimeField::Minutes => 1,
            TimeField::Seconds => 2,
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeField::Hours => "hours",
            TimeField::Minutes => "minutes",
            TimeField::Seconds => "seconds",
        };
        f.write_str(name)
    }
}

/// Outcome of validating one field, ready for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub field: TimeField,
    pub message: String,
}

impl ValidationResult {
    /// A passing result for the field
    pub fn valid(field: TimeField) -> Self {
        Self {
            ok: true,
            field,
            message: String::new(),
        }
    }

    /// A per-keystroke failure with a field specific message
    pub fn from_error(error: &ValidationError) -> Self {
        let message = match error {
            ValidationError::NonNumericInput(_) => MSG_NON_NUMERIC,
            ValidationError::OutOfRange {
                field: TimeField::Hours,
                ..
            } => MSG_HOURS_RANGE,
            ValidationError::OutOfRange { .. } => MSG_MINUTES_SECONDS_RANGE,
        };
        Self {
            ok: false,
            field: error.field(),
            message: message.to_string(),
        }
    }

    /// The generic failure reported when a commit is rejected
    pub fn invalid_commit(error: &ValidationError) -> Self {
        Self {
            ok: false,
            field: error.field(),
            message: MSG_INVALID.to_string(),
        }
    }
}

/// Raw field value as typed by the user or sent by a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeInput {
    Number(u64),
    Text(String),
    /// Negative or fractional numbers, booleans and the like. `null` counts
    /// as an empty field, anything else fails as non-numeric.
    Other(serde_json::Value),
}

impl TimeInput {
    fn as_text(&self) -> Cow<'_, str> {
        match self {
            TimeInput::Number(n) => Cow::Owned(n.to_string()),
            TimeInput::Text(s) => Cow::Borrowed(s.trim()),
            TimeInput::Other(serde_json::Value::Null) => Cow::Borrowed(""),
            TimeInput::Other(value) => Cow::Owned(value.to_string()),
        }
    }
}

impl Default for TimeInput {
    fn default() -> Self {
        TimeInput::Text(String::new())
    }
}

impl From<u64> for TimeInput {
    fn from(value: u64) -> Self {
        TimeInput::Number(value)
    }
}

impl From<&str> for TimeInput {
    fn from(value: &str) -> Self {
        TimeInput::Text(value.to_string())
    }
}

impl From<String> for TimeInput {
    fn from(value: String) -> Self {
        TimeInput::Text(value)
    }
}

/// A committed manual time value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManualTime {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl ManualTime {
    /// Total seconds, or `None` when it does not fit in a `u64`
    pub fn checked_total_seconds(&self) -> Option<u64> {
        self.hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)
    }

    /// Total seconds, saturating at `u64::MAX`
    pub fn total_seconds(&self) -> u64 {
        self.checked_total_seconds().unwrap_or(u64::MAX)
    }
}

/// Validate a single field as the user types
pub fn validate_incremental(field: TimeField, text: &str) -> Result<(), ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(());
    }
    check_digits(field, text)?;
    match field {
        // Any run of digits is a valid pending hours value
        TimeField::Hours => Ok(()),
        TimeField::Minutes | TimeField::Seconds => parse_bounded(field, text).map(|_| ()),
    }
}

/// Validate all three fields for acceptance into the timer
pub fn validate_commit(
    hours: &TimeInput,
    minutes: &TimeInput,
    seconds: &TimeInput,
) -> Result<ManualTime, ValidationError> {
    let manual = ManualTime {
        hours: commit_field(TimeField::Hours, hours)?,
        minutes: commit_field(TimeField::Minutes, minutes)?,
        seconds: commit_field(TimeField::Seconds, seconds)?,
    };
    if manual.checked_total_seconds().is_none() {
        return Err(hours_out_of_range());
    }
    Ok(manual)
}

fn commit_field(field: TimeField, input: &TimeInput) -> Result<u64, ValidationError> {
    let text = input.as_text();
    if text.is_empty() {
        return Ok(0);
    }
    check_digits(field, &text)?;
    match field {
        TimeField::Hours => text.parse().map_err(|_| hours_out_of_range()),
        TimeField::Minutes | TimeField::Seconds => parse_bounded(field, &text),
    }
}

fn check_digits(field: TimeField, text: &str) -> Result<(), ValidationError> {
    if text.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::NonNumericInput(field))
    }
}

fn hours_out_of_range() -> ValidationError {
    ValidationError::OutOfRange {
        field: TimeField::Hours,
        min: 0,
        max: MAX_HOURS,
    }
}

/// Parse an all-digit minutes or seconds value within `0..=59`
fn parse_bounded(field: TimeField, text: &str) -> Result<u64, ValidationError> {
    let out_of_range = ValidationError::OutOfRange {
        field,
        min: 0,
        max: MAX_MINUTES_SECONDS,
    };
    // Only overflow can fail here since the text is all digits.
    let value: u64 = text.parse().map_err(|_| out_of_range.clone())?;
    if value > MAX_MINUTES_SECONDS {
        return Err(out_of_range);
    }
    Ok(value)
}

/// Tracks which fields are currently flagged as errored.
///
/// A field stays errored from its first failing keystroke until it next
/// validates successfully.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeValidator {
    errored: [bool; 3],
}

impl ManualTimeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate one keystroke's worth of input and update the field's mark
    pub fn check(&mut self, field: TimeField, text: &str) -> ValidationResult {
        match validate_incremental(field, text) {
            Ok(()) => {
                if self.errored[field.index()] {
                    debug!("Cleared validation error for {}", field);
                }
                self.errored[field.index()] = false;
                ValidationResult::valid(field)
            }
            Err(e) => {
                debug!("Validation failed for {}: {}", field, e);
                self.errored[field.index()] = true;
                ValidationResult::from_error(&e)
            }
        }
    }

    /// Validate all fields for commit. Success clears every error mark.
    pub fn commit(
        &mut self,
        hours: &TimeInput,
        minutes: &TimeInput,
        seconds: &TimeInput,
    ) -> Result<ManualTime, ValidationError> {
        let manual = validate_commit(hours, minutes, seconds)?;
        self.errored = [false; 3];
        Ok(manual)
    }

    pub fn is_errored(&self, field: TimeField) -> bool {
        self.errored[field.index()]
    }

    pub fn errored_fields(&self) -> Vec<TimeField> {
        TimeField::ALL
            .into_iter()
            .filter(|f| self.is_errored(*f))
            .collect()
    }
}
