//! Interval — a single stack observation within a session.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Naive timestamp layouts accepted from form-style input. Interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Malformed interval input. The ledger is left unchanged when this is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be non-negative, got {value}")]
    NegativeAmount { field: &'static str, value: f64 },

    #[error("{field} must be a finite number, got {value}")]
    NonFiniteAmount { field: &'static str, value: f64 },

    #[error("unparseable timestamp '{input}'")]
    UnparseableTimestamp { input: String },
}

/// A timestamped stack/add-on observation.
///
/// `add_on_amount` is 0 for a pure observation and positive for a buy-in or
/// add-on made at that instant. The initial buy-in is an interval with a
/// non-zero add-on at session start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub timestamp: DateTime<Utc>,
    pub stack: f64,
    pub add_on_amount: f64,
}

impl Interval {
    /// Build a validated interval.
    pub fn new(
        timestamp: DateTime<Utc>,
        stack: f64,
        add_on_amount: f64,
    ) -> Result<Self, ValidationError> {
        let interval = Self {
            timestamp,
            stack,
            add_on_amount,
        };
        interval.validate()?;
        Ok(interval)
    }

    /// Check the amount constraints: both finite and `>= 0`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_amount("stack", self.stack)?;
        check_amount("add_on_amount", self.add_on_amount)?;
        Ok(())
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteAmount { field, value });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    Ok(())
}

/// Unparsed interval as it arrives from a form, CLI flag, or request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInterval {
    pub timestamp: String,
    pub stack: f64,
    #[serde(default)]
    pub add_on_amount: f64,
}

impl RawInterval {
    pub fn new(timestamp: impl Into<String>, stack: f64, add_on_amount: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            stack,
            add_on_amount,
        }
    }

    /// Parse the timestamp and validate the amounts.
    pub fn parse(&self) -> Result<Interval, ValidationError> {
        let timestamp = parse_timestamp(&self.timestamp)?;
        Interval::new(timestamp, self.stack, self.add_on_amount)
    }
}

/// Parse an absolute instant.
///
/// Accepts RFC 3339 with an offset (normalized to UTC) or a naive
/// `YYYY-MM-DD[T ]HH:MM[:SS[.fff]]`, which is taken as UTC.
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    let trimmed = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| ValidationError::UnparseableTimestamp {
            input: input.to_string(),
        })
}
