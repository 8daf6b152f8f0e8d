//! Scheduling Engine
//!
//! Pure state-transition function for progress records. Given a record, a
//! quality rating and the current time, it returns the next state: interval,
//! ease factor, phase and session ordering. No side effects, no clock reads.
//!
//! The learning phase runs on minute-scale intervals inside a session; the
//! review phase runs on SM-2 style day-scale intervals with an adaptive
//! multiplier for Medium ratings.

mod learning;
mod review;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::progress::{Phase, ProgressRecord, MAX_EASE_FACTOR, MAX_INTERVAL_DAYS, MIN_EASE_FACTOR};

pub use review::ema_update;

// ============================================================================
// ERRORS
// ============================================================================

/// Engine error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Quality rating outside the Hard/Medium/Easy domain
    #[error("Invalid quality rating: {0}")]
    InvalidQuality(String),
}

// ============================================================================
// QUALITY
// ============================================================================

/// User feedback after seeing a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Failed to recall, or recalled with serious difficulty
    Hard,
    /// Recalled with some effort
    Medium,
    /// Recalled immediately
    Easy,
}

impl Quality {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Hard => "hard",
            Quality::Medium => "medium",
            Quality::Easy => "easy",
        }
    }

    /// Parse a raw numeric grade (0 = hard, 1 = medium, 2 = easy)
    ///
    /// Anything outside the domain is an error, never a silent no-op.
    pub fn from_grade(grade: u8) -> Result<Self, EngineError> {
        match grade {
            0 => Ok(Quality::Hard),
            1 => Ok(Quality::Medium),
            2 => Ok(Quality::Easy),
            other => Err(EngineError::InvalidQuality(other.to_string())),
        }
    }
}

impl std::str::FromStr for Quality {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hard" => Ok(Quality::Hard),
            "medium" => Ok(Quality::Medium),
            "easy" => Ok(Quality::Easy),
            other => Err(EngineError::InvalidQuality(other.to_string())),
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// TRANSITION
// ============================================================================

/// Apply one quality rating to a record, returning the new state
///
/// `session_max_position` is the current maximum session position among
/// learning-phase records in the active session; the session controller
/// tracks it and the learning handler uses it to order re-appearances.
///
/// Total over the `Quality` domain: every input yields a valid record with
/// `ease_factor` in `[1.3, 2.5]` and `interval_days` in `[0, 365]`.
pub fn transition(
    record: &ProgressRecord,
    quality: Quality,
    session_max_position: i32,
    now: DateTime<Utc>,
) -> ProgressRecord {
    match record.phase {
        Phase::Learning => learning::transition(record, quality, session_max_position, now),
        Phase::Review => review::transition(record, quality, now),
    }
}

/// Clamp an ease factor into its invariant bounds
pub(crate) fn clamp_ease(ease_factor: f64) -> f64 {
    ease_factor.clamp(MIN_EASE_FACTOR, MAX_EASE_FACTOR)
}

/// Clamp an interval into its invariant bounds
pub(crate) fn clamp_interval(days: f64) -> f64 {
    days.clamp(0.0, MAX_INTERVAL_DAYS)
}

/// Duration for a fractional day count
pub(crate) fn days_duration(days: f64) -> chrono::Duration {
    chrono::Duration::seconds((days * 86_400.0).round() as i64)
}

// ============================================================================
// TESTS
// ============================================================================
