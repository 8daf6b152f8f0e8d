//! Progress Record - The per-word, per-direction scheduling state
//!
//! Each vocabulary word carries two independent records, one per study
//! direction. A record holds:
//! - SM-2 style scheduling state (repetitions, interval, ease factor)
//! - Learning/review phase with intra-session ordering
//! - The graduation accumulator and hard-press counter

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// BOUNDS
// ============================================================================

/// Lowest ease factor a record may hold
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Highest ease factor a record may hold (also the starting value)
pub const MAX_EASE_FACTOR: f64 = 2.5;

/// Ease factor assigned to fresh records
pub const INITIAL_EASE_FACTOR: f64 = 2.5;

/// Review intervals never grow past one year
pub const MAX_INTERVAL_DAYS: f64 = 365.0;

/// Accumulated success credit required to graduate out of the learning phase
pub const GRADUATION_THRESHOLD: f64 = 3.0;

// ============================================================================
// DIRECTION
// ============================================================================

/// Study direction for a vocabulary word
///
/// Scheduling state is independent per direction: knowing a word when
/// prompted in one direction says nothing about the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Prompt with the word, answer with the translation
    #[default]
    Forward,
    /// Prompt with the translation, answer with the word
    Backward,
}

impl Direction {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }

    /// Parse from string name
    pub fn parse_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "backward" => Direction::Backward,
            _ => Direction::Forward,
        }
    }

    /// Both directions, in storage order
    pub fn both() -> [Direction; 2] {
        [Direction::Forward, Direction::Backward]
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PHASE
// ============================================================================

/// Scheduling phase of a record
///
/// Learning means short, same-session intervals ordered by session position.
/// Review means multi-day intervals after graduation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Same-session repetition of a new or recently failed word
    #[default]
    Learning,
    /// Day/week scale scheduling once the word has graduated
    Review,
}

impl Phase {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Learning => "learning",
            Phase::Review => "review",
        }
    }

    /// Parse from string name
    pub fn parse_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "review" => Phase::Review,
            _ => Phase::Learning,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// PROGRESS RECORD
// ============================================================================

/// Scheduling state for one `(word_id, direction)` pair
///
/// Mutated only by [`crate::scheduler::transition`]; everything else treats
/// records as opaque values to load, rank and save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Identifier of the vocabulary word
    pub word_id: i64,
    /// Study direction this record schedules
    pub direction: Direction,
    /// Count of review events applied
    pub repetitions: i32,
    /// Days until due, `0.0..=365.0`
    pub interval_days: f64,
    /// SM-2 ease factor, `1.3..=2.5`
    pub ease_factor: f64,
    /// When the record is next due
    pub next_review_at: DateTime<Utc>,
    /// Most recent review, if any
    pub last_review_at: Option<DateTime<Utc>>,
    /// Learning or review phase
    pub phase: Phase,
    /// Intra-session ordering hint, `Some` only while learning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_position: Option<i32>,
    /// Graduation credit in half-point steps; reset by any Hard rating
    pub successful_reviews: f64,
    /// Hard ratings since the last graduation
    pub hard_presses: i32,
    /// Whether the word is part of the active study set
    pub is_selected: bool,
    /// When the record was created
    pub created_at: DateTime<Utc>,
    /// When the record was last modified
    pub updated_at: DateTime<Utc>,
}

impl ProgressRecord {
    /// Create a fresh learning-phase record, due immediately
    pub fn new(word_id: i64, direction: Direction, now: DateTime<Utc>) -> Self {
        Self {
            word_id,
            direction,
            repetitions: 0,
            interval_days: 0.0,
            ease_factor: INITIAL_EASE_FACTOR,
            next_review_at: now,
            last_review_at: None,
            phase: Phase::Learning,
            session_position: None,
            successful_reviews: 0.0,
            hard_presses: 0,
            is_selected: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the record is due at the given time
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at <= now
    }

    /// Composite storage key
    pub fn key(&self) -> (i64, Direction) {
        (self.word_id, self.direction)
    }
}

// ============================================================================
// TESTS
// ============================================================================
