//! Priority Ranker
//!
//! Maps progress records onto a single urgency scale so a session controller
//! can always ask "what next?". Learning-phase records rank near 10000,
//! ordered by session position; review-phase records rank around 5000,
//! gaining a point per overdue minute. The overdue term is unbounded on
//! purpose: a long-overdue review eventually outranks deep-queue learning
//! items.

use chrono::{DateTime, Utc};

use crate::progress::{Phase, ProgressRecord};

/// Base priority of a learning-phase record with no session position
pub const LEARNING_BASE_PRIORITY: i64 = 10_000;

/// Base priority of a review-phase record due exactly now
pub const REVIEW_BASE_PRIORITY: i64 = 5_000;

/// Urgency of a single record; higher means study sooner
pub fn priority(record: &ProgressRecord, now: DateTime<Utc>) -> i64 {
    match record.phase {
        Phase::Learning => {
            LEARNING_BASE_PRIORITY - i64::from(record.session_position.unwrap_or(0))
        }
        Phase::Review => {
            let overdue_minutes = (now - record.next_review_at).num_minutes();
            if overdue_minutes >= 0 {
                REVIEW_BASE_PRIORITY + overdue_minutes
            } else {
                (REVIEW_BASE_PRIORITY + overdue_minutes).max(0)
            }
        }
    }
}

/// Sort records in place, most urgent first
pub fn rank(records: &mut [ProgressRecord], now: DateTime<Utc>) {
    records.sort_by_key(|record| std::cmp::Reverse(priority(record, now)));
}

/// The single most urgent record, if any
pub fn most_urgent(records: &[ProgressRecord], now: DateTime<Utc>) -> Option<&ProgressRecord> {
    records.iter().max_by_key(|record| priority(record, now))
}
