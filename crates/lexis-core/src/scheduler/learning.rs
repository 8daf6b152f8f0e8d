//! Learning-phase handler
//!
//! Minute-scale, same-session scheduling. Medium and Easy ratings accumulate
//! graduation credit (0.5 and 1.0 respectively); reaching 3.0 graduates the
//! record into the review phase at a one-day interval. A single Hard rating
//! erases all accumulated credit.

use chrono::{DateTime, Duration, Utc};

use super::{clamp_ease, Quality};
use crate::progress::{Phase, ProgressRecord, GRADUATION_THRESHOLD};

pub(super) fn transition(
    record: &ProgressRecord,
    quality: Quality,
    session_max_position: i32,
    now: DateTime<Utc>,
) -> ProgressRecord {
    let mut next = record.clone();
    next.last_review_at = Some(now);
    next.updated_at = now;

    match quality {
        Quality::Hard => {
            next.repetitions += 1;
            next.interval_days = 0.0;
            next.ease_factor = clamp_ease(record.ease_factor - 0.2);
            next.next_review_at = now + Duration::minutes(5);
            // Smallest offset: reappears soonest in the session
            next.session_position = Some(session_max_position + 1);
            next.hard_presses += 1;
            next.successful_reviews = 0.0;
        }
        Quality::Medium => {
            let credit = record.successful_reviews + 0.5;
            if credit >= GRADUATION_THRESHOLD {
                graduate(&mut next, now);
            } else {
                next.successful_reviews = credit;
                next.interval_days = 0.0;
                next.ease_factor = clamp_ease(record.ease_factor + 0.05);
                next.next_review_at = now + Duration::minutes(10);
                next.session_position = Some(session_max_position + 5);
            }
        }
        Quality::Easy => {
            let credit = record.successful_reviews + 1.0;
            if credit >= GRADUATION_THRESHOLD {
                graduate(&mut next, now);
            } else {
                next.successful_reviews = credit;
                next.interval_days = 0.0;
                next.ease_factor = clamp_ease(record.ease_factor + 0.1);
                next.next_review_at = now + Duration::hours(1);
                next.session_position = Some(session_max_position + 10);
            }
        }
    }

    next
}

/// Move a record into the review phase at a one-day interval
///
/// The accumulator and hard-press counter restart; credit at or above the
/// threshold is never persisted.
fn graduate(next: &mut ProgressRecord, now: DateTime<Utc>) {
    next.repetitions += 1;
    next.interval_days = 1.0;
    next.ease_factor = clamp_ease(next.ease_factor + 0.15);
    next.next_review_at = now + Duration::days(1);
    next.phase = Phase::Review;
    next.session_position = None;
    next.successful_reviews = 0.0;
    next.hard_presses = 0;
}
