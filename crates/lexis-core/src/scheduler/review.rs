//! Review-phase handler
//!
//! Day-scale SM-2 style scheduling. Medium ratings scale the interval by an
//! adaptive multiplier keyed to the current interval bucket; Easy ratings
//! follow a progressive table (1, 3, 7 days) before switching to ease-factor
//! growth. Hard ratings lapse the record back to a one-day interval.

use chrono::{DateTime, Duration, Utc};

use super::{clamp_ease, clamp_interval, days_duration, Quality};
use crate::progress::ProgressRecord;

pub(super) fn transition(
    record: &ProgressRecord,
    quality: Quality,
    now: DateTime<Utc>,
) -> ProgressRecord {
    let mut next = record.clone();
    next.last_review_at = Some(now);
    next.updated_at = now;
    next.session_position = None;

    match quality {
        Quality::Hard => {
            // Lapse: restart at a one-day interval, staying in the review
            // phase rather than re-entering same-session learning.
            next.repetitions = 1;
            next.interval_days = 1.0;
            next.ease_factor = clamp_ease(record.ease_factor - 0.2);
            next.next_review_at = now + Duration::days(1);
            next.hard_presses += 1;
            next.successful_reviews = 0.0;
        }
        Quality::Medium => {
            let multiplier = interval_multiplier(record.interval_days);
            next.interval_days = clamp_interval(record.interval_days.max(1.0) * multiplier);
            next.ease_factor = ema_update(record.ease_factor, 4);
            next.repetitions += 1;
            next.next_review_at = now + days_duration(next.interval_days);
        }
        Quality::Easy => {
            next.ease_factor = ema_update(record.ease_factor, 5);
            next.repetitions += 1;
            next.interval_days = match next.repetitions {
                1 => 1.0,
                2 => 3.0,
                3 => 7.0,
                _ => clamp_interval(record.interval_days.max(1.0) * next.ease_factor),
            };
            next.next_review_at = now + days_duration(next.interval_days);
        }
    }

    next
}

/// Adaptive multiplier for Medium ratings, keyed by the current interval
///
/// Short intervals grow, long intervals shrink: a word answered with effort
/// at a 30-day interval was scheduled too far out.
fn interval_multiplier(interval_days: f64) -> f64 {
    if interval_days <= 3.0 {
        1.5
    } else if interval_days <= 7.0 {
        1.2
    } else if interval_days <= 21.0 {
        0.85
    } else {
        0.5
    }
}

/// SM-2 ease factor update for a quality grade on the 0-5 scale
///
/// `ef + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))`, clamped to `[1.3, 2.5]`.
/// Medium maps to q=4 (no net change), Easy to q=5 (+0.1).
pub fn ema_update(ease_factor: f64, q: u8) -> f64 {
    let q = f64::from(q);
    clamp_ease(ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)))
}
