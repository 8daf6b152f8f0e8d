//! Human-readable "time until review" labels
//!
//! Pure bucket table consumed by the UI layer. Overdue and imminent reviews
//! both render as "now".

use chrono::{DateTime, Utc};

/// Describe how far away a review is, in coarse human terms
pub fn time_until_review(next_review_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let until = next_review_at - now;
    let minutes = until.num_minutes();
    let hours = until.num_hours();
    let days = until.num_days();

    if minutes < 5 {
        "now".to_string()
    } else if minutes < 30 {
        "soon".to_string()
    } else if hours < 2 {
        "later today".to_string()
    } else if hours < 12 {
        "today".to_string()
    } else if hours < 24 {
        // Distinct bucket, same label
        "today".to_string()
    } else if days == 1 {
        "tomorrow".to_string()
    } else if days == 2 {
        "2 days".to_string()
    } else if days == 3 {
        "3 days".to_string()
    } else if days < 7 {
        format!("{} days", days)
    } else if days < 14 {
        "1 week".to_string()
    } else if days < 21 {
        "2 weeks".to_string()
    } else if days < 30 {
        "3 weeks".to_string()
    } else if days < 60 {
        "1 month".to_string()
    } else if days < 180 {
        format!("{} months", days / 30)
    } else {
        "6+ months".to_string()
    }
}
