//! # Lexis Core
//!
//! Spaced-repetition scheduling engine for vocabulary study:
//!
//! - **Scheduling engine**: pure state transitions over Hard/Medium/Easy
//!   ratings, with a minute-scale learning phase that graduates into SM-2
//!   style day-scale reviews
//! - **Priority ranker**: one urgency scale for "what to study next" across
//!   learning and review items
//! - **Progress store**: SQLite persistence keyed by `(word_id, direction)`,
//!   with review submissions serialized per key
//! - **Injectable clock**: no component reads wall-clock time directly, so
//!   every schedule is reproducible under test
//!
//! Each word is scheduled independently per study direction; knowing a word
//! forward says nothing about knowing it backward.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lexis_core::{Direction, ProgressStore, Quality};
//!
//! // Create the store (uses default platform-specific location)
//! let store = ProgressStore::new(None)?;
//!
//! // Add a word to the study set (both directions)
//! store.select_word(42)?;
//!
//! // Ask what to study, show it, record the answer
//! if let Some(item) = store.next_item(Direction::Forward)? {
//!     let updated = store.submit_review(item.word_id, item.direction, Quality::Easy, 0)?;
//!     println!("next due: {}", updated.next_review_at);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `bundled-sqlite` (default): compile SQLite into the binary

#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod clock;
pub mod display;
pub mod progress;
pub mod ranking;
pub mod scheduler;
pub mod storage;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Data model
pub use progress::{
    Direction, Phase, ProgressRecord, GRADUATION_THRESHOLD, INITIAL_EASE_FACTOR,
    MAX_EASE_FACTOR, MAX_INTERVAL_DAYS, MIN_EASE_FACTOR,
};

// Scheduling engine
pub use scheduler::{ema_update, transition, EngineError, Quality};

// Priority ranking
pub use ranking::{most_urgent, priority, rank, LEARNING_BASE_PRIORITY, REVIEW_BASE_PRIORITY};

// Clock
pub use clock::{Clock, ManualClock, SystemClock};

// Display helpers
pub use display::time_until_review;

// Storage layer
pub use storage::{ProgressStore, Result, StorageError, StudyStats};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        Clock, Direction, Phase, ProgressRecord, ProgressStore, Quality, Result, StorageError,
        StudyStats, SystemClock,
    };
    pub use crate::{most_urgent, priority, rank, time_until_review, transition};
}
