//! Storage Module
//!
//! SQLite-based persistence for progress records:
//! - Composite `(word_id, direction)` primary key
//! - Study-set lifecycle (select/deselect creates and removes record pairs)
//! - Serialized review submission under the writer lock

mod migrations;
mod sqlite;

pub use migrations::MIGRATIONS;
pub use sqlite::{ProgressStore, Result, StorageError, StudyStats};
