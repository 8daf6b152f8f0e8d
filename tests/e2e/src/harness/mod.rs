//! Test Study Harness
//!
//! Provides isolated store instances for testing:
//! - Temporary databases that are automatically cleaned up
//! - A shared manual clock so tests can jump through study days
//! - Session bookkeeping (max session position) like a real controller

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use lexis_core::{Clock, Direction, ManualClock, ProgressRecord, ProgressStore, Quality};
use tempfile::TempDir;

/// Clock adapter sharing one [`ManualClock`] between test and store
struct SharedClock(Arc<ManualClock>);

impl Clock for SharedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.now()
    }
}

/// Harness wrapping a temp-file store, a manual clock and session state
///
/// The database is deleted when the harness goes out of scope.
pub struct StudyHarness {
    /// The store under test
    pub store: ProgressStore,
    clock: Arc<ManualClock>,
    /// Maximum session position handed out so far, per the session contract
    pub session_max: i32,
    _temp_dir: TempDir,
    db_path: PathBuf,
}

impl StudyHarness {
    /// Fixed, readable start instant for every journey
    pub fn start_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap()
    }

    /// Create a harness over a fresh temporary database
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let db_path = temp_dir.path().join("lexis-e2e.db");
        let clock = Arc::new(ManualClock::new(Self::start_time()));
        let store =
            ProgressStore::with_clock(Some(db_path.clone()), Box::new(SharedClock(clock.clone())))
                .expect("open store");

        Self {
            store,
            clock,
            session_max: 0,
            _temp_dir: temp_dir,
            db_path,
        }
    }

    /// Current test time
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Move test time forward
    pub fn advance(&self, by: Duration) {
        self.clock.advance(by);
    }

    /// Submit a rating and track the session position like a controller
    pub fn submit(&mut self, word_id: i64, direction: Direction, quality: Quality) -> ProgressRecord {
        let record = self
            .store
            .submit_review(word_id, direction, quality, self.session_max)
            .expect("submit review");
        if let Some(position) = record.session_position {
            self.session_max = self.session_max.max(position);
        }
        record
    }

    /// Reopen the store from the same database file, keeping the clock
    pub fn reopen(&mut self) {
        let clock = self.clock.clone();
        self.store = ProgressStore::with_clock(
            Some(self.db_path.clone()),
            Box::new(SharedClock(clock)),
        )
        .expect("reopen store");
    }
}

impl Default for StudyHarness {
    fn default() -> Self {
        Self::new()
    }
}
