//! SQLite Progress Store
//!
//! Persistence for progress records, keyed by the composite
//! `(word_id, direction)`. Review submissions run load-transition-save under
//! the writer lock, so concurrent submissions for the same key cannot race.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::PathBuf;
use std::sync::Mutex;

use crate::clock::{Clock, SystemClock};
use crate::progress::{Direction, Phase, ProgressRecord};
use crate::ranking;
use crate::scheduler::{self, Quality};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Storage error type
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// No record for the given word and direction
    #[error("No progress record for word {word_id} ({direction})")]
    NotFound {
        /// Word identifier
        word_id: i64,
        /// Study direction
        direction: Direction,
    },
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Initialization error
    #[error("Initialization error: {0}")]
    Init(String),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

// ============================================================================
// STATS
// ============================================================================

/// Aggregate view of the study set
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    /// Total progress records (two per selected word)
    pub total_records: i64,
    /// Records still in the learning phase
    pub learning_count: i64,
    /// Records in the review phase
    pub review_count: i64,
    /// Records due at the time of the query
    pub due_now: i64,
    /// Mean ease factor across all records
    pub average_ease_factor: f64,
}

// ============================================================================
// PROGRESS STORE
// ============================================================================

/// SQLite-backed store for progress records
///
/// Uses separate reader/writer connections for interior mutability. All
/// methods take `&self`, making the store `Send + Sync` so callers can share
/// it behind an `Arc` without an outer mutex.
pub struct ProgressStore {
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
    clock: Box<dyn Clock>,
}

impl ProgressStore {
    /// Apply PRAGMAs to a connection
    fn configure_connection(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA temp_store = MEMORY;
             PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )?;

        Ok(())
    }

    /// Create a store at the given path, or the platform default location
    pub fn new(db_path: Option<PathBuf>) -> Result<Self> {
        Self::with_clock(db_path, Box::new(SystemClock))
    }

    /// Create a store with an injected clock
    pub fn with_clock(db_path: Option<PathBuf>, clock: Box<dyn Clock>) -> Result<Self> {
        let path = match db_path {
            Some(p) => p,
            None => {
                let proj_dirs = ProjectDirs::from("app", "lexis", "core").ok_or_else(|| {
                    StorageError::Init("Could not determine project directories".to_string())
                })?;

                let data_dir = proj_dirs.data_dir();
                std::fs::create_dir_all(data_dir)?;
                data_dir.join("lexis.db")
            }
        };

        let writer_conn = Connection::open(&path)?;
        Self::configure_connection(&writer_conn)?;

        // Apply migrations on writer only
        super::migrations::apply_migrations(&writer_conn)?;

        let reader_conn = Connection::open(&path)?;
        Self::configure_connection(&reader_conn)?;

        Ok(Self {
            writer: Mutex::new(writer_conn),
            reader: Mutex::new(reader_conn),
            clock,
        })
    }

    fn writer(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.writer
            .lock()
            .map_err(|_| StorageError::Init("Writer lock poisoned".into()))
    }

    fn reader(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.reader
            .lock()
            .map_err(|_| StorageError::Init("Reader lock poisoned".into()))
    }

    // ========================================================================
    // PERSISTENCE PORT
    // ========================================================================

    /// Load one record by its composite key
    pub fn load(&self, word_id: i64, direction: Direction) -> Result<Option<ProgressRecord>> {
        let reader = self.reader()?;
        let record = reader
            .query_row(
                &format!("SELECT {} FROM progress_records WHERE word_id = ?1 AND direction = ?2", COLUMNS),
                params![word_id, direction.as_str()],
                record_from_row,
            )
            .optional()?;

        Ok(record)
    }

    /// Insert or replace a record
    pub fn save(&self, record: &ProgressRecord) -> Result<()> {
        let writer = self.writer()?;
        upsert(&writer, record)
    }

    /// Remove one record by its composite key
    pub fn delete(&self, word_id: i64, direction: Direction) -> Result<()> {
        let writer = self.writer()?;
        writer.execute(
            "DELETE FROM progress_records WHERE word_id = ?1 AND direction = ?2",
            params![word_id, direction.as_str()],
        )?;

        Ok(())
    }

    // ========================================================================
    // STUDY-SET LIFECYCLE
    // ========================================================================

    /// Add a word to the study set, creating fresh records for both
    /// directions
    ///
    /// Directions that already have a record keep their state.
    pub fn select_word(&self, word_id: i64) -> Result<(ProgressRecord, ProgressRecord)> {
        let now = self.clock.now();
        let writer = self.writer()?;

        let forward = get_or_create(&writer, word_id, Direction::Forward, now)?;
        let backward = get_or_create(&writer, word_id, Direction::Backward, now)?;

        Ok((forward, backward))
    }

    /// Remove a word from the study set, deleting both records
    pub fn deselect_word(&self, word_id: i64) -> Result<()> {
        let writer = self.writer()?;
        let removed = writer.execute(
            "DELETE FROM progress_records WHERE word_id = ?1",
            params![word_id],
        )?;
        tracing::debug!(word_id, removed, "Deselected word");

        Ok(())
    }

    /// All selected records for one study direction
    pub fn selected(&self, direction: Direction) -> Result<Vec<ProgressRecord>> {
        let reader = self.reader()?;
        let mut stmt = reader.prepare(&format!(
            "SELECT {} FROM progress_records WHERE direction = ?1 AND is_selected = 1",
            COLUMNS
        ))?;

        let records = stmt
            .query_map(params![direction.as_str()], record_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    // ========================================================================
    // REVIEW SUBMISSION
    // ========================================================================

    /// Apply a quality rating to one record: load, transition, save
    ///
    /// Runs entirely under the writer lock, so two submissions for the same
    /// `(word_id, direction)` serialize instead of losing one rating.
    pub fn submit_review(
        &self,
        word_id: i64,
        direction: Direction,
        quality: Quality,
        session_max_position: i32,
    ) -> Result<ProgressRecord> {
        let now = self.clock.now();
        let writer = self.writer()?;

        let record = writer
            .query_row(
                &format!("SELECT {} FROM progress_records WHERE word_id = ?1 AND direction = ?2", COLUMNS),
                params![word_id, direction.as_str()],
                record_from_row,
            )
            .optional()?
            .ok_or(StorageError::NotFound { word_id, direction })?;

        let next = scheduler::transition(&record, quality, session_max_position, now);
        upsert(&writer, &next)?;

        tracing::debug!(
            word_id,
            %direction,
            %quality,
            phase = %next.phase,
            interval_days = next.interval_days,
            ease_factor = next.ease_factor,
            "Review applied"
        );

        Ok(next)
    }

    /// The most urgent selected record for a direction, by priority
    pub fn next_item(&self, direction: Direction) -> Result<Option<ProgressRecord>> {
        let records = self.selected(direction)?;
        let now = self.clock.now();

        Ok(ranking::most_urgent(&records, now).cloned())
    }

    // ========================================================================
    // STATS
    // ========================================================================

    /// Aggregate counts over all records
    pub fn stats(&self) -> Result<StudyStats> {
        let now = self.clock.now();
        let reader = self.reader()?;

        let stats = reader.query_row(
            "SELECT
                COUNT(*),
                COALESCE(SUM(CASE WHEN phase = 'learning' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN phase = 'review' THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN next_review_at <= ?1 THEN 1 ELSE 0 END), 0),
                COALESCE(AVG(ease_factor), 0.0)
             FROM progress_records",
            params![now],
            |row| {
                Ok(StudyStats {
                    total_records: row.get(0)?,
                    learning_count: row.get(1)?,
                    review_count: row.get(2)?,
                    due_now: row.get(3)?,
                    average_ease_factor: row.get(4)?,
                })
            },
        )?;

        Ok(stats)
    }
}

// ============================================================================
// ROW MAPPING
// ============================================================================

const COLUMNS: &str = "word_id, direction, repetitions, interval_days, ease_factor, \
     next_review_at, last_review_at, phase, session_position, successful_reviews, \
     hard_presses, is_selected, created_at, updated_at";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ProgressRecord> {
    let direction: String = row.get(1)?;
    let phase: String = row.get(7)?;

    Ok(ProgressRecord {
        word_id: row.get(0)?,
        direction: Direction::parse_name(&direction),
        repetitions: row.get(2)?,
        interval_days: row.get(3)?,
        ease_factor: row.get(4)?,
        next_review_at: row.get::<_, DateTime<Utc>>(5)?,
        last_review_at: row.get::<_, Option<DateTime<Utc>>>(6)?,
        phase: Phase::parse_name(&phase),
        session_position: row.get(8)?,
        successful_reviews: row.get(9)?,
        hard_presses: row.get(10)?,
        is_selected: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

fn get_or_create(
    conn: &Connection,
    word_id: i64,
    direction: Direction,
    now: DateTime<Utc>,
) -> Result<ProgressRecord> {
    let existing = conn
        .query_row(
            &format!(
                "SELECT {} FROM progress_records WHERE word_id = ?1 AND direction = ?2",
                COLUMNS
            ),
            params![word_id, direction.as_str()],
            record_from_row,
        )
        .optional()?;

    match existing {
        Some(record) => Ok(record),
        None => {
            let fresh = ProgressRecord::new(word_id, direction, now);
            upsert(conn, &fresh)?;
            tracing::debug!(word_id, %direction, "Created fresh progress record");
            Ok(fresh)
        }
    }
}

fn upsert(conn: &Connection, record: &ProgressRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO progress_records (
            word_id, direction, repetitions, interval_days, ease_factor,
            next_review_at, last_review_at, phase, session_position,
            successful_reviews, hard_presses, is_selected, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
         ON CONFLICT(word_id, direction) DO UPDATE SET
            repetitions = excluded.repetitions,
            interval_days = excluded.interval_days,
            ease_factor = excluded.ease_factor,
            next_review_at = excluded.next_review_at,
            last_review_at = excluded.last_review_at,
            phase = excluded.phase,
            session_position = excluded.session_position,
            successful_reviews = excluded.successful_reviews,
            hard_presses = excluded.hard_presses,
            is_selected = excluded.is_selected,
            updated_at = excluded.updated_at",
        params![
            record.word_id,
            record.direction.as_str(),
            record.repetitions,
            record.interval_days,
            record.ease_factor,
            record.next_review_at,
            record.last_review_at,
            record.phase.as_str(),
            record.session_position,
            record.successful_reviews,
            record.hard_presses,
            record.is_selected,
            record.created_at,
            record.updated_at,
        ],
    )?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
