//! Content-addressed, append-only note store.
//!
//! [`Repository`] is the single entry point: it owns the SQLite connection
//! and sequences every multi-step write inside one transaction. Callers never
//! touch the blob or revision tables directly.

mod config;
mod connection;
mod notes;
mod schema;
mod search;


use crate::domain::{BlobHash, NoteId, NoteRev};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Connection;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default nest file name, looked up in the home directory and then the
/// working directory when no explicit path is given.
pub const NEST_FILE_NAME: &str = ".notebook.nest";

// ===========================================
// Errors
// ===========================================

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested note does not exist.
    #[error("note not found: {id}")]
    NoteNotFound { id: NoteId },

    /// No blob is stored under the given hash.
    #[error("blob not found: {sha256}")]
    BlobNotFound { sha256: String },

    /// No revision exists with the given sequence number.
    #[error("revision not found: seq {seq}")]
    RevisionNotFound { seq: i64 },

    /// The config key is not present in the store.
    #[error("config key not found: {key}")]
    ConfigKeyNotFound { key: String },

    /// A storage-layer constraint was violated. The transaction discipline
    /// should prevent this; it is kept distinct so it is reportable if a
    /// corrupted store surfaces one.
    #[error("integrity violation during {operation}: {source}")]
    Integrity {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A schema migration could not be applied.
    #[error("schema migration to version {version} failed: {source}")]
    Migration {
        version: i64,
        #[source]
        source: rusqlite::Error,
    },

    /// Any other database failure (I/O, disk full, corruption).
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Filesystem failure outside the database itself.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Maps a rusqlite error to [`StoreError::Integrity`] when it reports a
/// constraint violation, and to [`StoreError::Database`] otherwise.
pub(crate) fn classify_db_error(operation: &'static str, err: rusqlite::Error) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(code, _)
            if code.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::Integrity {
                operation,
                source: err,
            }
        }
        _ => StoreError::Database(err),
    }
}

// ===========================================
// Clock
// ===========================================

/// Source of revision timestamps.
///
/// Injected at construction so tests can drive deterministic, strictly
/// increasing time. Exactly one reading is taken per write operation.
pub trait Clock: Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ===========================================
// Repository
// ===========================================

/// The note store: one SQLite connection, one transaction boundary.
pub struct Repository {
    pub(crate) conn: Connection,
    pub(crate) clock: Box<dyn Clock>,
}

// ===========================================
// Derived search types
// ===========================================

/// One full-text search match against a current revision.
///
/// Transient: recomputed per query, never persisted. `seq` identifies the
/// matched revision row; resolve it with [`Repository::revision_by_seq`]
/// (two revisions sharing a blob hash still resolve distinctly).
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub seq: i64,
    pub sha256: BlobHash,
    /// BM25 rank; lower values are more relevant.
    pub rank: f64,
    /// Context window around the match, with visible markers and ellipsis.
    pub snippet: String,
}

impl SearchHit {
    /// Resolves this hit back to its originating revision.
    pub fn resolve(&self, repo: &Repository) -> StoreResult<NoteRev> {
        repo.revision_by_seq(self.seq)
    }
}

/// Aggregate frequency of one indexed term across current revisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermStat {
    pub term: String,
    /// Number of distinct notes whose current revision contains the term.
    pub note_count: i64,
    /// Total occurrences across all current revisions.
    pub instance_count: i64,
}

// ===========================================
// Timestamp encoding
// ===========================================

/// Truncates a clock reading to microsecond precision, the resolution the
/// store persists. Write paths apply this before both storing and returning
/// a timestamp, so a returned revision is byte-equal to later reads of the
/// same row.
pub(crate) fn truncate_timestamp(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(ts.timestamp_micros()).unwrap_or(ts)
}

/// Encodes a timestamp as fixed-width RFC 3339 UTC with microseconds, so the
/// stored text sorts chronologically.
pub(crate) fn encode_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Decodes a timestamp written by [`encode_timestamp`].
pub(crate) fn decode_timestamp(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
