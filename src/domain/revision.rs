//! Note identity and revision value types.

use super::BlobHash;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Identity of a note. Allocated by the store, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in a note's append-only revision history.
///
/// Binds a note identity to the blob holding that revision's content and the
/// wall-clock time the revision was written. `seq` is the store's strictly
/// increasing row sequence; it breaks timestamp ties when deriving the
/// current revision and keys search-result resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRev {
    pub note_id: NoteId,
    pub sha256: BlobHash,
    pub timestamp: DateTime<Utc>,
    pub seq: i64,
}
