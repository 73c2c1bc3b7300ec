//! Blob storage and the append-only revision ledger.

use super::{
    classify_db_error, decode_timestamp, encode_timestamp, truncate_timestamp, Repository,
    StoreError, StoreResult,
};
use crate::domain::{BlobHash, NoteId, NoteRev};
use rusqlite::{params, OptionalExtension, Row};

/// Maps a `note_rev` row in (note_id, blob_sha256, timestamp, seq) column
/// order to a [`NoteRev`].
fn rev_from_row(row: &Row<'_>) -> rusqlite::Result<NoteRev> {
    let note_id: i64 = row.get(0)?;
    let sha: String = row.get(1)?;
    let ts: String = row.get(2)?;
    let seq: i64 = row.get(3)?;

    let sha256 = BlobHash::from_hex(&sha).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(NoteRev {
        note_id: NoteId::new(note_id),
        sha256,
        timestamp: decode_timestamp(&ts)?,
        seq,
    })
}

impl Repository {
    // ===========================================
    // Content store
    // ===========================================

    /// Stores `bytes` under their SHA-256 hash.
    ///
    /// Idempotent: storing byte-identical content again is a no-op success
    /// and yields the same hash, leaving exactly one blob row.
    pub fn put_blob(&mut self, bytes: &[u8]) -> StoreResult<BlobHash> {
        let hash = BlobHash::compute(bytes);
        self.conn
            .execute(
                "INSERT OR IGNORE INTO blob (sha256, body) VALUES (?1, ?2)",
                params![hash.as_str(), bytes],
            )
            .map_err(|e| classify_db_error("put_blob", e))?;
        Ok(hash)
    }

    /// Returns the full content stored under `hash`.
    pub fn blob_body(&self, hash: &BlobHash) -> StoreResult<Vec<u8>> {
        self.conn
            .query_row(
                "SELECT body FROM blob WHERE sha256 = ?1",
                [hash.as_str()],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| StoreError::BlobNotFound {
                sha256: hash.as_str().to_string(),
            })
    }

    /// Returns at most the first `max_len` bytes of the blob without
    /// materializing the rest. Callers wanting a one-line preview truncate
    /// the result at the first line break.
    pub fn blob_head(&self, hash: &BlobHash, max_len: usize) -> StoreResult<Vec<u8>> {
        self.conn
            .query_row(
                "SELECT substr(body, 1, ?1) FROM blob WHERE sha256 = ?2",
                params![max_len as i64, hash.as_str()],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| StoreError::BlobNotFound {
                sha256: hash.as_str().to_string(),
            })
    }

    // ===========================================
    // Revision ledger
    // ===========================================

    /// Creates a new note whose first revision holds `content`.
    ///
    /// Blob insert, identity allocation, and the first revision row are one
    /// atomic unit; a note is never visible with an empty history. The clock
    /// is read exactly once.
    pub fn create_note(&mut self, content: &[u8]) -> StoreResult<NoteRev> {
        let hash = BlobHash::compute(content);
        let timestamp = truncate_timestamp(self.clock.now());

        let tx = self.transaction()?;

        tx.conn()
            .execute(
                "INSERT OR IGNORE INTO blob (sha256, body) VALUES (?1, ?2)",
                params![hash.as_str(), content],
            )
            .map_err(|e| classify_db_error("create_note", e))?;

        tx.conn()
            .execute("INSERT INTO note DEFAULT VALUES", [])
            .map_err(|e| classify_db_error("create_note", e))?;
        let note_id = tx.conn().last_insert_rowid();

        tx.conn()
            .execute(
                "INSERT INTO note_rev (note_id, blob_sha256, timestamp) VALUES (?1, ?2, ?3)",
                params![note_id, hash.as_str(), encode_timestamp(timestamp)],
            )
            .map_err(|e| classify_db_error("create_note", e))?;
        let seq = tx.conn().last_insert_rowid();

        tx.commit()?;

        Ok(NoteRev {
            note_id: NoteId::new(note_id),
            sha256: hash,
            timestamp,
            seq,
        })
    }

    /// Appends a new revision holding `content` to an existing note.
    ///
    /// Fails with [`StoreError::NoteNotFound`] before anything is written,
    /// so an append against an unknown id leaves no orphaned blob. Identical
    /// content is not rejected: the new revision row shares the deduplicated
    /// blob and timestamps the save.
    pub fn append_revision(&mut self, id: NoteId, content: &[u8]) -> StoreResult<NoteRev> {
        let hash = BlobHash::compute(content);
        let timestamp = truncate_timestamp(self.clock.now());

        let tx = self.transaction()?;

        let exists: Option<i64> = tx
            .conn()
            .query_row("SELECT id FROM note WHERE id = ?1", [id.as_i64()], |row| {
                row.get(0)
            })
            .optional()?;
        if exists.is_none() {
            return Err(StoreError::NoteNotFound { id });
        }

        tx.conn()
            .execute(
                "INSERT OR IGNORE INTO blob (sha256, body) VALUES (?1, ?2)",
                params![hash.as_str(), content],
            )
            .map_err(|e| classify_db_error("append_revision", e))?;

        tx.conn()
            .execute(
                "INSERT INTO note_rev (note_id, blob_sha256, timestamp) VALUES (?1, ?2, ?3)",
                params![id.as_i64(), hash.as_str(), encode_timestamp(timestamp)],
            )
            .map_err(|e| classify_db_error("append_revision", e))?;
        let seq = tx.conn().last_insert_rowid();

        tx.commit()?;

        Ok(NoteRev {
            note_id: id,
            sha256: hash,
            timestamp,
            seq,
        })
    }

    /// Returns the current revision of a note: latest timestamp, ties broken
    /// by the row sequence. Derived per query, never stored.
    pub fn current_revision(&self, id: NoteId) -> StoreResult<NoteRev> {
        self.conn
            .query_row(
                "SELECT note_id, blob_sha256, timestamp, seq
                 FROM note_rev
                 WHERE note_id = ?1
                 ORDER BY timestamp DESC, seq DESC
                 LIMIT 1",
                [id.as_i64()],
                rev_from_row,
            )
            .optional()?
            .ok_or(StoreError::NoteNotFound { id })
    }

    /// Returns a note's full revision history, oldest first.
    pub fn revision_history(&self, id: NoteId) -> StoreResult<Vec<NoteRev>> {
        let mut stmt = self.conn.prepare(
            "SELECT note_id, blob_sha256, timestamp, seq
             FROM note_rev
             WHERE note_id = ?1
             ORDER BY timestamp ASC, seq ASC",
        )?;

        let revs: Vec<NoteRev> = stmt
            .query_map([id.as_i64()], rev_from_row)?
            .collect::<rusqlite::Result<_>>()?;

        if revs.is_empty() {
            return Err(StoreError::NoteNotFound { id });
        }
        Ok(revs)
    }

    /// Returns one entry per note, its current revision, most recently
    /// touched first. The primary listing view for browsing consumers.
    pub fn list_current_revisions(&self) -> StoreResult<Vec<NoteRev>> {
        let mut stmt = self.conn.prepare(
            "SELECT note_id, blob_sha256, timestamp, seq
             FROM note_rev AS r
             WHERE seq = (
                 SELECT seq FROM note_rev
                 WHERE note_id = r.note_id
                 ORDER BY timestamp DESC, seq DESC
                 LIMIT 1
             )
             ORDER BY timestamp DESC, seq DESC",
        )?;

        let revs = stmt
            .query_map([], rev_from_row)?
            .collect::<rusqlite::Result<_>>()?;
        Ok(revs)
    }

    /// Resolves a revision by its row sequence number.
    pub fn revision_by_seq(&self, seq: i64) -> StoreResult<NoteRev> {
        self.conn
            .query_row(
                "SELECT note_id, blob_sha256, timestamp, seq
                 FROM note_rev WHERE seq = ?1",
                [seq],
                rev_from_row,
            )
            .optional()?
            .ok_or(StoreError::RevisionNotFound { seq })
    }
}
