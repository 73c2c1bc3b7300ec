//! Read views over the derived full-text index.
//!
//! The index itself is maintained by the `note_rev_fts_sync` trigger; this
//! module only queries it. Because the trigger evicts a note's previous
//! revision on every append, all queries here see exactly the current
//! revision of each note.

use super::{decode_timestamp, Repository, SearchHit, StoreResult, TermStat};
use crate::domain::{BlobHash, NoteId, NoteRev};
use std::collections::HashSet;

/// Snippet shape: a 20-token context window with visible markers around the
/// matched span and an ellipsis where the window truncates the body.
const SNIPPET_START: &str = "👉 ";
const SNIPPET_END: &str = " 👈";
const SNIPPET_ELLIPSIS: &str = "...";
const SNIPPET_TOKENS: i64 = 20;

impl Repository {
    /// Full-text search over current revisions.
    ///
    /// `term` uses FTS5 query syntax. Results are ordered by ascending BM25
    /// rank (most relevant first) and carry a highlighted snippet.
    pub fn search(&self, term: &str) -> StoreResult<Vec<SearchHit>> {
        let sql = format!(
            "SELECT note_fts.rowid,
                    note_rev.blob_sha256,
                    bm25(note_fts),
                    snippet(note_fts, 0, '{SNIPPET_START}', '{SNIPPET_END}', '{SNIPPET_ELLIPSIS}', {SNIPPET_TOKENS})
             FROM note_fts
             JOIN note_rev ON note_rev.seq = note_fts.rowid
             WHERE note_fts MATCH ?1
             ORDER BY bm25(note_fts)",
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let hits = stmt
            .query_map(
                [term],
                |row| {
                    let seq: i64 = row.get(0)?;
                    let sha: String = row.get(1)?;
                    let rank: f64 = row.get(2)?;
                    let snippet: String = row.get(3)?;

                    let sha256 = BlobHash::from_hex(&sha).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            1,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?;

                    Ok(SearchHit {
                        seq,
                        sha256,
                        rank,
                        snippet,
                    })
                },
            )?
            .collect::<rusqlite::Result<_>>()?;

        Ok(hits)
    }

    /// Aggregates the index vocabulary into term statistics, ordered by
    /// total occurrence count descending.
    ///
    /// Terms in the `stop_words` config set (space-separated, empty by
    /// default) are excluded.
    pub fn word_cloud_terms(&self) -> StoreResult<Vec<TermStat>> {
        let stop_words: HashSet<String> = self
            .config_get("stop_words")
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let mut stmt = self.conn.prepare(
            "SELECT term, doc, cnt
             FROM note_fts_vocab
             WHERE col = 'body'
             ORDER BY cnt DESC, term ASC",
        )?;

        let terms: Vec<TermStat> = stmt
            .query_map([], |row| {
                Ok(TermStat {
                    term: row.get(0)?,
                    note_count: row.get(1)?,
                    instance_count: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;

        Ok(terms
            .into_iter()
            .filter(|t| !stop_words.contains(&t.term))
            .collect())
    }

    /// Returns every current revision whose indexed content contains `term`,
    /// deduplicated by note.
    pub fn term_instances(&self, term: &str) -> StoreResult<Vec<NoteRev>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT note_rev.note_id,
                    note_rev.blob_sha256,
                    note_rev.timestamp,
                    note_rev.seq
             FROM note_fts_instances
             JOIN note_rev ON note_rev.seq = note_fts_instances.doc
             WHERE note_fts_instances.term = ?1
               AND note_fts_instances.col = 'body'
             ORDER BY note_rev.note_id ASC",
        )?;

        let revs = stmt
            .query_map([term], |row| {
                let note_id: i64 = row.get(0)?;
                let sha: String = row.get(1)?;
                let ts: String = row.get(2)?;
                let seq: i64 = row.get(3)?;

                let sha256 = BlobHash::from_hex(&sha).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        1,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;

                Ok(NoteRev {
                    note_id: NoteId::new(note_id),
                    sha256,
                    timestamp: decode_timestamp(&ts)?,
                    seq,
                })
            })?
            .collect::<rusqlite::Result<_>>()?;

        Ok(revs)
    }
}
