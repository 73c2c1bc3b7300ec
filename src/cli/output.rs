//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::NoteRev;
use crate::infra::first_line;
use crate::store::SearchHit;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Timestamp layout used in human-readable listings.
pub const TIMESTAMP_LAYOUT: &str = "%Y-%m-%d %H:%M:%S";

/// One revision in listing output (`browse`, `history`, `word-cloud --term`).
#[derive(Debug, Serialize)]
pub struct RevListing {
    pub id: i64,
    pub seq: i64,
    pub sha256: String,
    pub modified: String,
    pub preview: String,
}

impl RevListing {
    /// Builds a listing row from a revision and the head bytes of its blob.
    pub fn from_rev(rev: &NoteRev, head: &[u8]) -> Self {
        Self {
            id: rev.note_id.as_i64(),
            seq: rev.seq,
            sha256: rev.sha256.as_str().to_string(),
            modified: rev.timestamp.format(TIMESTAMP_LAYOUT).to_string(),
            preview: first_line(head),
        }
    }

    pub fn human_line(&self) -> String {
        format!("{}  [{}] {}", self.modified, self.id, self.preview)
    }
}

/// One search result row.
#[derive(Debug, Serialize)]
pub struct SearchListing {
    pub id: i64,
    pub seq: i64,
    pub rank: f64,
    pub snippet: String,
}

impl SearchListing {
    pub fn from_hit(hit: &SearchHit, id: i64) -> Self {
        Self {
            id,
            seq: hit.seq,
            rank: hit.rank,
            snippet: hit.snippet.clone(),
        }
    }

    pub fn human_line(&self) -> String {
        format!("[{}] {}", self.id, self.snippet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlobHash, NoteId};
    use chrono::{TimeZone, Utc};

    #[test]
    fn rev_listing_formats_human_line() {
        let rev = NoteRev {
            note_id: NoteId::new(3),
            sha256: BlobHash::compute(b"grocery list\nmilk"),
            timestamp: Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap(),
            seq: 7,
        };
        let listing = RevListing::from_rev(&rev, b"grocery list\nmilk");
        assert_eq!(
            listing.human_line(),
            "2024-02-01 09:30:00  [3] grocery list"
        );
    }

    #[test]
    fn rev_listing_serializes_all_fields() {
        let rev = NoteRev {
            note_id: NoteId::new(1),
            sha256: BlobHash::compute(b"x"),
            timestamp: Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap(),
            seq: 1,
        };
        let json = serde_json::to_value(RevListing::from_rev(&rev, b"x")).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["preview"], "x");
        assert!(json["sha256"].as_str().unwrap().len() == 64);
    }
}
