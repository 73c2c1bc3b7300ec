//! Schema migrations for the nest file.
//!
//! Migrations are forward-only and numbered from 1. Each applied version is
//! recorded in `schema_version`; opening a store that is already up to date
//! is a successful no-op.

use super::{Repository, StoreError, StoreResult};
use rusqlite::Connection;

impl Repository {
    /// Highest schema version applied to this store.
    pub fn schema_version(&self) -> StoreResult<i64> {
        Ok(schema_version(&self.conn)?)
    }
}

/// Initial schema: identity, content-addressed blobs, the append-only
/// revision ledger, flat config, and the derived full-text index.
///
/// The FTS table is keyed by `rowid = note_rev.seq` and is kept in sync by
/// the trigger below, not by application code: inserting a revision drops
/// the note's previous index row, so the indexed set is always exactly the
/// current revision of every note.
const MIGRATION_1: &str = "
    CREATE TABLE note (
        id INTEGER PRIMARY KEY
    );

    CREATE TABLE blob (
        sha256 TEXT PRIMARY KEY,
        body BLOB NOT NULL
    ) WITHOUT ROWID;

    CREATE TABLE note_rev (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        note_id INTEGER NOT NULL REFERENCES note(id),
        blob_sha256 TEXT NOT NULL REFERENCES blob(sha256),
        timestamp TEXT NOT NULL
    );

    CREATE INDEX idx_note_rev_note_id ON note_rev(note_id);

    CREATE TABLE config (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    INSERT INTO config (key, value) VALUES ('editor', 'vi');
    INSERT INTO config (key, value) VALUES ('stop_words', '');

    CREATE VIRTUAL TABLE note_fts USING fts5(body);
    CREATE VIRTUAL TABLE note_fts_vocab USING fts5vocab('note_fts', 'col');
    CREATE VIRTUAL TABLE note_fts_instances USING fts5vocab('note_fts', 'instance');

    CREATE TRIGGER note_rev_fts_sync AFTER INSERT ON note_rev BEGIN
        DELETE FROM note_fts
        WHERE rowid IN (
            SELECT seq FROM note_rev
            WHERE note_id = NEW.note_id AND seq <> NEW.seq
        );
        INSERT INTO note_fts (rowid, body)
        SELECT NEW.seq, CAST(body AS TEXT) FROM blob
        WHERE sha256 = NEW.blob_sha256;
    END;
";

const MIGRATIONS: &[&str] = &[MIGRATION_1];

/// Applies all pending migrations.
///
/// Each migration runs inside its own transaction together with the
/// `schema_version` bookkeeping row, so a failed migration leaves no
/// partially-applied schema behind.
pub(crate) fn migrate(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    let current: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |row| {
            row.get(0)
        })?;

    for (i, sql) in MIGRATIONS.iter().enumerate() {
        let version = i as i64 + 1;
        if version <= current {
            continue;
        }

        let apply = || -> rusqlite::Result<()> {
            conn.execute_batch("BEGIN")?;
            conn.execute_batch(sql)?;
            conn.execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
                [version],
            )?;
            conn.execute_batch("COMMIT")?;
            Ok(())
        };

        if let Err(source) = apply() {
            let _ = conn.execute_batch("ROLLBACK");
            return Err(StoreError::Migration { version, source });
        }
    }

    Ok(())
}

/// Returns the highest applied schema version.
pub fn schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |row| {
        row.get(0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn migrated_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        conn
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?",
            [name],
            |_| Ok(()),
        )
        .is_ok()
    }

    #[test]
    fn migrate_creates_all_tables() {
        let conn = migrated_connection();
        for table in ["note", "blob", "note_rev", "config", "note_fts", "schema_version"] {
            assert!(table_exists(&conn, table), "{table} should exist");
        }
    }

    #[test]
    fn migrate_is_idempotent() {
        let conn = migrated_connection();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 1);
    }

    #[test]
    fn migrate_seeds_config_defaults() {
        let conn = migrated_connection();
        let editor: String = conn
            .query_row("SELECT value FROM config WHERE key='editor'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(editor, "vi");
    }

    #[test]
    fn fts_trigger_indexes_inserted_revision() {
        let conn = migrated_connection();
        conn.execute("INSERT INTO note DEFAULT VALUES", []).unwrap();
        conn.execute(
            "INSERT INTO blob (sha256, body) VALUES ('aa', ?1)",
            [b"searchable text".as_slice()],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO note_rev (note_id, blob_sha256, timestamp) VALUES (1, 'aa', 't1')",
            [],
        )
        .unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM note_fts WHERE note_fts MATCH 'searchable'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn fts_trigger_evicts_previous_revision_of_same_note() {
        let conn = migrated_connection();
        conn.execute("INSERT INTO note DEFAULT VALUES", []).unwrap();
        conn.execute(
            "INSERT INTO blob (sha256, body) VALUES ('aa', ?1)",
            [b"cats".as_slice()],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO blob (sha256, body) VALUES ('bb', ?1)",
            [b"dogs".as_slice()],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO note_rev (note_id, blob_sha256, timestamp) VALUES (1, 'aa', 't1')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO note_rev (note_id, blob_sha256, timestamp) VALUES (1, 'bb', 't2')",
            [],
        )
        .unwrap();

        let cats: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM note_fts WHERE note_fts MATCH 'cats'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        let dogs: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM note_fts WHERE note_fts MATCH 'dogs'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(cats, 0, "old revision should leave the index");
        assert_eq!(dogs, 1);
    }
}
