//! Connection management and transaction support for [`Repository`].

use super::schema::migrate;
use super::{Clock, Repository, StoreError, StoreResult, SystemClock, NEST_FILE_NAME};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};

impl Repository {
    // ===========================================
    // Opening
    // ===========================================

    /// Opens (or creates) a nest file and brings its schema up to date.
    ///
    /// Running pending migrations on open is idempotent: an already-current
    /// store is a successful no-op.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::open_with_clock(path, Box::new(SystemClock))
    }

    /// Opens a nest file with an explicit clock. Used by tests to drive
    /// deterministic revision timestamps.
    pub fn open_with_clock(path: &Path, clock: Box<dyn Clock>) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        Self::from_connection(conn, clock)
    }

    /// Opens an in-memory store. Useful for tests and throwaway sessions.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::open_in_memory_with_clock(Box::new(SystemClock))
    }

    /// In-memory store with an explicit clock.
    pub fn open_in_memory_with_clock(clock: Box<dyn Clock>) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn, clock)
    }

    fn from_connection(conn: Connection, clock: Box<dyn Clock>) -> StoreResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrate(&conn)?;
        Ok(Self { conn, clock })
    }

    /// Resolves the nest file path: an explicit path wins, otherwise the
    /// first existing default location (home directory, then working
    /// directory). Returns `None` when no nest file exists yet.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(p) = explicit {
            return Some(p.to_path_buf());
        }

        [dirs::home_dir().map(|h| h.join(NEST_FILE_NAME)), Some(PathBuf::from(NEST_FILE_NAME))]
            .into_iter()
            .flatten()
            .find(|p| p.exists())
    }

    /// Default location for a new nest file.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(NEST_FILE_NAME)
    }

    // ===========================================
    // Transactions
    // ===========================================

    /// Begins a transaction that rolls back on drop unless committed.
    pub(crate) fn transaction(&mut self) -> StoreResult<Transaction<'_>> {
        self.conn.execute_batch("BEGIN")?;
        Ok(Transaction {
            conn: &self.conn,
            finished: false,
        })
    }
}

/// RAII transaction over the repository connection.
///
/// Dropping without an explicit [`commit`](Transaction::commit) rolls back,
/// so an early `?` return inside a multi-step write leaves no partial state.
pub(crate) struct Transaction<'a> {
    conn: &'a Connection,
    finished: bool,
}

impl Transaction<'_> {
    pub(crate) fn conn(&self) -> &Connection {
        self.conn
    }

    pub(crate) fn commit(mut self) -> StoreResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            // Best effort; rollback errors cannot be surfaced from drop.
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}
