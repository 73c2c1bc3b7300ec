//! Flat key/value configuration, stored inside the nest file.
//!
//! The key set is fixed at initialization (migration 1 seeds the defaults);
//! values are mutated in place and are not versioned.

use super::{Repository, StoreError, StoreResult};
use rusqlite::OptionalExtension;

impl Repository {
    /// Returns the value for `key`.
    pub fn config_get(&self, key: &str) -> StoreResult<String> {
        self.conn
            .query_row("SELECT value FROM config WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?
            .ok_or_else(|| StoreError::ConfigKeyNotFound {
                key: key.to_string(),
            })
    }

    /// Updates the value of an existing key.
    ///
    /// Setting a key that was never configured is an error rather than a
    /// silent zero-row update; the key set is fixed at initialization, so a
    /// miss here can only be a typo.
    pub fn config_set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE config SET value = ?1 WHERE key = ?2",
            [value, key],
        )?;

        if changed == 0 {
            return Err(StoreError::ConfigKeyNotFound {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    /// Enumerates all configured keys.
    pub fn config_keys(&self) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM config ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<_>>()?;
        Ok(keys)
    }
}
