//! Key-value CRUD operations.

use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_VALUE_SQL: &str = "SELECT value FROM kv_entries WHERE key = ?1";
const UPSERT_VALUE_SQL: &str =
    "INSERT INTO kv_entries (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO UPDATE SET value = excluded.value";
const DELETE_VALUE_SQL: &str = "DELETE FROM kv_entries WHERE key = ?1";
const SELECT_KEYS_SQL: &str = "SELECT key FROM kv_entries ORDER BY key";

impl super::Database {
    /// Returns the value stored under `key`, if any.
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_VALUE_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read value")
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(UPSERT_VALUE_SQL, params![key, value])
            .db_context("Failed to write value")?;
        Ok(())
    }

    /// Removes `key`. Returns whether an entry existed.
    pub fn remove_value(&self, key: &str) -> Result<bool> {
        let removed = self
            .connection
            .execute(DELETE_VALUE_SQL, params![key])
            .db_context("Failed to remove value")?;
        Ok(removed > 0)
    }

    /// All stored keys in lexical order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_KEYS_SQL)
            .db_context("Failed to prepare key listing")?;
        let keys = stmt
            .query_map([], |row| row.get(0))
            .db_context("Failed to list keys")?
            .collect::<rusqlite::Result<Vec<String>>>()
            .db_context("Failed to read key")?;
        Ok(keys)
    }
}
