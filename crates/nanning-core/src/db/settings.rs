use rusqlite::{params, OptionalExtension};

use crate::bail_invalid;
use crate::error::{NanningError, Result};

use super::clock::format_timestamp;

impl super::Database {
    /// Value stored under `key`, or `None` when the key was never set
    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let value: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |r| r.get(0),
            )
            .optional()
            .map_err(|e| NanningError::storage(format!("get setting {}", key), e))?;
        Ok(value.flatten())
    }

    /// Insert or replace a setting
    #[tracing::instrument(skip(self, value))]
    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        if key.trim().is_empty() {
            bail_invalid!("key", "setting key is required");
        }
        let stamp = format_timestamp(self.clock.now());
        self.conn
            .execute(
                "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, &stamp],
            )
            .map_err(|e| NanningError::storage(format!("set setting {}", key), e))?;
        Ok(())
    }
}
