//! SQLite database module for nanning

mod clock;
mod documents;
mod folders;
mod schema;
mod search;
mod settings;
mod themes;

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use serde::Serialize;

use crate::config::{SearchConfig, StoreConfig};
use crate::error::{NanningError, Result};
use crate::map_db_err;

use clock::Clock;
pub use schema::{create_schema, has_search_index, SchemaStatus};

/// SQLite database for nanning. One per process; owns the only connection.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
    path: PathBuf,
    search: SearchConfig,
    clock: Clock,
}

/// Row counts reported by `stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub documents: i64,
    pub deleted_documents: i64,
    pub folders: i64,
    pub themes: i64,
    pub search_index: bool,
    pub index_entries: Option<i64>,
}

impl Database {
    /// Open or create the database inside `data_dir` and ensure the schema.
    ///
    /// Any failure here is an `InitializationFailure`: the caller must not
    /// continue without storage.
    #[tracing::instrument(skip(config), fields(data_dir = %data_dir.display()))]
    pub fn open(data_dir: &Path, config: &StoreConfig) -> Result<Self> {
        fs::create_dir_all(data_dir).map_err(|e| {
            NanningError::initialization(format!(
                "cannot create data directory {}: {}",
                data_dir.display(),
                e
            ))
        })?;

        let path = data_dir.join(&config.database_file);
        let conn = Connection::open(&path).map_err(|e| {
            NanningError::initialization(format!(
                "cannot open database at {}: {}",
                path.display(),
                e
            ))
        })?;

        conn.pragma_update(None, "journal_mode", config.journal_mode.as_pragma())
            .map_err(|e| {
                NanningError::initialization(format!(
                    "cannot set journal mode on {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let status = create_schema(&conn, &config.search)?;
        if config.search.full_text && !status.search_index {
            tracing::warn!("full-text index unavailable, search will use substring matching");
        }

        tracing::debug!(path = %path.display(), search_index = status.search_index, "database opened");

        Ok(Database {
            conn,
            path,
            search: config.search.clone(),
            clock: Clock::default(),
        })
    }

    /// Path of the storage file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Checkpoint and release the connection
    pub fn close(self) -> Result<()> {
        if let Err(e) = self.conn.pragma_update(None, "wal_checkpoint", "TRUNCATE") {
            tracing::warn!(error = %e, path = %self.path.display(), "checkpoint on close failed");
        }
        self.conn
            .close()
            .map_err(|(_, e)| NanningError::storage("close database", e))
    }

    pub fn stats(&self) -> Result<StoreStats> {
        let count = |sql: &str| -> Result<i64> {
            self.conn
                .query_row(sql, [], |r| r.get(0))
                .map_err(map_db_err!("count rows"))
        };

        let search_index = has_search_index(&self.conn)?;
        let index_entries = if search_index {
            Some(count("SELECT COUNT(*) FROM documents_fts")?)
        } else {
            None
        };

        Ok(StoreStats {
            documents: count("SELECT COUNT(*) FROM documents WHERE is_deleted = 0")?,
            deleted_documents: count("SELECT COUNT(*) FROM documents WHERE is_deleted <> 0")?,
            folders: count("SELECT COUNT(*) FROM folders")?,
            themes: count("SELECT COUNT(*) FROM themes")?,
            search_index,
            index_entries,
        })
    }
}

#[cfg(test)]
mod tests;
