//! SQLite database schema for nanning
//!
//! Every statement is `CREATE ... IF NOT EXISTS`, so `create_schema` runs on
//! every startup. There is no migration step.

use rusqlite::Connection;

use crate::config::{SearchConfig, Tokenizer};
use crate::error::{NanningError, Result};
use crate::map_db_err;

/// Name of the FTS5 table
pub(crate) const SEARCH_INDEX_TABLE: &str = "documents_fts";

const SCHEMA_SQL: &str = r#"
-- Documents; rows are soft-deleted through is_deleted
CREATE TABLE IF NOT EXISTS documents (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    type TEXT NOT NULL DEFAULT 'richtext',
    language TEXT NOT NULL DEFAULT 'plaintext',
    folder_id TEXT,
    tags TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    is_deleted INTEGER NOT NULL DEFAULT 0
);
CREATE INDEX IF NOT EXISTS idx_documents_folder ON documents(folder_id);
CREATE INDEX IF NOT EXISTS idx_documents_created ON documents(created_at);
CREATE INDEX IF NOT EXISTS idx_documents_updated ON documents(updated_at);

CREATE TABLE IF NOT EXISTS folders (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    parent_id TEXT,
    icon TEXT,
    color TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_folders_parent ON folders(parent_id);

CREATE TABLE IF NOT EXISTS tags (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    color TEXT,
    created_at TEXT NOT NULL
);

-- Generic key/value settings
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT,
    updated_at TEXT NOT NULL
);

-- Themes; gradient, colors and glass hold JSON
CREATE TABLE IF NOT EXISTS themes (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    mode TEXT NOT NULL,
    gradient TEXT NOT NULL,
    colors TEXT NOT NULL,
    glass TEXT NOT NULL,
    is_preset INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_themes_updated ON themes(updated_at);
"#;

/// Outcome of schema creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Whether the full-text index exists after creation
    pub search_index: bool,
}

/// Copy every active document into the full-text index
pub(crate) const POPULATE_SEARCH_INDEX_SQL: &str = "INSERT INTO documents_fts (id, title, content)
     SELECT id, title, content FROM documents WHERE is_deleted = 0";

/// DDL for the full-text index. The id column is carried for the join back
/// to `documents` and takes no part in matching.
pub(crate) fn search_index_sql(tokenizer: Tokenizer) -> String {
    format!(
        "CREATE VIRTUAL TABLE IF NOT EXISTS {} USING fts5(id UNINDEXED, title, content, tokenize='{}')",
        SEARCH_INDEX_TABLE,
        tokenizer.as_fts5()
    )
}

/// Ensure every table and index exists.
///
/// Failure to create the primary tables is fatal. Failure to create the
/// full-text index is logged and leaves search on its fallback path.
pub fn create_schema(conn: &Connection, search: &SearchConfig) -> Result<SchemaStatus> {
    conn.execute_batch(SCHEMA_SQL).map_err(|e| {
        NanningError::initialization(format!("failed to create database schema: {}", e))
    })?;

    if search.full_text {
        let existed = has_search_index(conn).map_err(|e| {
            NanningError::initialization(format!("failed to inspect schema: {}", e))
        })?;
        if !existed {
            match build_search_index(conn, search.tokenizer) {
                Ok(entries) => tracing::debug!(entries, "full-text index created"),
                Err(e) => tracing::warn!(error = %e, "failed to create full-text index"),
            }
        }
    }

    let search_index = has_search_index(conn)
        .map_err(|e| NanningError::initialization(format!("failed to inspect schema: {}", e)))?;

    Ok(SchemaStatus { search_index })
}

/// Create the index and fill it from active documents in one transaction.
/// Documents written while the index was absent get their entries here; on
/// failure nothing is left behind.
fn build_search_index(conn: &Connection, tokenizer: Tokenizer) -> rusqlite::Result<usize> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(&search_index_sql(tokenizer), [])?;
    let entries = tx.execute(POPULATE_SEARCH_INDEX_SQL, [])?;
    tx.commit()?;
    Ok(entries)
}

/// Structural check for the full-text index
pub fn has_search_index(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [SEARCH_INDEX_TABLE],
            |r| r.get(0),
        )
        .map_err(map_db_err!("inspect search index"))?;
    Ok(count > 0)
}

#[cfg(test)]
pub(crate) fn drop_search_index(conn: &Connection) -> Result<()> {
    conn.execute_batch("DROP TABLE IF EXISTS documents_fts")
        .map_err(map_db_err!("drop search index"))
}
