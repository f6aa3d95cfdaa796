//! Full-text search over documents
//!
//! The FTS5 table is maintained explicitly from the document write path:
//! `create_document` calls [`index_document`], `update_document` (and so
//! `delete_document`) calls [`unindex_document`] and then re-indexes active
//! rows, all inside the caller's transaction. When the table is missing,
//! writes skip it and queries fall back to substring matching.

use rusqlite::{params, Connection};

use crate::document::Document;
use crate::error::{NanningError, Result};
use crate::map_db_err;
use crate::trace_time;

use super::documents::query_documents;
use super::schema::{
    has_search_index, search_index_sql, POPULATE_SEARCH_INDEX_SQL, SEARCH_INDEX_TABLE,
};

const JOINED_DOCUMENT_COLUMNS: &str = "d.id, d.title, d.content, d.type, d.language, d.folder_id, d.tags, d.created_at, d.updated_at, d.is_deleted";

/// Add the index entry for a document
pub(super) fn index_document(conn: &Connection, id: &str, title: &str, content: &str) -> Result<()> {
    if !has_search_index(conn)? {
        tracing::trace!(id, "search index absent, skipping insert");
        return Ok(());
    }
    conn.execute(
        "INSERT INTO documents_fts (id, title, content) VALUES (?1, ?2, ?3)",
        params![id, title, content],
    )
    .map_err(|e| NanningError::storage(format!("index document {}", id), e))?;
    Ok(())
}

/// Remove every index entry for a document
pub(super) fn unindex_document(conn: &Connection, id: &str) -> Result<()> {
    if !has_search_index(conn)? {
        return Ok(());
    }
    conn.execute("DELETE FROM documents_fts WHERE id = ?1", params![id])
        .map_err(|e| NanningError::storage(format!("unindex document {}", id), e))?;
    Ok(())
}

/// Turn free text into an FTS5 expression: every whitespace-separated term
/// becomes a quoted string, and the terms are ANDed. Operators, column
/// filters and stray quotes in the input are matched literally.
pub(crate) fn match_expression(query: &str) -> String {
    query
        .split_whitespace()
        .map(|term| format!("\"{}\"", term.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Escape `%`, `_` and the escape character itself for `LIKE ... ESCAPE '\'`
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// The table can vanish between the structural check and the query
fn is_missing_index(reason: &str) -> bool {
    reason.contains(&format!("no such table: {}", SEARCH_INDEX_TABLE))
}

impl super::Database {
    /// Search active documents by title and content, most recently updated
    /// first.
    ///
    /// Uses the full-text index when it exists and substring matching when
    /// it does not; the caller cannot tell the difference.
    #[tracing::instrument(skip(self))]
    pub fn search_documents(&self, query: &str) -> Result<Vec<Document>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let start = std::time::Instant::now();
        let results = match self.search_index(query) {
            Err(NanningError::IndexUnavailable) => {
                tracing::debug!("search index unavailable, using substring fallback");
                self.search_fallback(query)
            }
            other => other,
        };
        trace_time!(start, "search_documents");
        results
    }

    fn search_index(&self, query: &str) -> Result<Vec<Document>> {
        if !has_search_index(&self.conn)? {
            return Err(NanningError::IndexUnavailable);
        }

        // Filter on the live flag of the joined row; index presence alone is
        // not proof of visibility.
        let sql = format!(
            "SELECT {} FROM documents_fts
             JOIN documents d ON d.id = documents_fts.id
             WHERE documents_fts MATCH ?1 AND d.is_deleted = 0
             ORDER BY d.updated_at DESC, d.rowid DESC",
            JOINED_DOCUMENT_COLUMNS
        );
        let expr = match_expression(query);

        query_documents(
            &self.conn,
            &sql,
            &[&expr as &dyn rusqlite::ToSql],
            "search documents",
        )
        .map_err(|e| match e {
            NanningError::Storage { ref reason, .. } if is_missing_index(reason) => {
                NanningError::IndexUnavailable
            }
            other => other,
        })
    }

    fn search_fallback(&self, query: &str) -> Result<Vec<Document>> {
        let patterns: Vec<String> = query.split_whitespace().map(like_pattern).collect();

        let mut sql = format!(
            "SELECT {} FROM documents WHERE is_deleted = 0",
            super::documents::DOCUMENT_COLUMNS
        );
        for n in 1..=patterns.len() {
            sql.push_str(&format!(
                " AND (title LIKE ?{n} ESCAPE '\\' OR content LIKE ?{n} ESCAPE '\\')"
            ));
        }
        sql.push_str(" ORDER BY updated_at DESC, rowid DESC");

        let params: Vec<&dyn rusqlite::ToSql> =
            patterns.iter().map(|p| p as &dyn rusqlite::ToSql).collect();
        query_documents(&self.conn, &sql, &params, "search documents (fallback)")
    }

    /// Whether the full-text index currently exists
    pub fn has_search_index(&self) -> Result<bool> {
        has_search_index(&self.conn)
    }

    /// Drop, recreate and repopulate the full-text index from active
    /// documents. Returns the number of entries written.
    #[tracing::instrument(skip(self))]
    pub fn rebuild_search_index(&self) -> Result<usize> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(map_db_err!("begin index rebuild transaction"))?;

        tx.execute_batch("DROP TABLE IF EXISTS documents_fts")
            .map_err(map_db_err!("drop search index"))?;
        tx.execute(&search_index_sql(self.search.tokenizer), [])
            .map_err(map_db_err!("create search index"))?;
        let written = tx
            .execute(POPULATE_SEARCH_INDEX_SQL, [])
            .map_err(map_db_err!("populate search index"))?;

        tx.commit()
            .map_err(map_db_err!("commit index rebuild transaction"))?;

        tracing::info!(entries = written, "search index rebuilt");
        Ok(written)
    }
}
