use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::document::{
    decode_tags, encode_tags, Document, DocumentStatus, DocumentType, DocumentUpdate,
    NewDocument,
};
use crate::error::{NanningError, Result};
use crate::map_db_err;

use super::clock::{format_timestamp, parse_timestamp};
use super::search::{index_document, unindex_document};

pub(super) const DOCUMENT_COLUMNS: &str =
    "id, title, content, type, language, folder_id, tags, created_at, updated_at, is_deleted";

/// Raw column values, decoded separately so that decode failures can name
/// the offending field
pub(super) struct DocumentRow {
    id: String,
    title: String,
    content: String,
    doc_type: String,
    language: String,
    folder_id: Option<String>,
    tags: Option<String>,
    created_at: String,
    updated_at: String,
    is_deleted: i64,
}

impl DocumentRow {
    pub(super) fn read(row: &Row) -> rusqlite::Result<Self> {
        Ok(DocumentRow {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            doc_type: row.get(3)?,
            language: row.get(4)?,
            folder_id: row.get(5)?,
            tags: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
            is_deleted: row.get(9)?,
        })
    }

    pub(super) fn decode(self) -> Result<Document> {
        let corrupt = |field, e: &dyn std::fmt::Display| {
            NanningError::corrupt("document", self.id.as_str(), field, e)
        };

        let doc_type = self
            .doc_type
            .parse::<DocumentType>()
            .map_err(|e: String| corrupt("type", &e))?;
        let tags = decode_tags(self.tags.as_deref()).map_err(|e| corrupt("tags", &e))?;
        let created_at = parse_timestamp(&self.created_at).map_err(|e| corrupt("created_at", &e))?;
        let updated_at = parse_timestamp(&self.updated_at).map_err(|e| corrupt("updated_at", &e))?;

        Ok(Document {
            id: self.id,
            title: self.title,
            content: self.content,
            doc_type,
            language: self.language,
            folder_id: self.folder_id,
            tags,
            created_at,
            updated_at,
            status: DocumentStatus::from_flag(self.is_deleted),
        })
    }
}

/// Collect decoded documents from a prepared query
pub(super) fn query_documents(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
    operation: &str,
) -> Result<Vec<Document>> {
    let mut stmt = conn
        .prepare(sql)
        .map_err(|e| NanningError::storage(format!("prepare {}", operation), e))?;
    let rows = stmt
        .query_map(params, DocumentRow::read)
        .map_err(|e| NanningError::storage(operation, e))?;

    let mut docs = Vec::new();
    for row in rows {
        let row = row.map_err(|e| NanningError::storage(format!("read {}", operation), e))?;
        docs.push(row.decode()?);
    }
    Ok(docs)
}

/// Load a row whatever its status
fn load_any(conn: &Connection, id: &str) -> Result<Option<Document>> {
    let sql = format!("SELECT {} FROM documents WHERE id = ?1", DOCUMENT_COLUMNS);
    let row = conn
        .query_row(&sql, params![id], DocumentRow::read)
        .optional()
        .map_err(|e| NanningError::storage(format!("load document {}", id), e))?;
    row.map(DocumentRow::decode).transpose()
}

impl super::Database {
    /// Insert a new document and its search-index entry in one transaction
    #[tracing::instrument(skip(self, doc), fields(id = %doc.id))]
    pub fn create_document(&self, doc: &NewDocument) -> Result<Document> {
        doc.validate()?;
        let tags = encode_tags(&doc.tags)?;
        let now = self.clock.now();
        let stamp = format_timestamp(now);

        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(map_db_err!("begin create transaction"))?;

        tx.execute(
            "INSERT INTO documents (id, title, content, type, language, folder_id, tags, created_at, updated_at, is_deleted)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8, 0)",
            params![
                &doc.id,
                &doc.title,
                &doc.content,
                doc.doc_type.as_str(),
                &doc.language,
                doc.folder_id.as_deref(),
                &tags,
                &stamp,
            ],
        )
        .map_err(|e| NanningError::from_insert("document", &doc.id, e))?;

        index_document(&tx, &doc.id, &doc.title, &doc.content)?;

        tx.commit()
            .map_err(map_db_err!("commit create transaction"))?;

        Ok(Document {
            id: doc.id.clone(),
            title: doc.title.clone(),
            content: doc.content.clone(),
            doc_type: doc.doc_type,
            language: doc.language.clone(),
            folder_id: doc.folder_id.clone(),
            tags: doc.tags.clone(),
            created_at: now,
            updated_at: now,
            status: DocumentStatus::Active,
        })
    }

    /// Apply a partial update.
    ///
    /// A deleted document is `NotFound` unless the update itself sets the
    /// status back to `Active`. The search entry is always replaced, and
    /// only re-added while the document is active.
    #[tracing::instrument(skip(self, update))]
    pub fn update_document(&self, id: &str, update: &DocumentUpdate) -> Result<Document> {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(map_db_err!("begin update transaction"))?;

        let mut doc = load_any(&tx, id)?.ok_or_else(|| NanningError::not_found("document", id))?;
        let was_deleted = !doc.status.is_active();
        if was_deleted && update.status != Some(DocumentStatus::Active) {
            return Err(NanningError::not_found("document", id));
        }

        update.apply_to(&mut doc)?;
        doc.updated_at = self.clock.after(Some(doc.updated_at));
        let tags = encode_tags(&doc.tags)?;

        tx.execute(
            "UPDATE documents
             SET title = ?2, content = ?3, type = ?4, language = ?5, folder_id = ?6,
                 tags = ?7, updated_at = ?8, is_deleted = ?9
             WHERE id = ?1",
            params![
                id,
                &doc.title,
                &doc.content,
                doc.doc_type.as_str(),
                &doc.language,
                doc.folder_id.as_deref(),
                &tags,
                format_timestamp(doc.updated_at),
                doc.status.as_flag(),
            ],
        )
        .map_err(|e| NanningError::storage(format!("update document {}", id), e))?;

        unindex_document(&tx, id)?;
        if doc.status.is_active() {
            index_document(&tx, id, &doc.title, &doc.content)?;
        }

        tx.commit()
            .map_err(map_db_err!("commit update transaction"))?;

        if was_deleted {
            tracing::info!(id, "document restored");
        }
        Ok(doc)
    }

    /// Soft delete: an update that sets the status to `Deleted`
    pub fn delete_document(&self, id: &str) -> Result<()> {
        self.update_document(id, &DocumentUpdate::default().status(DocumentStatus::Deleted))
            .map(|_| ())
    }

    /// Active document by id, or `None`
    pub fn find_document(&self, id: &str) -> Result<Option<Document>> {
        let sql = format!(
            "SELECT {} FROM documents WHERE id = ?1 AND is_deleted = 0",
            DOCUMENT_COLUMNS
        );
        let row = self
            .conn
            .query_row(&sql, params![id], DocumentRow::read)
            .optional()
            .map_err(|e| NanningError::storage(format!("get document {}", id), e))?;
        row.map(DocumentRow::decode).transpose()
    }

    /// Active document by id; deleted and missing documents are `NotFound`
    pub fn get_document(&self, id: &str) -> Result<Document> {
        self.find_document(id)?
            .ok_or_else(|| NanningError::not_found("document", id))
    }

    /// Every active document, most recently updated first
    pub fn list_documents(&self) -> Result<Vec<Document>> {
        let sql = format!(
            "SELECT {} FROM documents WHERE is_deleted = 0 ORDER BY updated_at DESC, rowid DESC",
            DOCUMENT_COLUMNS
        );
        query_documents(&self.conn, &sql, &[], "list documents")
    }
}
