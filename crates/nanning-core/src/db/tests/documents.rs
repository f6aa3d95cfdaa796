use crate::document::{DocumentStatus, DocumentType, DocumentUpdate, NewDocument};
use crate::error::NanningError;
use tempfile::tempdir;

use super::open_db;

#[test]
fn test_create_and_get_document() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());

    let created = db
        .create_document(
            &NewDocument::new("d1", "Meeting notes")
                .with_content("Agenda")
                .with_type(DocumentType::Markdown)
                .with_folder("work")
                .with_tags(["a", "b"]),
        )
        .unwrap();

    let fetched = db.get_document("d1").unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.doc_type, DocumentType::Markdown);
    assert_eq!(fetched.language, "plaintext");
    assert_eq!(fetched.folder_id.as_deref(), Some("work"));
    assert_eq!(fetched.tags, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(fetched.status, DocumentStatus::Active);
    assert_eq!(fetched.created_at, fetched.updated_at);
}

#[test]
fn test_create_duplicate_id_is_constraint_violation() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());

    db.create_document(&NewDocument::new("d1", "First")).unwrap();
    let err = db
        .create_document(&NewDocument::new("d1", "Second"))
        .unwrap_err();

    assert!(matches!(err, NanningError::ConstraintViolation { .. }));
    assert_eq!(db.get_document("d1").unwrap().title, "First");
}

#[test]
fn test_create_requires_title() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());

    let err = db.create_document(&NewDocument::new("d1", "")).unwrap_err();

    assert!(matches!(err, NanningError::InvalidInput { field: "title", .. }));
    assert!(db.find_document("d1").unwrap().is_none());
}

#[test]
fn test_update_changes_only_given_fields() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    let created = db
        .create_document(
            &NewDocument::new("d1", "Draft")
                .with_content("old body")
                .with_tags(["keep"]),
        )
        .unwrap();

    let updated = db
        .update_document("d1", &DocumentUpdate::default().content("new body"))
        .unwrap();

    assert_eq!(updated.title, "Draft");
    assert_eq!(updated.content, "new body");
    assert_eq!(updated.tags, vec!["keep".to_string()]);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(db.get_document("d1").unwrap(), updated);
}

#[test]
fn test_update_can_clear_folder() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    db.create_document(&NewDocument::new("d1", "Filed").with_folder("f1"))
        .unwrap();

    let updated = db
        .update_document("d1", &DocumentUpdate::default().folder(None))
        .unwrap();

    assert_eq!(updated.folder_id, None);
}

#[test]
fn test_update_missing_document_is_not_found() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());

    let err = db
        .update_document("nope", &DocumentUpdate::default().title("x"))
        .unwrap_err();

    assert!(matches!(err, NanningError::NotFound { entity: "document", .. }));
}

#[test]
fn test_update_rejects_empty_title() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    db.create_document(&NewDocument::new("d1", "Title")).unwrap();

    let err = db
        .update_document("d1", &DocumentUpdate::default().title("   "))
        .unwrap_err();

    assert!(matches!(err, NanningError::InvalidInput { .. }));
    assert_eq!(db.get_document("d1").unwrap().title, "Title");
}

#[test]
fn test_delete_hides_document_but_keeps_row() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    db.create_document(&NewDocument::new("d1", "Gone")).unwrap();
    db.create_document(&NewDocument::new("d2", "Stays")).unwrap();

    db.delete_document("d1").unwrap();

    assert!(db.find_document("d1").unwrap().is_none());
    assert!(matches!(
        db.get_document("d1"),
        Err(NanningError::NotFound { .. })
    ));
    let listed: Vec<_> = db
        .list_documents()
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(listed, vec!["d2".to_string()]);

    let (rows, flag): (i64, i64) = db
        .conn
        .query_row(
            "SELECT COUNT(*), MAX(is_deleted) FROM documents WHERE id = 'd1'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!((rows, flag), (1, 1));
}

#[test]
fn test_delete_twice_is_not_found() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    db.create_document(&NewDocument::new("d1", "Once")).unwrap();

    db.delete_document("d1").unwrap();
    let err = db.delete_document("d1").unwrap_err();

    assert!(matches!(err, NanningError::NotFound { .. }));
}

#[test]
fn test_update_deleted_document_is_not_found() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    db.create_document(&NewDocument::new("d1", "Gone")).unwrap();
    db.delete_document("d1").unwrap();

    let err = db
        .update_document("d1", &DocumentUpdate::default().title("Back?"))
        .unwrap_err();

    assert!(matches!(err, NanningError::NotFound { .. }));
}

#[test]
fn test_restore_deleted_document() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    db.create_document(&NewDocument::new("d1", "Phoenix").with_content("ashes"))
        .unwrap();
    db.delete_document("d1").unwrap();

    let restored = db
        .update_document(
            "d1",
            &DocumentUpdate::default().status(DocumentStatus::Active),
        )
        .unwrap();

    assert_eq!(restored.status, DocumentStatus::Active);
    assert_eq!(db.get_document("d1").unwrap().title, "Phoenix");
    assert_eq!(db.search_documents("ashes").unwrap().len(), 1);
}

#[test]
fn test_list_orders_by_most_recent_update() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    for id in ["a", "b", "c"] {
        db.create_document(&NewDocument::new(id, id)).unwrap();
    }
    db.update_document("a", &DocumentUpdate::default().content("touched"))
        .unwrap();

    let ids: Vec<_> = db
        .list_documents()
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();

    assert_eq!(ids, vec!["a", "c", "b"]);
}

#[test]
fn test_null_tags_read_as_empty() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    db.conn
        .execute(
            "INSERT INTO documents (id, title, created_at, updated_at)
             VALUES ('raw', 'Raw row', '2026-01-01T00:00:00.000000Z', '2026-01-01T00:00:00.000000Z')",
            [],
        )
        .unwrap();

    let doc = db.get_document("raw").unwrap();

    assert!(doc.tags.is_empty());
    assert_eq!(doc.doc_type, DocumentType::Richtext);
}

#[test]
fn test_malformed_tags_are_corrupt_record() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    db.create_document(&NewDocument::new("d1", "Tagged")).unwrap();
    db.conn
        .execute("UPDATE documents SET tags = '{not json' WHERE id = 'd1'", [])
        .unwrap();

    let err = db.get_document("d1").unwrap_err();

    assert!(matches!(
        err,
        NanningError::CorruptRecord {
            entity: "document",
            field: "tags",
            ..
        }
    ));
    assert!(db.list_documents().is_err());
}

#[test]
fn test_unknown_type_is_corrupt_record() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    db.create_document(&NewDocument::new("d1", "Typed")).unwrap();
    db.conn
        .execute("UPDATE documents SET type = 'spreadsheet' WHERE id = 'd1'", [])
        .unwrap();

    assert!(matches!(
        db.get_document("d1"),
        Err(NanningError::CorruptRecord { field: "type", .. })
    ));
}
