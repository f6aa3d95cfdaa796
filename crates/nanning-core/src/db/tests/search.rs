use crate::config::{SearchConfig, StoreConfig};
use crate::db::schema::drop_search_index;
use crate::db::Database;
use crate::document::{DocumentUpdate, NewDocument};
use tempfile::tempdir;

use super::open_db;

fn titles(docs: Vec<crate::document::Document>) -> Vec<String> {
    docs.into_iter().map(|d| d.title).collect()
}

fn seed(db: &crate::db::Database) {
    db.create_document(
        &NewDocument::new("d1", "Quarterly report").with_content("Revenue grew in the north region"),
    )
    .unwrap();
    db.create_document(
        &NewDocument::new("d2", "Shopping list").with_content("Milk, eggs and a quarterly magazine"),
    )
    .unwrap();
    db.create_document(&NewDocument::new("d3", "Holiday plans").with_content("Beach"))
        .unwrap();
}

#[test]
fn test_search_matches_title_and_content() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    seed(&db);

    let results = titles(db.search_documents("quarterly").unwrap());

    assert_eq!(results, vec!["Shopping list", "Quarterly report"]);
}

#[test]
fn test_search_terms_are_anded() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    seed(&db);

    let results = titles(db.search_documents("quarterly revenue").unwrap());

    assert_eq!(results, vec!["Quarterly report"]);
}

#[test]
fn test_search_empty_query_returns_nothing() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    seed(&db);

    assert!(db.search_documents("").unwrap().is_empty());
    assert!(db.search_documents("   ").unwrap().is_empty());
}

#[test]
fn test_search_excludes_deleted_documents() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    seed(&db);

    db.delete_document("d1").unwrap();

    assert_eq!(
        titles(db.search_documents("quarterly").unwrap()),
        vec!["Shopping list"]
    );
}

#[test]
fn test_search_tolerates_query_syntax() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    seed(&db);

    for query in ["title:beach", "AND", "NEAR(", "beach*", "\"beach"] {
        db.search_documents(query).unwrap();
    }
}

#[test]
fn test_index_entry_mirrors_document() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    db.create_document(&NewDocument::new("d1", "Ünïcode  title").with_content("line one\nline two"))
        .unwrap();
    db.update_document("d1", &DocumentUpdate::default().content("replaced\tbody"))
        .unwrap();

    let entries: Vec<(String, String)> = db
        .conn
        .prepare("SELECT title, content FROM documents_fts WHERE id = 'd1'")
        .unwrap()
        .query_map([], |r| Ok((r.get(0)?, r.get(1)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        entries,
        vec![("Ünïcode  title".to_string(), "replaced\tbody".to_string())]
    );
}

#[test]
fn test_update_replaces_index_entry() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    seed(&db);

    db.update_document("d3", &DocumentUpdate::default().content("Mountains"))
        .unwrap();

    assert!(db.search_documents("beach").unwrap().is_empty());
    assert_eq!(
        titles(db.search_documents("mountains").unwrap()),
        vec!["Holiday plans"]
    );
}

#[test]
fn test_delete_removes_index_entry() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    seed(&db);

    db.delete_document("d3").unwrap();

    let count: i64 = db
        .conn
        .query_row("SELECT COUNT(*) FROM documents_fts WHERE id = 'd3'", [], |r| {
            r.get(0)
        })
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn test_search_falls_back_without_index() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    seed(&db);
    let indexed = titles(db.search_documents("quarterly").unwrap());

    drop_search_index(&db.conn).unwrap();

    assert!(!db.has_search_index().unwrap());
    assert_eq!(titles(db.search_documents("quarterly").unwrap()), indexed);
    assert_eq!(
        titles(db.search_documents("QUARTERLY revenue").unwrap()),
        vec!["Quarterly report"]
    );
}

#[test]
fn test_writes_succeed_without_index() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    drop_search_index(&db.conn).unwrap();

    db.create_document(&NewDocument::new("d1", "Unindexed").with_content("still findable"))
        .unwrap();
    db.update_document("d1", &DocumentUpdate::default().title("Renamed"))
        .unwrap();

    assert_eq!(
        titles(db.search_documents("findable").unwrap()),
        vec!["Renamed"]
    );
}

#[test]
fn test_fallback_matches_wildcards_literally() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    db.create_document(&NewDocument::new("d1", "Sale").with_content("50% off"))
        .unwrap();
    db.create_document(&NewDocument::new("d2", "Other").with_content("500 items"))
        .unwrap();
    drop_search_index(&db.conn).unwrap();

    assert_eq!(titles(db.search_documents("50%").unwrap()), vec!["Sale"]);
    assert!(db.search_documents("_").unwrap().is_empty());
}

#[test]
fn test_rebuild_restores_index() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    seed(&db);
    db.delete_document("d2").unwrap();
    drop_search_index(&db.conn).unwrap();

    let written = db.rebuild_search_index().unwrap();

    assert_eq!(written, 2);
    assert!(db.has_search_index().unwrap());
    assert_eq!(db.stats().unwrap().index_entries, Some(2));
    assert_eq!(
        titles(db.search_documents("quarterly").unwrap()),
        vec!["Quarterly report"]
    );
}

#[test]
fn test_index_created_later_covers_existing_documents() {
    let dir = tempdir().unwrap();
    let without_index = StoreConfig {
        search: SearchConfig {
            full_text: false,
            ..SearchConfig::default()
        },
        ..StoreConfig::default()
    };
    let db = Database::open(dir.path(), &without_index).unwrap();
    seed(&db);
    db.delete_document("d2").unwrap();
    db.close().unwrap();

    let db = open_db(dir.path());

    assert!(db.has_search_index().unwrap());
    assert_eq!(db.stats().unwrap().index_entries, Some(2));
    assert_eq!(
        titles(db.search_documents("quarterly").unwrap()),
        vec!["Quarterly report"]
    );
}

#[test]
fn test_reopen_keeps_existing_index_entries() {
    let dir = tempdir().unwrap();
    let db = open_db(dir.path());
    seed(&db);
    db.close().unwrap();

    let db = open_db(dir.path());

    assert_eq!(db.stats().unwrap().index_entries, Some(3));
}
