//! `nanning doc` handlers

use crate::cli::doc::{CreateArgs, UpdateArgs};
use crate::commands::dispatch::CommandContext;
use crate::commands::output::{emit, print_document, print_document_line, read_stdin};
use nanning_core::document::{DocumentStatus, DocumentUpdate, NewDocument};
use nanning_core::error::Result;

pub fn handle_create(ctx: &CommandContext, args: &CreateArgs) -> Result<()> {
    let content = match &args.content {
        Some(content) => content.clone(),
        None => read_stdin()?.unwrap_or_default(),
    };

    let mut doc = NewDocument::new(&args.id, &args.title)
        .with_content(content)
        .with_tags(&args.tag);
    if let Some(doc_type) = args.r#type {
        doc = doc.with_type(doc_type);
    }
    if let Some(language) = &args.language {
        doc = doc.with_language(language);
    }
    if let Some(folder) = &args.folder {
        doc = doc.with_folder(folder);
    }

    let created = ctx.with_db(|db| db.create_document(&doc))?;
    emit(ctx, &created, |d| println!("Created {}", d.id))
}

pub fn handle_update(ctx: &CommandContext, args: &UpdateArgs) -> Result<()> {
    let mut update = DocumentUpdate::default();
    if let Some(title) = &args.title {
        update = update.title(title);
    }
    if let Some(content) = &args.content {
        update = update.content(content);
    }
    if let Some(doc_type) = args.r#type {
        update = update.doc_type(doc_type);
    }
    if let Some(language) = &args.language {
        update = update.language(language);
    }
    if args.no_folder {
        update = update.folder(None);
    } else if let Some(folder) = &args.folder {
        update = update.folder(Some(folder.clone()));
    }
    if args.clear_tags {
        update = update.tags(Vec::<String>::new());
    } else if !args.tag.is_empty() {
        update = update.tags(&args.tag);
    }

    let updated = ctx.with_db(|db| db.update_document(&args.id, &update))?;
    emit(ctx, &updated, |d| println!("Updated {}", d.id))
}

pub fn handle_get(ctx: &CommandContext, id: &str) -> Result<()> {
    let doc = ctx.with_db(|db| db.get_document(id))?;
    emit(ctx, &doc, print_document)
}

pub fn handle_list(ctx: &CommandContext) -> Result<()> {
    let docs = ctx.with_db(|db| db.list_documents())?;
    emit(ctx, &docs, |docs| {
        if docs.is_empty() {
            println!("No documents");
        }
        for doc in docs {
            print_document_line(doc);
        }
    })
}

pub fn handle_delete(ctx: &CommandContext, id: &str) -> Result<()> {
    ctx.with_db(|db| db.delete_document(id))?;
    emit(ctx, &serde_json::json!({ "id": id, "deleted": true }), |_| {
        println!("Deleted {}", id)
    })
}

pub fn handle_restore(ctx: &CommandContext, id: &str) -> Result<()> {
    let restored = ctx.with_db(|db| {
        db.update_document(id, &DocumentUpdate::default().status(DocumentStatus::Active))
    })?;
    emit(ctx, &restored, |d| println!("Restored {}", d.id))
}
