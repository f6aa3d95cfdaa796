//! `nanning index` handlers

use crate::commands::dispatch::CommandContext;
use crate::commands::output::emit;
use nanning_core::error::Result;

pub fn handle_rebuild(ctx: &CommandContext) -> Result<()> {
    let entries = ctx.with_db(|db| db.rebuild_search_index())?;
    emit(ctx, &serde_json::json!({ "entries": entries }), |_| {
        println!("Rebuilt search index ({} documents)", entries)
    })
}

pub fn handle_status(ctx: &CommandContext) -> Result<()> {
    let stats = ctx.with_db(|db| db.stats())?;
    emit(ctx, &stats, |stats| {
        println!("documents:         {}", stats.documents);
        println!("deleted documents: {}", stats.deleted_documents);
        println!("folders:           {}", stats.folders);
        println!("themes:            {}", stats.themes);
        match stats.index_entries {
            Some(entries) => println!("search index:      present ({} entries)", entries),
            None => println!("search index:      absent (substring fallback)"),
        }
    })
}
