//! `nanning search` handler

use crate::commands::dispatch::CommandContext;
use crate::commands::output::{emit, print_document_line};
use nanning_core::error::Result;
use nanning_core::trace_time;

pub fn execute(ctx: &CommandContext, query: &str) -> Result<()> {
    let start = std::time::Instant::now();
    let results = ctx.with_db(|db| db.search_documents(query))?;
    trace_time!(start, "search", results = results.len());

    emit(ctx, &results, |results| {
        if results.is_empty() {
            println!("No matches for '{}'", query);
        }
        for doc in results {
            print_document_line(doc);
        }
    })
}
