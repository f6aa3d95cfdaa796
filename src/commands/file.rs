//! `nanning file` handlers
//!
//! Every path goes through the sandbox before any disk access.

use crate::commands::dispatch::CommandContext;
use crate::commands::output::{emit, read_stdin};
use nanning_core::error::Result;

pub fn handle_resolve(ctx: &CommandContext, path: &str) -> Result<()> {
    let resolved = ctx.persistence()?.resolve_path(path)?;
    let full = resolved.to_string();
    emit(ctx, &serde_json::json!({ "path": full }), |_| println!("{}", full))
}

pub fn handle_read(ctx: &CommandContext, path: &str) -> Result<()> {
    let content = ctx.persistence()?.read_file(path)?;
    emit(ctx, &serde_json::json!({ "path": path, "content": content }), |_| {
        print!("{}", content)
    })
}

pub fn handle_write(ctx: &CommandContext, path: &str, content: Option<&str>) -> Result<()> {
    let content = match content {
        Some(content) => content.to_string(),
        None => read_stdin()?.unwrap_or_default(),
    };
    let written = ctx.persistence()?.write_file(path, &content)?;
    let full = written.to_string();
    emit(
        ctx,
        &serde_json::json!({ "path": full, "bytes": content.len() }),
        |_| println!("Wrote {} bytes to {}", content.len(), full),
    )
}

pub fn handle_exists(ctx: &CommandContext, path: &str) -> Result<()> {
    let exists = ctx.persistence()?.exists(path)?;
    emit(ctx, &serde_json::json!({ "path": path, "exists": exists }), |_| {
        println!("{}", exists)
    })
}
