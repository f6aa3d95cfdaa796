//! `nanning setting` handlers

use crate::commands::dispatch::CommandContext;
use crate::commands::output::emit;
use nanning_core::error::Result;

pub fn handle_get(ctx: &CommandContext, key: &str) -> Result<()> {
    let value = ctx.with_db(|db| db.get_setting(key))?;
    emit(ctx, &serde_json::json!({ "key": key, "value": value }), |_| {
        if let Some(value) = &value {
            println!("{}", value);
        }
    })
}

pub fn handle_set(ctx: &CommandContext, key: &str, value: &str) -> Result<()> {
    ctx.with_db(|db| db.set_setting(key, value))?;
    emit(ctx, &serde_json::json!({ "key": key, "value": value }), |_| {
        println!("{} = {}", key, value)
    })
}
