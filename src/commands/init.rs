//! `nanning init` handler

use serde::Serialize;

use crate::commands::dispatch::CommandContext;
use crate::commands::output::emit;
use nanning_core::error::Result;

#[derive(Serialize)]
struct InitReport {
    data_dir: String,
    database: String,
    config_created: bool,
    search_index: bool,
    themes: i64,
}

pub fn execute(ctx: &CommandContext) -> Result<()> {
    let mut store = ctx.persistence()?;
    let data_dir = store.data_dir().display().to_string();
    let (database, stats) = {
        let db = store.init()?;
        (db.path().display().to_string(), db.stats()?)
    };
    let report = InitReport {
        data_dir,
        database,
        config_created: store.write_default_config()?,
        search_index: stats.search_index,
        themes: stats.themes,
    };
    store.close()?;

    emit(ctx, &report, |r| {
        println!("Storage ready at {}", r.database);
        if r.config_created {
            println!("Wrote default config.toml");
        }
        if !r.search_index {
            println!("Full-text index unavailable; search uses substring matching");
        }
    })
}
