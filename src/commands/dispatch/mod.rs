//! Command dispatch logic for nanning

use std::time::Instant;

use crate::cli::paths::resolve_data_dir;
use crate::cli::Cli;
use nanning_core::error::Result;
use tracing::debug;

mod command;
mod commands;

pub use command::CommandContext;
use command::{Command, NoCommand};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir.clone())?;

    debug!(elapsed = ?start.elapsed(), data_dir = %data_dir.display(), "resolve_data_dir");

    let ctx = CommandContext::new(cli, &data_dir, start);

    match &cli.command {
        None => NoCommand.execute(&ctx),
        Some(cmd) => cmd.execute(&ctx),
    }
}
