//! Command trait and context for dispatching commands

use std::path::PathBuf;
use std::time::Instant;

use crate::cli::Cli;
use nanning_core::db::Database;
use nanning_core::error::Result;
use nanning_core::Persistence;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub data_dir: &'a PathBuf,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, data_dir: &'a PathBuf, start: Instant) -> Self {
        Self {
            cli,
            data_dir,
            start,
        }
    }

    /// A handle that has not opened storage yet
    pub fn persistence(&self) -> Result<Persistence> {
        Persistence::new(self.data_dir)
    }

    /// Open storage, run `f` against it, and close it again.
    ///
    /// The connection is closed even when `f` fails; the first error wins.
    pub fn with_db<T>(&self, f: impl FnOnce(&Database) -> Result<T>) -> Result<T> {
        let mut store = self.persistence()?;
        let result = f(store.init()?);
        tracing::debug!(elapsed = ?self.start.elapsed(), "command");
        let closed = store.close();
        let value = result?;
        closed?;
        Ok(value)
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("nanning {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Local document and theme store.");
        println!();
        println!("Run `nanning --help` for usage information.");
        Ok(())
    }
}
