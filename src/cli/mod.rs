//! CLI argument parsing for nanning
//!
//! Global flags: --data-dir, --format, --verbose, --log-level, --log-json

pub mod data;
pub mod doc;
pub mod output;
pub mod parse;
pub mod paths;
pub mod theme;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use data::{FileCommands, FolderCommands, IndexCommands, SettingCommands};
pub use doc::DocCommands;
pub use output::OutputFormat;
pub use theme::ThemeCommands;

/// Nanning - local document and theme store
#[derive(Parser, Debug)]
#[command(name = "nanning")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Private data directory (defaults to the platform data directory)
    #[arg(long, global = true, env = "NANNING_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Debug-level logging for both crates
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log filter, either a level (`debug`) or a full directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open (or create) storage and report its location
    Init,

    /// Create, read, update and delete documents
    Doc {
        #[command(subcommand)]
        command: DocCommands,
    },

    /// Search active documents by title and content
    Search {
        /// Search terms; all of them must match
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Manage themes
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },

    /// Manage folders
    Folder {
        #[command(subcommand)]
        command: FolderCommands,
    },

    /// Read and write settings
    Setting {
        #[command(subcommand)]
        command: SettingCommands,
    },

    /// Sandboxed file access under the data directory
    File {
        #[command(subcommand)]
        command: FileCommands,
    },

    /// Inspect or rebuild the full-text index
    Index {
        #[command(subcommand)]
        command: IndexCommands,
    },
}
