//! Folder, setting, file and index subcommands

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum FolderCommands {
    /// Create a folder
    Create {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        /// Parent folder ID
        #[arg(long)]
        parent: Option<String>,

        #[arg(long)]
        icon: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// List folders by name
    List,
}

#[derive(Subcommand, Debug)]
pub enum SettingCommands {
    /// Print a setting (nothing when unset)
    Get { key: String },

    /// Store a setting
    Set { key: String, value: String },
}

#[derive(Subcommand, Debug)]
pub enum FileCommands {
    /// Print the sandboxed absolute path without touching the disk
    Resolve { path: String },

    /// Print a file's contents
    Read { path: String },

    /// Write a file, creating parent directories
    Write {
        path: String,

        /// Contents; read from stdin when omitted
        #[arg(long, short = 'c')]
        content: Option<String>,
    },

    /// Report whether a path exists
    Exists { path: String },
}

#[derive(Subcommand, Debug)]
pub enum IndexCommands {
    /// Drop and repopulate the full-text index
    Rebuild,

    /// Show row counts and index state
    Status,
}
