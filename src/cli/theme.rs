//! Theme subcommands

use std::path::PathBuf;

use super::parse::parse_theme_mode;
use clap::Subcommand;
use nanning_core::theme::ThemeMode;

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Insert or overwrite a theme from a JSON definition
    Save {
        /// JSON file with the theme; stdin when omitted
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Override the name from the definition
        #[arg(long)]
        name: Option<String>,

        /// Override the mode from the definition (light, dark, auto)
        #[arg(long, value_parser = parse_theme_mode)]
        mode: Option<ThemeMode>,
    },

    /// Show a theme
    Get {
        /// Theme ID
        id: String,
    },

    /// List themes, most recently updated first
    List {
        /// Only built-in presets
        #[arg(long, conflicts_with = "custom")]
        presets: bool,

        /// Only user themes
        #[arg(long)]
        custom: bool,
    },

    /// Delete a user theme; presets are never removed
    Delete {
        /// Theme ID
        id: String,
    },
}
