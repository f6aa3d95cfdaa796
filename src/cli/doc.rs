//! Document subcommands

use super::parse::parse_document_type;
use clap::{Args, Subcommand};
use nanning_core::document::DocumentType;

#[derive(Subcommand, Debug)]
pub enum DocCommands {
    /// Create a document
    Create(CreateArgs),

    /// Change some fields of a document
    Update(UpdateArgs),

    /// Show an active document
    Get {
        /// Document ID
        id: String,
    },

    /// List active documents, most recently updated first
    List,

    /// Soft-delete a document
    Delete {
        /// Document ID
        id: String,
    },

    /// Bring back a soft-deleted document
    Restore {
        /// Document ID
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Document ID (must be unused)
    #[arg(long)]
    pub id: String,

    /// Document title
    #[arg(long, short = 't')]
    pub title: String,

    /// Document body; read from stdin when omitted and stdin is not a terminal
    #[arg(long, short = 'c')]
    pub content: Option<String>,

    /// Document type (richtext, code, markdown)
    #[arg(long, short = 'T', value_parser = parse_document_type)]
    pub r#type: Option<DocumentType>,

    /// Language tag, e.g. rust or plaintext
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Folder ID
    #[arg(long)]
    pub folder: Option<String>,

    /// Tags (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append)]
    pub tag: Vec<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Document ID
    pub id: String,

    #[arg(long, short = 't')]
    pub title: Option<String>,

    #[arg(long, short = 'c')]
    pub content: Option<String>,

    #[arg(long, short = 'T', value_parser = parse_document_type)]
    pub r#type: Option<DocumentType>,

    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Move to this folder
    #[arg(long, conflicts_with = "no_folder")]
    pub folder: Option<String>,

    /// Remove the document from its folder
    #[arg(long)]
    pub no_folder: bool,

    /// Replace the tag list (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append, conflicts_with = "clear_tags")]
    pub tag: Vec<String>,

    /// Remove every tag
    #[arg(long)]
    pub clear_tags: bool,
}
