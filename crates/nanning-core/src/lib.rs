//! Nanning Core Library
//!
//! Local persistence for the Nanning editor: documents with soft delete and
//! full-text search, themes with protected presets, folders, settings, and
//! sandboxed file access under the private data directory.

pub mod config;
pub mod db;
pub mod document;
pub mod error;
pub mod files;
pub mod folder;
pub mod logging;
pub mod persistence;
pub mod sandbox;
pub mod theme;

pub use db::Database;
pub use error::{NanningError, Result};
pub use persistence::Persistence;
