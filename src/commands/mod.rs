//! CLI commands for nanning

pub mod dispatch;
pub mod doc;
pub mod file;
pub mod folder;
pub mod index;
pub mod init;
pub mod output;
pub mod search;
pub mod setting;
pub mod theme;
