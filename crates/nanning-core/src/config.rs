//! Store configuration for nanning
//!
//! Configuration lives in `config.toml` inside the private data directory.
//! Every field has a default, so a missing file is equivalent to an empty one.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NanningError, Result};

/// Name of the optional configuration file inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Default storage file name
pub const DEFAULT_DATABASE_FILE: &str = "nanning.db";

/// Directory name used under the platform data directory
pub const APP_DIR_NAME: &str = "nanning";

/// Store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Storage file name, relative to the data directory
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// SQLite journal mode applied at open time
    #[serde(default)]
    pub journal_mode: JournalMode,

    /// Insert the built-in theme presets on startup when they are absent
    #[serde(default = "default_seed_presets")]
    pub seed_presets: bool,

    /// Full-text search configuration
    #[serde(default)]
    pub search: SearchConfig,
}

/// SQLite journal modes we allow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JournalMode {
    #[default]
    Wal,
    Delete,
    Truncate,
    Memory,
}

impl JournalMode {
    pub fn as_pragma(&self) -> &'static str {
        match self {
            JournalMode::Wal => "WAL",
            JournalMode::Delete => "DELETE",
            JournalMode::Truncate => "TRUNCATE",
            JournalMode::Memory => "MEMORY",
        }
    }
}

/// Configuration for the full-text index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Create and maintain the FTS5 index. When false, search always uses
    /// the substring fallback.
    #[serde(default = "default_full_text")]
    pub full_text: bool,

    /// Tokenizer used when the index is created
    #[serde(default)]
    pub tokenizer: Tokenizer,
}

/// FTS5 tokenizers. The DDL fragment comes from this closed set, never from
/// user text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tokenizer {
    #[default]
    Unicode61,
    Porter,
    Trigram,
    Ascii,
}

impl Tokenizer {
    pub fn as_fts5(&self) -> &'static str {
        match self {
            Tokenizer::Unicode61 => "unicode61",
            Tokenizer::Porter => "porter unicode61",
            Tokenizer::Trigram => "trigram",
            Tokenizer::Ascii => "ascii",
        }
    }
}

fn default_database_file() -> String {
    DEFAULT_DATABASE_FILE.to_string()
}

fn default_seed_presets() -> bool {
    true
}

fn default_full_text() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            journal_mode: JournalMode::default(),
            seed_presets: default_seed_presets(),
            search: SearchConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            full_text: default_full_text(),
            tokenizer: Tokenizer::default(),
        }
    }
}

impl StoreConfig {
    /// Load `config.toml` from the data directory, falling back to defaults
    /// when the file does not exist
    pub fn load_or_default(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| NanningError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let config: StoreConfig = toml::from_str(&content).map_err(|e| NanningError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| NanningError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, content).map_err(|e| NanningError::file_access("write", path, e))?;
        Ok(())
    }

    /// The storage file must sit directly in the data directory
    fn validate(&self, path: &Path) -> Result<()> {
        let file = Path::new(&self.database_file);
        let is_bare_name = file.components().count() == 1 && file.file_name().is_some();
        if self.database_file.is_empty() || !is_bare_name {
            return Err(NanningError::Config {
                path: path.to_path_buf(),
                reason: format!(
                    "database_file must be a bare file name, got '{}'",
                    self.database_file
                ),
            });
        }
        Ok(())
    }
}

/// Platform default for the private data directory
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.database_file, "nanning.db");
        assert_eq!(config.journal_mode, JournalMode::Wal);
        assert!(config.seed_presets);
        assert!(config.search.full_text);
        assert_eq!(config.search.tokenizer, Tokenizer::Unicode61);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = StoreConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = StoreConfig::default();
        config.journal_mode = JournalMode::Delete;
        config.search.full_text = false;
        config.search.tokenizer = Tokenizer::Trigram;
        config.save(&path).unwrap();

        let loaded = StoreConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[search]\ntokenizer = \"porter\"\n",
        )
        .unwrap();

        let config = StoreConfig::load_or_default(dir.path()).unwrap();
        assert_eq!(config.search.tokenizer, Tokenizer::Porter);
        assert!(config.search.full_text);
        assert_eq!(config.database_file, "nanning.db");
    }

    #[test]
    fn test_rejects_database_file_with_directories() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "database_file = \"../elsewhere.db\"\n",
        )
        .unwrap();

        let err = StoreConfig::load_or_default(dir.path()).unwrap_err();
        assert!(matches!(err, NanningError::Config { .. }));
    }

    #[test]
    fn test_rejects_unknown_journal_mode() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "journal_mode = \"off\"\n").unwrap();

        assert!(StoreConfig::load_or_default(dir.path()).is_err());
    }
}
