//! The persistence handle
//!
//! One [`Persistence`] is created by the host at startup and passed to the
//! request layer. It owns the only database connection and the sandbox for
//! the private data directory; nothing in this crate keeps global state.

use std::path::{Path, PathBuf};

use crate::config::{StoreConfig, CONFIG_FILE};
use crate::db::Database;
use crate::error::{NanningError, Result};
use crate::files::SandboxedFs;
use crate::sandbox::{PathSandbox, SandboxedPath};

#[derive(Debug)]
pub struct Persistence {
    data_dir: PathBuf,
    files: SandboxedFs,
    db: Option<Database>,
}

impl Persistence {
    /// Create an unopened handle for `data_dir`. Relative directories are
    /// made absolute against the current directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = std::path::absolute(data_dir.as_ref()).map_err(|e| {
            NanningError::initialization(format!(
                "cannot resolve data directory {}: {}",
                data_dir.as_ref().display(),
                e
            ))
        })?;
        let sandbox = PathSandbox::new(&data_dir)?;

        Ok(Self {
            data_dir: sandbox.root().to_path_buf(),
            files: SandboxedFs::new(sandbox),
            db: None,
        })
    }

    /// Open storage, or return the connection opened by an earlier call.
    ///
    /// Configuration problems are reported as `InitializationFailure`
    /// because the host cannot continue without storage either way.
    pub fn init(&mut self) -> Result<&Database> {
        if self.db.is_none() {
            let config = StoreConfig::load_or_default(&self.data_dir)
                .map_err(NanningError::initialization)?;
            let db = Database::open(&self.data_dir, &config)?;
            if config.seed_presets {
                db.seed_presets().map_err(|e| {
                    NanningError::initialization(format!("failed to seed theme presets: {}", e))
                })?;
            }
            tracing::info!(data_dir = %self.data_dir.display(), "storage initialized");
            self.db = Some(db);
        }
        self.db()
    }

    /// Release the connection. Safe to call when not open.
    pub fn close(&mut self) -> Result<()> {
        match self.db.take() {
            Some(db) => {
                tracing::debug!("closing storage");
                db.close()
            }
            None => Ok(()),
        }
    }

    pub fn is_open(&self) -> bool {
        self.db.is_some()
    }

    /// The open database
    pub fn db(&self) -> Result<&Database> {
        self.db
            .as_ref()
            .ok_or_else(|| NanningError::initialization("not initialized"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Write `config.toml` with the default settings unless one is already
    /// present. Returns whether a file was written.
    pub fn write_default_config(&self) -> Result<bool> {
        let path = self.data_dir.join(CONFIG_FILE);
        if path.exists() {
            return Ok(false);
        }
        StoreConfig::default().save(&path)?;
        tracing::debug!(path = %path.display(), "wrote default config");
        Ok(true)
    }

    pub fn resolve_path(&self, candidate: &str) -> Result<SandboxedPath> {
        self.files.resolve(candidate)
    }

    pub fn read_file(&self, candidate: &str) -> Result<String> {
        self.files.read_to_string(candidate)
    }

    pub fn write_file(&self, candidate: &str, content: &str) -> Result<SandboxedPath> {
        self.files.write(candidate, content)
    }

    pub fn exists(&self, candidate: &str) -> Result<bool> {
        self.files.exists(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_init_twice_returns_same_handle() {
        let dir = tempdir().unwrap();
        let mut store = Persistence::new(dir.path()).unwrap();

        let first: *const Database = store.init().unwrap();
        let second: *const Database = store.init().unwrap();

        assert!(std::ptr::eq(first, second));
        let db_files = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "db"))
            .count();
        assert_eq!(db_files, 1);
    }

    #[test]
    fn test_init_seeds_presets() {
        let dir = tempdir().unwrap();
        let mut store = Persistence::new(dir.path()).unwrap();

        let db = store.init().unwrap();

        assert_eq!(db.list_themes().unwrap().len(), 12);
    }

    #[test]
    fn test_init_respects_config() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "database_file = \"custom.sqlite\"\nseed_presets = false\n",
        )
        .unwrap();
        let mut store = Persistence::new(dir.path()).unwrap();

        let db = store.init().unwrap();

        assert!(db.list_themes().unwrap().is_empty());
        assert!(dir.path().join("custom.sqlite").exists());
    }

    #[test]
    fn test_invalid_config_is_initialization_failure() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "journal_mode = \"sideways\"\n").unwrap();
        let mut store = Persistence::new(dir.path()).unwrap();

        let err = store.init().unwrap_err();

        assert!(matches!(err, NanningError::InitializationFailure { .. }));
        assert!(!store.is_open());
    }

    #[test]
    fn test_db_before_init_fails() {
        let dir = tempdir().unwrap();
        let store = Persistence::new(dir.path()).unwrap();

        let err = store.db().unwrap_err();

        assert!(err.to_string().contains("not initialized"));
    }

    #[test]
    fn test_close_is_idempotent() {
        let dir = tempdir().unwrap();
        let mut store = Persistence::new(dir.path()).unwrap();

        store.close().unwrap();
        store.init().unwrap();
        store.close().unwrap();
        store.close().unwrap();

        assert!(!store.is_open());
        assert!(store.db().is_err());
        store.init().unwrap();
        assert!(store.is_open());
    }

    #[test]
    fn test_file_access_goes_through_sandbox() {
        let dir = tempdir().unwrap();
        let store = Persistence::new(dir.path()).unwrap();

        let written = store.write_file("notes/today.md", "hello").unwrap();

        assert_eq!(written.relative(), Path::new("notes/today.md"));
        assert_eq!(store.read_file("notes/today.md").unwrap(), "hello");
        assert!(store.exists("notes/today.md").unwrap());
        assert!(matches!(
            store.read_file("../outside.txt"),
            Err(NanningError::AccessDenied { .. })
        ));
    }

    #[test]
    fn test_write_default_config_keeps_existing_file() {
        let dir = tempdir().unwrap();
        let mut store = Persistence::new(dir.path()).unwrap();
        store.init().unwrap();

        assert!(store.write_default_config().unwrap());
        let written = StoreConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(written, StoreConfig::default());

        fs::write(dir.path().join(CONFIG_FILE), "seed_presets = false\n").unwrap();
        assert!(!store.write_default_config().unwrap());
        let kept = StoreConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert!(!kept.seed_presets);
    }
}
