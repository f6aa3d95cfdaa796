//! File access under the private data directory
//!
//! Every entry point resolves its argument through [`PathSandbox`] before
//! touching the disk.

use std::fs;

use crate::error::{NanningError, Result};
use crate::sandbox::{PathSandbox, SandboxedPath};

#[derive(Debug, Clone)]
pub struct SandboxedFs {
    sandbox: PathSandbox,
}

impl SandboxedFs {
    pub fn new(sandbox: PathSandbox) -> Self {
        Self { sandbox }
    }

    /// Resolve without touching the filesystem
    pub fn resolve(&self, candidate: &str) -> Result<SandboxedPath> {
        self.sandbox.resolve(candidate)
    }

    #[tracing::instrument(skip(self))]
    pub fn read_to_string(&self, candidate: &str) -> Result<String> {
        let path = self.sandbox.resolve(candidate)?;
        read_sandboxed(&path)
    }

    /// Write `content`, creating missing parent directories below the root
    #[tracing::instrument(skip(self, content), fields(bytes = content.len()))]
    pub fn write(&self, candidate: &str, content: &str) -> Result<SandboxedPath> {
        let path = self.sandbox.resolve(candidate)?;
        write_sandboxed(&path, content)?;
        Ok(path)
    }

    pub fn exists(&self, candidate: &str) -> Result<bool> {
        let path = self.sandbox.resolve(candidate)?;
        path.as_path()
            .try_exists()
            .map_err(|e| NanningError::file_access("stat", path.as_path(), e))
    }
}

fn read_sandboxed(path: &SandboxedPath) -> Result<String> {
    fs::read_to_string(path).map_err(|e| NanningError::file_access("read", path.as_path(), e))
}

fn write_sandboxed(path: &SandboxedPath, content: &str) -> Result<()> {
    if path.is_root() {
        return Err(NanningError::invalid_input(
            "path",
            "cannot write to the data directory itself",
        ));
    }
    if let Some(parent) = path.as_path().parent() {
        fs::create_dir_all(parent)
            .map_err(|e| NanningError::file_access("create directory", parent, e))?;
    }
    fs::write(path, content).map_err(|e| NanningError::file_access("write", path.as_path(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fs_in(dir: &std::path::Path) -> SandboxedFs {
        SandboxedFs::new(PathSandbox::new(dir).unwrap())
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().unwrap();
        let files = fs_in(dir.path());

        let written = files.write("notes/today.md", "# Today").unwrap();
        assert!(written.as_path().starts_with(dir.path()));
        assert_eq!(files.read_to_string("notes/today.md").unwrap(), "# Today");
        assert!(files.exists("notes/today.md").unwrap());
    }

    #[test]
    fn test_exists_false_for_missing_file() {
        let dir = tempdir().unwrap();
        assert!(!fs_in(dir.path()).exists("nope.txt").unwrap());
    }

    #[test]
    fn test_escape_is_denied_before_io() {
        let outer = tempdir().unwrap();
        let root = outer.path().join("root");
        fs::create_dir(&root).unwrap();
        fs::write(outer.path().join("secret.txt"), "s3cret").unwrap();

        let files = fs_in(&root);
        assert!(matches!(
            files.read_to_string("../secret.txt"),
            Err(NanningError::AccessDenied { .. })
        ));
        assert!(matches!(
            files.write("../planted.txt", "x"),
            Err(NanningError::AccessDenied { .. })
        ));
        assert!(!outer.path().join("planted.txt").exists());
        assert!(matches!(
            files.exists("../secret.txt"),
            Err(NanningError::AccessDenied { .. })
        ));
    }

    #[test]
    fn test_read_missing_file_is_file_access_error() {
        let dir = tempdir().unwrap();
        let err = fs_in(dir.path()).read_to_string("missing.md").unwrap_err();
        assert!(matches!(err, NanningError::FileAccess { operation: "read", .. }));
    }

    #[test]
    fn test_write_to_root_is_rejected() {
        let dir = tempdir().unwrap();
        assert!(fs_in(dir.path()).write(".", "x").is_err());
    }
}
