//! Sandboxed path resolution
//!
//! [`PathSandbox::resolve`] is the only way to obtain a [`SandboxedPath`], and
//! the file-access functions in [`crate::files`] accept nothing else. The
//! resolution is purely lexical: no filesystem call is made, so symlinks
//! inside the root are followed by whatever later opens the path.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{NanningError, Result};

/// Platforms whose default filesystems compare names case-insensitively
const CASE_INSENSITIVE: bool = cfg!(any(windows, target_os = "macos"));

/// A normalized absolute path proven to lie inside a sandbox root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxedPath {
    full: PathBuf,
    relative: PathBuf,
}

impl SandboxedPath {
    /// Get the underlying Path reference
    pub fn as_path(&self) -> &Path {
        &self.full
    }

    /// The part of the path below the sandbox root (empty for the root itself)
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// True when the path names the sandbox root itself
    pub fn is_root(&self) -> bool {
        self.relative.as_os_str().is_empty()
    }
}

impl From<SandboxedPath> for PathBuf {
    fn from(path: SandboxedPath) -> PathBuf {
        path.full
    }
}

impl AsRef<Path> for SandboxedPath {
    fn as_ref(&self) -> &Path {
        &self.full
    }
}

impl std::fmt::Display for SandboxedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.full.display().fmt(f)
    }
}

/// Validates caller-supplied paths against a fixed private root
#[derive(Debug, Clone)]
pub struct PathSandbox {
    root: PathBuf,
}

impl PathSandbox {
    /// Create a sandbox. The root must be absolute; it is normalized but
    /// never touched on disk.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_absolute() {
            return Err(NanningError::invalid_input(
                "root",
                format!("sandbox root must be absolute: {}", root.display()),
            ));
        }
        Ok(Self {
            root: collect(&normalize(root)),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `candidate` against the root.
    ///
    /// Relative candidates are joined onto the root, absolute ones are taken
    /// as given. After lexical normalization the candidate must still start
    /// with every component of the root.
    pub fn resolve(&self, candidate: &str) -> Result<SandboxedPath> {
        if candidate.trim().is_empty() {
            return Err(NanningError::access_denied(candidate, "path is empty"));
        }
        if candidate.contains('\0') {
            return Err(NanningError::access_denied(
                candidate.replace('\0', "\\0"),
                "path contains a NUL byte",
            ));
        }

        let raw = Path::new(candidate);
        let joined = if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            self.root.join(raw)
        };

        let root_parts = normalize(&self.root);
        let parts = normalize(&joined);

        let escapes = parts.len() < root_parts.len()
            || root_parts
                .iter()
                .zip(parts.iter())
                .any(|(r, c)| !same_component(r, c));
        if escapes {
            tracing::warn!(path = candidate, root = %self.root.display(), "sandbox denied path");
            return Err(NanningError::access_denied(
                candidate,
                "path escapes the data directory",
            ));
        }

        let relative = collect(&parts[root_parts.len()..]);
        Ok(SandboxedPath {
            full: self.root.join(&relative),
            relative,
        })
    }
}

/// Lexically normalize a path: drop `.`, fold `..` into its parent, and
/// clamp `..` at the filesystem root the way path resolution does.
fn normalize(path: &Path) -> Vec<Component<'_>> {
    let mut stack: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match stack.last() {
                Some(Component::Normal(_)) => {
                    stack.pop();
                }
                Some(Component::RootDir) => {}
                _ => stack.push(component),
            },
            other => stack.push(other),
        }
    }
    stack
}

fn collect(parts: &[Component<'_>]) -> PathBuf {
    parts.iter().map(|c| c.as_os_str()).collect()
}

fn same_component(a: &Component<'_>, b: &Component<'_>) -> bool {
    if CASE_INSENSITIVE {
        same_name_ignoring_case(a.as_os_str(), b.as_os_str())
    } else {
        a == b
    }
}

fn same_name_ignoring_case(a: &OsStr, b: &OsStr) -> bool {
    match (a.to_str(), b.to_str()) {
        (Some(a), Some(b)) => a.to_lowercase() == b.to_lowercase(),
        _ => a == b,
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sandbox() -> PathSandbox {
        PathSandbox::new("/data/app").unwrap()
    }

    fn denied(candidate: &str) -> bool {
        matches!(
            sandbox().resolve(candidate),
            Err(NanningError::AccessDenied { .. })
        )
    }

    #[test]
    fn test_relative_path_resolves_under_root() {
        let resolved = sandbox().resolve("notes/today.md").unwrap();
        assert_eq!(resolved.as_path(), Path::new("/data/app/notes/today.md"));
        assert_eq!(resolved.relative(), Path::new("notes/today.md"));
    }

    #[test]
    fn test_parent_traversal_is_denied() {
        assert!(denied("../../etc/passwd"));
        assert!(denied(".."));
        assert!(denied("notes/../../secret"));
    }

    #[test]
    fn test_absolute_path_outside_root_is_denied() {
        assert!(denied("/etc/passwd"));
        assert!(denied("/data"));
        assert!(denied("/.."));
    }

    #[test]
    fn test_sibling_with_shared_prefix_is_denied() {
        assert!(denied("/data/application/secret"));
        assert!(denied("../app-backup/x"));
    }

    #[test]
    fn test_absolute_path_inside_root_is_allowed() {
        let resolved = sandbox().resolve("/data/app/themes/a.json").unwrap();
        assert_eq!(resolved.as_path(), Path::new("/data/app/themes/a.json"));
    }

    #[test]
    fn test_dot_segments_are_normalized() {
        let resolved = sandbox().resolve("./notes/./drafts/../today.md").unwrap();
        assert_eq!(resolved.as_path(), Path::new("/data/app/notes/today.md"));
    }

    #[test]
    fn test_excursion_that_returns_to_root_is_allowed() {
        let resolved = sandbox().resolve("notes/../../app/x.md").unwrap();
        assert_eq!(resolved.as_path(), Path::new("/data/app/x.md"));
    }

    #[test]
    fn test_root_itself_resolves() {
        let resolved = sandbox().resolve(".").unwrap();
        assert!(resolved.is_root());
        assert_eq!(resolved.as_path(), Path::new("/data/app"));
    }

    #[test]
    fn test_empty_and_nul_inputs_are_denied() {
        assert!(denied(""));
        assert!(denied("   "));
        assert!(denied("notes/a\0b"));
    }

    #[test]
    fn test_root_is_normalized() {
        let sandbox = PathSandbox::new("/data/./app/sub/../").unwrap();
        assert_eq!(sandbox.root(), Path::new("/data/app"));
        assert_eq!(
            sandbox.resolve("x").unwrap().as_path(),
            Path::new("/data/app/x")
        );
    }

    #[test]
    fn test_relative_root_is_rejected() {
        assert!(PathSandbox::new("data/app").is_err());
    }

    #[test]
    fn test_case_sensitivity_follows_platform() {
        let result = sandbox().resolve("/DATA/APP/notes/a.md");
        if CASE_INSENSITIVE {
            assert_eq!(
                result.unwrap().as_path(),
                Path::new("/data/app/notes/a.md")
            );
        } else {
            assert!(result.is_err());
        }
    }
}
