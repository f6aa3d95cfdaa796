//! Data directory resolution

use std::path::PathBuf;

use nanning_core::config::default_data_dir;
use nanning_core::error::{NanningError, Result};

/// Resolve the private data directory.
///
/// `--data-dir` (or `NANNING_DATA_DIR`, which clap folds into the same flag)
/// wins; otherwise the platform data directory is used.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    explicit.or_else(default_data_dir).ok_or_else(|| {
        NanningError::initialization(
            "cannot determine a data directory for this platform; pass --data-dir",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_explicit_path() {
        let explicit = PathBuf::from("/tmp/nanning-test");
        assert_eq!(resolve_data_dir(Some(explicit.clone())).unwrap(), explicit);
    }

    #[test]
    fn test_resolve_default_ends_with_app_dir() {
        if let Ok(dir) = resolve_data_dir(None) {
            assert!(dir.ends_with("nanning"));
        }
    }
}
