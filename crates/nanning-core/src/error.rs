//! Error taxonomy for the nanning persistence layer
//!
//! Storage-engine errors never leave this crate verbatim: every call site
//! translates a `rusqlite::Error` into one of the variants below, carrying the
//! name of the operation that failed.
//!
//! Exit codes used by the request layer:
//! - 0: Success
//! - 1: Generic failure (storage, file access)
//! - 2: Invalid input
//! - 3: Data/store error (initialization, missing or corrupt records, access denied)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the request layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Invalid input (2)
    Usage = 2,
    /// Data/store error (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

/// Errors that can occur in the persistence layer
#[derive(Error, Debug)]
pub enum NanningError {
    /// Storage is unusable; the host must refuse to continue.
    #[error("failed to initialize storage: {reason}")]
    InitializationFailure { reason: String },

    #[error("{entity} already exists: {id}")]
    ConstraintViolation { entity: &'static str, id: String },

    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("corrupt {field} on {entity} {id}: {reason}")]
    CorruptRecord {
        entity: &'static str,
        id: String,
        field: &'static str,
        reason: String,
    },

    #[error("access denied for '{path}': {reason}")]
    AccessDenied { path: String, reason: String },

    /// Raised when the full-text index is structurally absent. Search
    /// recovers from it by falling back to substring matching; it is never
    /// returned from a public operation.
    #[error("search index unavailable")]
    IndexUnavailable,

    #[error("failed to {operation}: {reason}")]
    Storage { operation: String, reason: String },

    #[error("failed to {operation} {path:?}: {reason}")]
    FileAccess {
        operation: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("invalid configuration in {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl NanningError {
    /// Translate a storage-engine error for the named operation
    pub fn storage(operation: impl Into<String>, error: impl std::fmt::Display) -> Self {
        NanningError::Storage {
            operation: operation.into(),
            reason: error.to_string(),
        }
    }

    pub fn initialization(reason: impl std::fmt::Display) -> Self {
        NanningError::InitializationFailure {
            reason: reason.to_string(),
        }
    }

    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        NanningError::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        NanningError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn corrupt(
        entity: &'static str,
        id: impl Into<String>,
        field: &'static str,
        error: impl std::fmt::Display,
    ) -> Self {
        NanningError::CorruptRecord {
            entity,
            id: id.into(),
            field,
            reason: error.to_string(),
        }
    }

    pub fn access_denied(path: impl Into<String>, reason: impl Into<String>) -> Self {
        NanningError::AccessDenied {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn file_access(
        operation: &'static str,
        path: impl Into<PathBuf>,
        error: impl std::fmt::Display,
    ) -> Self {
        NanningError::FileAccess {
            operation,
            path: path.into(),
            reason: error.to_string(),
        }
    }

    /// Translate an insert failure, surfacing primary-key collisions as
    /// `ConstraintViolation`
    pub fn from_insert(entity: &'static str, id: &str, error: rusqlite::Error) -> Self {
        match error {
            rusqlite::Error::SqliteFailure(ref e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                NanningError::ConstraintViolation {
                    entity,
                    id: id.to_string(),
                }
            }
            other => NanningError::storage(format!("insert {} {}", entity, id), other),
        }
    }

    /// Stable machine-readable identifier for this error
    pub fn kind(&self) -> &'static str {
        match self {
            NanningError::InitializationFailure { .. } => "initialization_failure",
            NanningError::ConstraintViolation { .. } => "constraint_violation",
            NanningError::InvalidInput { .. } => "invalid_input",
            NanningError::NotFound { .. } => "not_found",
            NanningError::CorruptRecord { .. } => "corrupt_record",
            NanningError::AccessDenied { .. } => "access_denied",
            NanningError::IndexUnavailable => "index_unavailable",
            NanningError::Storage { .. } => "storage",
            NanningError::FileAccess { .. } => "file_access",
            NanningError::Config { .. } => "config",
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            NanningError::InvalidInput { .. } => ExitCode::Usage,

            NanningError::InitializationFailure { .. }
            | NanningError::ConstraintViolation { .. }
            | NanningError::NotFound { .. }
            | NanningError::CorruptRecord { .. }
            | NanningError::AccessDenied { .. }
            | NanningError::Config { .. } => ExitCode::Data,

            NanningError::IndexUnavailable
            | NanningError::Storage { .. }
            | NanningError::FileAccess { .. } => ExitCode::Failure,
        }
    }

    /// Failure envelope handed back to the caller of the request layer
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "success": false,
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
                "code": self.exit_code() as i32,
            }
        })
    }
}

/// Result type alias for persistence operations
pub type Result<T> = std::result::Result<T, NanningError>;
