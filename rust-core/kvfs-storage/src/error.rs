// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Storage error types for the kvfs facade and its backends.
//
// Both backends report failures through the same enum. A missing path is
// always `NotFound` carrying the caller's original path, whether it was
// detected by the host filesystem or by an empty key-value lookup.

use thiserror::Error;

/// Errors that can occur when interacting with a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The path does not exist.
    #[error("no such file or directory: '{path}'")]
    NotFound {
        /// The path as supplied by the caller, before normalization.
        path: String,
    },

    /// A directory was given to an operation that needs `recursive` for it.
    #[error("is a directory: '{path}'")]
    IsDirectory {
        /// The offending path.
        path: String,
    },

    /// The path is well-formed but cannot be used for this operation, such
    /// as copying a directory into itself or a file name that is not UTF-8.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An I/O error from the host filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key-value store could not be reached or rejected the request.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Failed to encode or decode stored content.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// The runtime configuration is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StorageError {
    /// Build a `NotFound` for `path`.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Build an `InvalidPath` for `path`.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Map a host filesystem error, turning `ErrorKind::NotFound` into
    /// [`StorageError::NotFound`] so callers see the same variant from
    /// either backend.
    pub fn from_io(path: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(path),
            _ => Self::Io(err),
        }
    }

    /// True if this error means the logical path does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias used throughout the crate.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = StorageError::not_found("data\\user\\settings.json");
        assert_eq!(
            err.to_string(),
            "no such file or directory: 'data\\user\\settings.json'"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_is_directory_display() {
        let err = StorageError::IsDirectory {
            path: "data/chats".to_string(),
        };
        assert!(err.to_string().contains("is a directory"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_invalid_path_display() {
        let err = StorageError::invalid_path("src/sub", "cannot copy a directory into itself");
        assert_eq!(
            err.to_string(),
            "invalid path 'src/sub': cannot copy a directory into itself"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_from_io_maps_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = StorageError::from_io("a/b", io_err);
        match err {
            StorageError::NotFound { path } => assert_eq!(path, "a/b"),
            other => panic!("expected NotFound, got: {:?}", other),
        }
    }

    #[test]
    fn test_from_io_passes_other_kinds_through() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let err = StorageError::from_io("a/b", io_err);
        assert!(matches!(err, StorageError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_backend_unavailable_display() {
        let err = StorageError::BackendUnavailable("connection refused".to_string());
        assert!(err.to_string().contains("backend unavailable"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = StorageError::InvalidConfig("unknown mode 'cloud'".to_string());
        assert_eq!(err.to_string(), "invalid configuration: unknown mode 'cloud'");
    }
}
