// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The filesystem-style capability set shared by both backends.
//
// `LocalBackend` passes straight through to the host filesystem.
// `RemoteBackend` emulates directories on a flat key-value store through
// key prefixes. Callers see the same trait and the same error variants
// either way; only the fidelity of a few operations differs, and those
// differences are documented on `RemoteBackend`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

pub mod local;
pub mod remote;

/// Kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A regular file (or a stored key).
    File,
    /// A directory (or a key prefix).
    Directory,
}

/// Result of a stat-like query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// File or directory.
    pub kind: EntryKind,
    /// Size in bytes. Best-effort: the remote backend always reports zero.
    pub size: u64,
    /// Whether the entry exists.
    pub exists: bool,
}

impl Entry {
    /// True if this entry is a file.
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// True if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Options for [`Backend::make_dir`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MkdirOptions {
    /// Create missing ancestors; an existing directory is then not an error.
    pub recursive: bool,
}

/// Options for [`Backend::copy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyOptions {
    /// Copy directories and everything below them.
    pub recursive: bool,
}

/// Options for [`Backend::remove_tree`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    /// Remove directories and everything below them.
    pub recursive: bool,
    /// Do not fail when the path does not exist.
    pub force: bool,
}

/// A storage backend offering filesystem-style operations on string paths.
///
/// Every operation is asynchronous so callers never special-case the mode.
/// Implementations must be safe to share across threads and tokio tasks.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Cheap existence check.
    ///
    /// May be approximate; see [`Backend::exists_strict`] for an accurate
    /// answer.
    async fn check_exists(&self, path: &str) -> Result<bool, StorageError>;

    /// Accurate existence check, possibly at extra cost.
    async fn exists_strict(&self, path: &str) -> Result<bool, StorageError>;

    /// Create a directory.
    async fn make_dir(&self, path: &str, options: MkdirOptions) -> Result<(), StorageError>;

    /// Read the full content of a file.
    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError>;

    /// Create or overwrite a file. Ancestor directories are not created.
    async fn write(&self, path: &str, contents: &[u8]) -> Result<(), StorageError>;

    /// Names (not paths) of the immediate children of a directory, sorted.
    async fn list(&self, path: &str) -> Result<Vec<String>, StorageError>;

    /// Describe the entry at `path`.
    async fn stat(&self, path: &str) -> Result<Entry, StorageError>;

    /// Delete a single file.
    async fn remove(&self, path: &str) -> Result<(), StorageError>;

    /// Copy `source` to `destination`.
    async fn copy(
        &self,
        source: &str,
        destination: &str,
        options: CopyOptions,
    ) -> Result<(), StorageError>;

    /// Delete `path` and, with `recursive`, everything below it.
    async fn remove_tree(&self, path: &str, options: RemoveOptions) -> Result<(), StorageError>;

    /// A human-readable name for this backend, used in logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind_helpers() {
        let file = Entry {
            kind: EntryKind::File,
            size: 3,
            exists: true,
        };
        assert!(file.is_file());
        assert!(!file.is_dir());

        let dir = Entry {
            kind: EntryKind::Directory,
            size: 0,
            exists: true,
        };
        assert!(dir.is_dir());
    }

    #[test]
    fn test_entry_serializes_lowercase_kind() {
        let entry = Entry {
            kind: EntryKind::Directory,
            size: 0,
            exists: true,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "directory");
        assert_eq!(json["size"], 0);
    }

    #[test]
    fn test_options_default_off() {
        assert!(!MkdirOptions::default().recursive);
        assert!(!CopyOptions::default().recursive);
        let rm = RemoveOptions::default();
        assert!(!rm.recursive && !rm.force);
    }
}
