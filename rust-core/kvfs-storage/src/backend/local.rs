// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local filesystem backend.
//
// A direct pass-through to the host filesystem via `tokio::fs`. Paths are
// used exactly as given; the host accepts its native separators so no
// normalization happens here.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::trace;

use crate::backend::{Backend, CopyOptions, Entry, EntryKind, MkdirOptions, RemoveOptions};
use crate::error::StorageError;

/// Backend for the host's hierarchical filesystem.
///
/// No coordination is done beyond what the host filesystem provides.
///
/// # Example
///
/// ```rust
/// use kvfs_storage::backend::Backend;
/// use kvfs_storage::backend::local::LocalBackend;
///
/// # tokio_test::block_on(async {
/// let dir = tempfile::tempdir().unwrap();
/// let file = dir.path().join("hello.txt");
/// let file = file.to_str().unwrap();
///
/// let backend = LocalBackend::new();
/// backend.write(file, b"world").await.unwrap();
/// assert_eq!(backend.read(file).await.unwrap(), b"world".to_vec());
/// # });
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBackend;

impl LocalBackend {
    /// Create a new local backend.
    pub fn new() -> Self {
        Self
    }
}

fn io_err(path: &Path, err: std::io::Error) -> StorageError {
    StorageError::from_io(&path.to_string_lossy(), err)
}

/// Absolute form of `path` for containment checks. A path that does not
/// exist yet resolves through its nearest existing ancestor; failing that
/// it is used as given.
async fn resolve(path: &Path) -> PathBuf {
    let mut missing = Vec::new();
    let mut current = path.to_path_buf();
    loop {
        if let Ok(resolved) = fs::canonicalize(&current).await {
            return missing
                .iter()
                .rev()
                .fold(resolved, |acc: PathBuf, name| acc.join(name));
        }
        let (Some(parent), Some(name)) = (current.parent(), current.file_name()) else {
            return path.to_path_buf();
        };
        missing.push(name.to_os_string());
        current = if parent.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            parent.to_path_buf()
        };
    }
}

/// Copy the directory tree at `source` to `destination`, creating
/// directories as needed. Existing destination files are overwritten.
///
/// `destination` must not lie inside `source`.
async fn copy_dir(source: &Path, destination: &Path) -> Result<(), StorageError> {
    if resolve(destination).await.starts_with(resolve(source).await) {
        return Err(StorageError::invalid_path(
            destination.to_string_lossy(),
            "cannot copy a directory into itself",
        ));
    }

    let mut pending: Vec<(PathBuf, PathBuf)> =
        vec![(source.to_path_buf(), destination.to_path_buf())];

    while let Some((from, to)) = pending.pop() {
        fs::create_dir_all(&to).await.map_err(|e| io_err(&to, e))?;

        let mut entries = fs::read_dir(&from).await.map_err(|e| io_err(&from, e))?;
        while let Some(entry) = entries.next_entry().await.map_err(|e| io_err(&from, e))? {
            let child_from = entry.path();
            let child_to = to.join(entry.file_name());
            let file_type = entry.file_type().await.map_err(|e| io_err(&child_from, e))?;

            if file_type.is_dir() {
                pending.push((child_from, child_to));
            } else {
                trace!(from = %child_from.display(), to = %child_to.display(), "copying file");
                // The source was just listed, so failures are about the target.
                fs::copy(&child_from, &child_to)
                    .await
                    .map_err(|e| io_err(&child_to, e))?;
            }
        }
    }

    Ok(())
}

#[async_trait]
impl Backend for LocalBackend {
    async fn check_exists(&self, path: &str) -> Result<bool, StorageError> {
        fs::try_exists(path)
            .await
            .map_err(|e| StorageError::from_io(path, e))
    }

    async fn exists_strict(&self, path: &str) -> Result<bool, StorageError> {
        // The host answers accurately already.
        self.check_exists(path).await
    }

    async fn make_dir(&self, path: &str, options: MkdirOptions) -> Result<(), StorageError> {
        let result = if options.recursive {
            fs::create_dir_all(path).await
        } else {
            fs::create_dir(path).await
        };
        result.map_err(|e| StorageError::from_io(path, e))
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        fs::read(path).await.map_err(|e| StorageError::from_io(path, e))
    }

    async fn write(&self, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        fs::write(path, contents)
            .await
            .map_err(|e| StorageError::from_io(path, e))
    }

    async fn list(&self, path: &str) -> Result<Vec<String>, StorageError> {
        let mut entries = fs::read_dir(path)
            .await
            .map_err(|e| StorageError::from_io(path, e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::from_io(path, e))?
        {
            // Listed names must be usable as paths again.
            let name = entry.file_name().into_string().map_err(|raw| {
                StorageError::invalid_path(
                    entry.path().to_string_lossy(),
                    format!("file name {:?} is not valid UTF-8", raw),
                )
            })?;
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    async fn stat(&self, path: &str) -> Result<Entry, StorageError> {
        let meta = fs::metadata(path)
            .await
            .map_err(|e| StorageError::from_io(path, e))?;

        Ok(Entry {
            kind: if meta.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            },
            size: meta.len(),
            exists: true,
        })
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        fs::remove_file(path)
            .await
            .map_err(|e| StorageError::from_io(path, e))
    }

    async fn copy(
        &self,
        source: &str,
        destination: &str,
        options: CopyOptions,
    ) -> Result<(), StorageError> {
        let meta = fs::metadata(source)
            .await
            .map_err(|e| StorageError::from_io(source, e))?;

        if meta.is_dir() {
            if !options.recursive {
                return Err(StorageError::IsDirectory {
                    path: source.to_string(),
                });
            }
            return copy_dir(Path::new(source), Path::new(destination)).await;
        }

        // `source` is known to exist, so a failure here is about `destination`.
        fs::copy(source, destination)
            .await
            .map_err(|e| StorageError::from_io(destination, e))?;
        Ok(())
    }

    async fn remove_tree(&self, path: &str, options: RemoveOptions) -> Result<(), StorageError> {
        let meta = match fs::symlink_metadata(path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && options.force => return Ok(()),
            Err(e) => return Err(StorageError::from_io(path, e)),
        };

        if meta.is_dir() {
            if !options.recursive {
                return Err(StorageError::IsDirectory {
                    path: path.to_string(),
                });
            }
            fs::remove_dir_all(path)
                .await
                .map_err(|e| StorageError::from_io(path, e))
        } else {
            fs::remove_file(path)
                .await
                .map_err(|e| StorageError::from_io(path, e))
        }
    }

    fn name(&self) -> &str {
        "local"
    }
}
