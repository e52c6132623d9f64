// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Remote key-value backend.
//
// Emulates a hierarchical filesystem on a flat key-value store:
//
// - A file is a key; its content is the value.
// - A directory is never stored. It "exists" when at least one key carries
//   `dir/` as a prefix, so an empty directory and a missing one look the
//   same.
// - Listing scans `dir/` and keeps the first segment after it.
// - Recursive removal scans `path/` and deletes every match.
//
// Every path is normalized before it becomes a key. Error messages carry
// the caller's original path.

use std::collections::BTreeSet;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{trace, warn};

use crate::backend::{Backend, CopyOptions, Entry, EntryKind, MkdirOptions, RemoveOptions};
use crate::error::StorageError;
use crate::path::{
    self, directory_prefix, has_directory_hint, immediate_child, is_root, normalize,
};
use crate::store::KvStore;

/// Upper bound on store deletes in flight during a recursive removal.
pub const MAX_CONCURRENT_DELETES: usize = 16;

/// Backend that stores files as keys in a flat key-value store.
///
/// Deliberate approximations, relative to [`crate::backend::local::LocalBackend`]:
///
/// - [`Backend::check_exists`] is optimistic and always answers `true`
///   without touching the store. Use [`Backend::exists_strict`] (one or two
///   store calls) when the answer matters.
/// - [`Backend::make_dir`] is a no-op.
/// - [`Backend::stat`] infers the kind from a trailing separator and
///   reports size zero, without querying the store.
/// - [`Backend::copy`] is read-then-write and not atomic. If the source is
///   deleted in between, the read fails with `NotFound` and the destination
///   is left untouched.
/// - Concurrent writes to the same key race; the store's last write wins.
///
/// # Example
///
/// ```rust
/// use kvfs_storage::backend::Backend;
/// use kvfs_storage::backend::remote::RemoteBackend;
/// use kvfs_storage::store::memory::InMemoryKvStore;
///
/// # tokio_test::block_on(async {
/// let backend = RemoteBackend::new(InMemoryKvStore::new());
/// backend.write("chats\\alice\\1.jsonl", b"{}").await.unwrap();
/// assert_eq!(backend.read("chats/alice/1.jsonl").await.unwrap(), b"{}".to_vec());
/// assert_eq!(backend.list("chats").await.unwrap(), vec!["alice".to_string()]);
/// # });
/// ```
pub struct RemoteBackend<S: KvStore> {
    store: S,
}

impl<S: KvStore> RemoteBackend<S> {
    /// Create a backend over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Return a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the value for `path`, or `NotFound` naming `path` as given.
    async fn get_existing(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.store
            .get(&normalize(path))
            .await?
            .ok_or_else(|| StorageError::not_found(path))
    }

    /// Delete every key in `keys`, at most [`MAX_CONCURRENT_DELETES`] at a
    /// time. Returns how many existed.
    async fn delete_all(&self, keys: &[String]) -> Result<usize, StorageError> {
        let deletes: Vec<_> = keys
            .iter()
            .map(|key| async move {
                trace!(key = %key, "deleting key");
                self.store.delete(key).await
            })
            .collect();
        let deleted: Vec<bool> = stream::iter(deletes)
        .buffer_unordered(MAX_CONCURRENT_DELETES)
        .try_collect()
        .await?;
        Ok(deleted.into_iter().filter(|existed| *existed).count())
    }
}

impl<S: KvStore> std::fmt::Debug for RemoteBackend<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteBackend")
            .field("store", &self.store.name())
            .finish()
    }
}

#[async_trait]
impl<S: KvStore> Backend for RemoteBackend<S> {
    async fn check_exists(&self, _path: &str) -> Result<bool, StorageError> {
        // Optimistic policy: never touches the store.
        Ok(true)
    }

    async fn exists_strict(&self, path: &str) -> Result<bool, StorageError> {
        let key = normalize(path);
        if !has_directory_hint(&key) && self.store.get(&key).await?.is_some() {
            return Ok(true);
        }
        let prefix = directory_prefix(&key);
        Ok(!self.store.scan_prefix(&prefix).await?.is_empty())
    }

    async fn make_dir(&self, path: &str, _options: MkdirOptions) -> Result<(), StorageError> {
        // Directories are implied by key prefixes.
        trace!(path = %path, "make_dir is a no-op on a key-value store");
        Ok(())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.get_existing(path).await
    }

    async fn write(&self, path: &str, contents: &[u8]) -> Result<(), StorageError> {
        self.store.set(&normalize(path), contents).await
    }

    async fn list(&self, path: &str) -> Result<Vec<String>, StorageError> {
        let prefix = directory_prefix(path);
        let keys = self.store.scan_prefix(&prefix).await?;
        trace!(prefix = %prefix, matches = keys.len(), "scanned directory prefix");

        // Nested keys share their first segment; collapse them to one name.
        let names: BTreeSet<&str> = keys
            .iter()
            .filter_map(|key| immediate_child(key, &prefix))
            .collect();
        Ok(names.into_iter().map(str::to_string).collect())
    }

    async fn stat(&self, path: &str) -> Result<Entry, StorageError> {
        let kind = if has_directory_hint(path) {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        warn!(path = %path, ?kind, "best-effort stat: kind inferred from path, size unknown");
        Ok(Entry {
            kind,
            size: 0,
            exists: true,
        })
    }

    async fn remove(&self, path: &str) -> Result<(), StorageError> {
        if self.store.delete(&normalize(path)).await? {
            Ok(())
        } else {
            Err(StorageError::not_found(path))
        }
    }

    async fn copy(
        &self,
        source: &str,
        destination: &str,
        options: CopyOptions,
    ) -> Result<(), StorageError> {
        let source_key = normalize(source);
        let destination_key = normalize(destination);

        // The root is every key at once, never a copy endpoint.
        if is_root(&source_key) {
            return Err(StorageError::not_found(source));
        }
        if is_root(&destination_key) {
            return Err(StorageError::not_found(destination));
        }

        if let Some(data) = self.store.get(&source_key).await? {
            return self.store.set(&destination_key, &data).await;
        }

        // No file under that key; it may still be a directory prefix.
        let from_prefix = directory_prefix(&source_key);
        let descendants = self.store.scan_prefix(&from_prefix).await?;
        if descendants.is_empty() {
            return Err(StorageError::not_found(source));
        }
        if !options.recursive {
            return Err(StorageError::IsDirectory {
                path: source.to_string(),
            });
        }

        let to_prefix = directory_prefix(&destination_key);
        if to_prefix.starts_with(&from_prefix) {
            return Err(StorageError::invalid_path(
                destination,
                "cannot copy a directory into itself",
            ));
        }
        trace!(
            from = %from_prefix,
            to = %to_prefix,
            keys = descendants.len(),
            "copying directory prefix"
        );
        for key in &descendants {
            let Some(target) = path::rebase(key, &from_prefix, &to_prefix) else {
                continue;
            };
            let data = self.get_existing(key).await?;
            self.store.set(&target, &data).await?;
        }
        Ok(())
    }

    async fn remove_tree(&self, path: &str, options: RemoveOptions) -> Result<(), StorageError> {
        let key = normalize(path);

        // Refuse to treat the empty path as "every key in the store".
        if is_root(&key) {
            return if options.force {
                Ok(())
            } else {
                Err(StorageError::not_found(path))
            };
        }

        let mut removed = 0;
        if !has_directory_hint(&key) && self.store.delete(&key).await? {
            removed += 1;
        }

        if options.recursive {
            let descendants = self.store.scan_prefix(&directory_prefix(&key)).await?;
            removed += self.delete_all(&descendants).await?;
        }

        if removed == 0 && !options.force {
            return Err(StorageError::not_found(path));
        }
        trace!(path = %path, removed, "removed keys");
        Ok(())
    }

    fn name(&self) -> &str {
        "remote"
    }
}
