// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Flat key-value store contract consumed by the remote backend.
//
// The store is an external collaborator: it only has to offer get, set,
// delete and scan-by-prefix. The wire protocol behind it is the client's
// business. Writes are last-write-wins; there is no versioning.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StorageError;

pub mod memory;
pub mod metrics;

/// A flat, prefix-scannable key-value store.
///
/// Keys are normalized paths (see [`crate::path::normalize`]); values are
/// opaque bytes. Implementations must be safe to share across threads and
/// tokio tasks.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Retrieve the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist, rather than an error.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// Delete `key`.
    ///
    /// Returns `Ok(true)` if the key existed and was removed, `Ok(false)` if
    /// it was not present.
    async fn delete(&self, key: &str) -> Result<bool, StorageError>;

    /// Return every key that starts with `prefix`, in lexicographic order.
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError>;

    /// A human-readable name for this store, used in logging.
    fn name(&self) -> &str;
}

#[async_trait]
impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        (**self).delete(key).await
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        (**self).scan_prefix(prefix).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
