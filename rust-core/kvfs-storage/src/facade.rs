// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Storage facade.
//
// The single entry point callers use. It is bound to exactly one backend
// when constructed and routes every call there. No retries, no caching:
// each call is one delegation. Path normalization happens at the remote
// backend boundary, so local paths reach the host filesystem untouched.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::backend::local::LocalBackend;
use crate::backend::remote::RemoteBackend;
use crate::backend::{Backend, CopyOptions, Entry, MkdirOptions, RemoveOptions};
use crate::config::{RuntimeMode, StorageConfig};
use crate::error::{StorageError, StorageResult};
use crate::store::KvStore;

/// Filesystem-style storage bound to one backend for its whole lifetime.
///
/// Cloning is cheap and clones share the backend.
///
/// # Example
///
/// ```rust
/// use kvfs_storage::facade::Storage;
/// use kvfs_storage::store::memory::InMemoryKvStore;
///
/// # tokio_test::block_on(async {
/// let storage = Storage::remote(InMemoryKvStore::new());
/// storage.write("data\\user\\settings.json", b"{}").await.unwrap();
/// assert_eq!(storage.list("data/user").await.unwrap(), vec!["settings.json".to_string()]);
/// # });
/// ```
#[derive(Clone)]
pub struct Storage {
    mode: RuntimeMode,
    backend: Arc<dyn Backend>,
}

impl Storage {
    /// Build the facade for `config`.
    ///
    /// `store` is required in [`RuntimeMode::Remote`] and ignored in
    /// [`RuntimeMode::Local`].
    pub fn open(config: &StorageConfig, store: Option<Arc<dyn KvStore>>) -> StorageResult<Self> {
        let storage = match (config.mode, store) {
            (RuntimeMode::Local, _) => Self::local(),
            (RuntimeMode::Remote, Some(store)) => Self::remote(store),
            (RuntimeMode::Remote, None) => {
                return Err(StorageError::BackendUnavailable(
                    "remote mode selected but no key-value store was provided".to_string(),
                ))
            }
        };
        debug!(mode = %storage.mode, backend = storage.backend.name(), "storage backend bound");
        Ok(storage)
    }

    /// Facade over the host filesystem.
    pub fn local() -> Self {
        Self {
            mode: RuntimeMode::Local,
            backend: Arc::new(LocalBackend::new()),
        }
    }

    /// Facade over a flat key-value store.
    pub fn remote<S: KvStore + 'static>(store: S) -> Self {
        Self {
            mode: RuntimeMode::Remote,
            backend: Arc::new(RemoteBackend::new(store)),
        }
    }

    /// The mode this facade is bound to.
    pub fn mode(&self) -> RuntimeMode {
        self.mode
    }

    /// Name of the bound backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Existence check under the backend's policy.
    ///
    /// Optimistic in remote mode: always `true`. Use
    /// [`Storage::exists_strict`] when a false positive matters.
    pub async fn check_exists(&self, path: &str) -> StorageResult<bool> {
        debug!(backend = self.backend.name(), path, "check_exists");
        self.backend.check_exists(path).await
    }

    /// Accurate existence check.
    pub async fn exists_strict(&self, path: &str) -> StorageResult<bool> {
        debug!(backend = self.backend.name(), path, "exists_strict");
        self.backend.exists_strict(path).await
    }

    pub async fn make_dir(&self, path: &str, options: MkdirOptions) -> StorageResult<()> {
        debug!(backend = self.backend.name(), path, recursive = options.recursive, "make_dir");
        self.backend.make_dir(path, options).await
    }

    pub async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        debug!(backend = self.backend.name(), path, "read");
        self.backend.read(path).await
    }

    /// Read a file and decode it as UTF-8.
    pub async fn read_to_string(&self, path: &str) -> StorageResult<String> {
        let bytes = self.read(path).await?;
        String::from_utf8(bytes).map_err(|err| {
            StorageError::SerializationError(format!("'{}' is not valid UTF-8: {}", path, err))
        })
    }

    /// Read a file and deserialize it from JSON.
    pub async fn read_json<T: DeserializeOwned>(&self, path: &str) -> StorageResult<T> {
        let bytes = self.read(path).await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            StorageError::SerializationError(format!(
                "failed to deserialize '{}': {}",
                path, err
            ))
        })
    }

    pub async fn write(&self, path: &str, contents: &[u8]) -> StorageResult<()> {
        debug!(backend = self.backend.name(), path, bytes = contents.len(), "write");
        self.backend.write(path, contents).await
    }

    /// Serialize `value` as pretty JSON and write it.
    pub async fn write_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        value: &T,
    ) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|err| {
            StorageError::SerializationError(format!("failed to serialize '{}': {}", path, err))
        })?;
        self.write(path, &bytes).await
    }

    pub async fn list(&self, path: &str) -> StorageResult<Vec<String>> {
        debug!(backend = self.backend.name(), path, "list");
        self.backend.list(path).await
    }

    pub async fn stat(&self, path: &str) -> StorageResult<Entry> {
        debug!(backend = self.backend.name(), path, "stat");
        self.backend.stat(path).await
    }

    pub async fn remove(&self, path: &str) -> StorageResult<()> {
        debug!(backend = self.backend.name(), path, "remove");
        self.backend.remove(path).await
    }

    pub async fn copy(
        &self,
        source: &str,
        destination: &str,
        options: CopyOptions,
    ) -> StorageResult<()> {
        debug!(
            backend = self.backend.name(),
            source,
            destination,
            recursive = options.recursive,
            "copy"
        );
        self.backend.copy(source, destination, options).await
    }

    pub async fn remove_tree(&self, path: &str, options: RemoveOptions) -> StorageResult<()> {
        debug!(
            backend = self.backend.name(),
            path,
            recursive = options.recursive,
            force = options.force,
            "remove_tree"
        );
        self.backend.remove_tree(path, options).await
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("mode", &self.mode)
            .field("backend", &self.backend.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryKvStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Settings {
        theme: String,
        font_scale: f32,
    }

    #[test]
    fn test_open_local_ignores_store() {
        let store: Arc<dyn KvStore> = Arc::new(InMemoryKvStore::new());
        let storage = Storage::open(&StorageConfig::default(), Some(store)).unwrap();
        assert_eq!(storage.mode(), RuntimeMode::Local);
        assert_eq!(storage.backend_name(), "local");
    }

    #[test]
    fn test_open_remote_requires_store() {
        let config = StorageConfig::new(RuntimeMode::Remote);
        let err = Storage::open(&config, None).unwrap_err();
        assert!(matches!(err, StorageError::BackendUnavailable(_)));

        let store: Arc<dyn KvStore> = Arc::new(InMemoryKvStore::new());
        let storage = Storage::open(&config, Some(store)).unwrap();
        assert_eq!(storage.mode(), RuntimeMode::Remote);
        assert_eq!(storage.backend_name(), "remote");
    }

    #[tokio::test]
    async fn test_json_helpers() {
        let storage = Storage::remote(InMemoryKvStore::new());
        let settings = Settings {
            theme: "dark".to_string(),
            font_scale: 1.5,
        };

        storage.write_json("user/settings.json", &settings).await.unwrap();
        let back: Settings = storage.read_json("user/settings.json").await.unwrap();
        assert_eq!(back, settings);
    }

    #[tokio::test]
    async fn test_read_json_rejects_garbage() {
        let storage = Storage::remote(InMemoryKvStore::new());
        storage.write("bad.json", b"not json").await.unwrap();

        match storage.read_json::<Settings>("bad.json").await.unwrap_err() {
            StorageError::SerializationError(msg) => assert!(msg.contains("bad.json")),
            other => panic!("expected SerializationError, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_read_to_string() {
        let storage = Storage::remote(InMemoryKvStore::new());
        storage.write("note.md", "héllo".as_bytes()).await.unwrap();
        assert_eq!(storage.read_to_string("note.md").await.unwrap(), "héllo");

        storage.write("blob", &[0xff, 0xfe]).await.unwrap();
        assert!(matches!(
            storage.read_to_string("blob").await.unwrap_err(),
            StorageError::SerializationError(_)
        ));
    }

    #[tokio::test]
    async fn test_clones_share_backend() {
        let storage = Storage::remote(InMemoryKvStore::new());
        let clone = storage.clone();

        storage.write("k", b"v").await.unwrap();
        assert_eq!(clone.read("k").await.unwrap(), b"v".to_vec());
    }

    #[test]
    fn test_debug_names_backend() {
        let storage = Storage::local();
        let text = format!("{:?}", storage);
        assert!(text.contains("Local"));
        assert!(text.contains("local"));
    }
}
