// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory key-value store.
//
// A `BTreeMap` behind a tokio `RwLock`. Ordered keys make prefix scans a
// range walk. Used for tests, benches and ephemeral deployments.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::KvStore;

/// An in-memory key-value store backed by a sorted `BTreeMap`.
///
/// All data lives in process memory and is lost on drop. Clones share the
/// same map, so a test can hold one handle while a backend owns another.
///
/// # Example
///
/// ```rust
/// use kvfs_storage::store::KvStore;
/// use kvfs_storage::store::memory::InMemoryKvStore;
///
/// # tokio_test::block_on(async {
/// let store = InMemoryKvStore::new();
/// store.set("data/user/settings.json", b"{}").await.unwrap();
/// let keys = store.scan_prefix("data/").await.unwrap();
/// assert_eq!(keys, vec!["data/user/settings.json".to_string()]);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryKvStore {
    data: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryKvStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of keys currently stored.
    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    /// Return true if the store contains no keys.
    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }

    /// Snapshot of every key, in order.
    pub async fn keys(&self) -> Vec<String> {
        self.data.read().await.keys().cloned().collect()
    }
}

#[async_trait]
impl KvStore for InMemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let map = self.data.read().await;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut map = self.data.write().await;
        map.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let mut map = self.data.write().await;
        Ok(map.remove(key).is_some())
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let map = self.data.read().await;
        let keys = map
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect();
        Ok(keys)
    }

    fn name(&self) -> &str {
        "in-memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_basic_crud() {
        let store = InMemoryKvStore::new();

        assert!(store.is_empty().await);
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", b"v1").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"v1".to_vec()));

        // Last write wins.
        store.set("k", b"v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"v2".to_vec()));
        assert_eq!(store.len().await, 1);

        assert!(store.delete("k").await.unwrap());
        assert!(!store.delete("k").await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_scan_prefix() {
        let store = InMemoryKvStore::new();
        store.set("chats/alice/1.jsonl", b"a").await.unwrap();
        store.set("chats/alice/2.jsonl", b"b").await.unwrap();
        store.set("chats/bob/1.jsonl", b"c").await.unwrap();
        store.set("chatsettings.json", b"d").await.unwrap();

        let keys = store.scan_prefix("chats/").await.unwrap();
        assert_eq!(
            keys,
            vec![
                "chats/alice/1.jsonl".to_string(),
                "chats/alice/2.jsonl".to_string(),
                "chats/bob/1.jsonl".to_string(),
            ]
        );

        assert_eq!(store.scan_prefix("").await.unwrap().len(), 4);
        assert!(store.scan_prefix("missing/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let store = InMemoryKvStore::new();
        let clone = store.clone();

        store.set("shared", b"data").await.unwrap();
        assert_eq!(clone.get("shared").await.unwrap(), Some(b"data".to_vec()));
        assert_eq!(clone.keys().await, vec!["shared".to_string()]);
    }

    #[tokio::test]
    async fn test_name() {
        assert_eq!(InMemoryKvStore::new().name(), "in-memory");
    }
}
