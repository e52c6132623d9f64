// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Metrics-collecting wrapper for key-value stores.
//
// Wraps any `KvStore` and counts calls, latency and bytes moved. Every
// remote backend operation costs a known number of store round trips, and
// this wrapper is how that cost is observed (and asserted in tests).

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::store::KvStore;

/// Accumulated statistics for a key-value store.
///
/// All counters are monotonically increasing until
/// [`MetricsKvStore::reset_stats`] is called.
#[derive(Debug, Clone, Default)]
pub struct KvStoreStats {
    /// Number of `get` calls.
    pub get_count: u64,
    /// Number of `set` calls.
    pub set_count: u64,
    /// Number of `delete` calls.
    pub delete_count: u64,
    /// Number of `scan_prefix` calls.
    pub scan_count: u64,
    /// Total keys returned by all scans.
    pub keys_scanned: u64,
    /// Cumulative wall-clock latency of all `get` calls, in milliseconds.
    pub get_latency_sum_ms: f64,
    /// Cumulative wall-clock latency of all `set` calls, in milliseconds.
    pub set_latency_sum_ms: f64,
    /// Total value bytes returned by `get`.
    pub total_bytes_read: u64,
    /// Total value bytes accepted by `set`.
    pub total_bytes_written: u64,
}

impl KvStoreStats {
    /// Total store round trips of any kind.
    pub fn round_trips(&self) -> u64 {
        self.get_count + self.set_count + self.delete_count + self.scan_count
    }
}

/// A key-value store wrapper that collects operation metrics.
///
/// # Example
///
/// ```rust
/// use kvfs_storage::store::KvStore;
/// use kvfs_storage::store::memory::InMemoryKvStore;
/// use kvfs_storage::store::metrics::MetricsKvStore;
///
/// # tokio_test::block_on(async {
/// let metered = MetricsKvStore::new(InMemoryKvStore::new());
///
/// metered.set("key", b"value").await.unwrap();
/// metered.get("key").await.unwrap();
///
/// let stats = metered.stats().await;
/// assert_eq!(stats.set_count, 1);
/// assert_eq!(stats.get_count, 1);
/// # });
/// ```
pub struct MetricsKvStore<S: KvStore> {
    inner: S,
    stats: Arc<RwLock<KvStoreStats>>,
}

impl<S: KvStore> MetricsKvStore<S> {
    /// Wrap `inner` with metrics collection.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            stats: Arc::new(RwLock::new(KvStoreStats::default())),
        }
    }

    /// Return a snapshot of the current statistics.
    pub async fn stats(&self) -> KvStoreStats {
        self.stats.read().await.clone()
    }

    /// Reset all statistics to zero.
    pub async fn reset_stats(&self) {
        let mut s = self.stats.write().await;
        *s = KvStoreStats::default();
    }

    /// Return a reference to the inner store.
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: KvStore> KvStore for MetricsKvStore<S> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let start = Instant::now();
        let result = self.inner.get(key).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let mut s = self.stats.write().await;
        s.get_count += 1;
        s.get_latency_sum_ms += elapsed_ms;
        if let Ok(Some(ref val)) = result {
            s.total_bytes_read += val.len() as u64;
        }

        result
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let start = Instant::now();
        let result = self.inner.set(key, value).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        let mut s = self.stats.write().await;
        s.set_count += 1;
        s.set_latency_sum_ms += elapsed_ms;
        if result.is_ok() {
            s.total_bytes_written += value.len() as u64;
        }

        result
    }

    async fn delete(&self, key: &str) -> Result<bool, StorageError> {
        let mut s = self.stats.write().await;
        s.delete_count += 1;
        drop(s); // Release lock before the store call.
        self.inner.delete(key).await
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let result = self.inner.scan_prefix(prefix).await;

        let mut s = self.stats.write().await;
        s.scan_count += 1;
        if let Ok(ref keys) = result {
            s.keys_scanned += keys.len() as u64;
        }

        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
