// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// kvfs Storage
//
// Filesystem-style operations (exists, read, write, list, stat, delete,
// copy, recursive removal) against either the host filesystem or a flat
// key-value store. The backend is chosen once from a `RuntimeMode` and the
// call surface is identical either way.
//
// # Modules
//
// - [`path`] -- Path normalization and key-prefix helpers.
// - [`store`] -- The `KvStore` contract plus in-memory and metered stores.
// - [`backend`] -- The `Backend` trait and its local and remote variants.
// - [`facade`] -- `Storage`, the single entry point for callers.
// - [`config`] -- `RuntimeMode` and `StorageConfig`.
// - [`error`] -- The `StorageError` enum.
//
// # Example
//
// ```rust
// use kvfs_storage::{CopyOptions, InMemoryKvStore, RemoveOptions, Storage};
//
// # tokio_test::block_on(async {
// let storage = Storage::remote(InMemoryKvStore::new());
//
// storage.write("chats/alice/1.jsonl", b"hi").await.unwrap();
// storage.write("chats/alice/2.jsonl", b"there").await.unwrap();
// assert_eq!(storage.list("chats").await.unwrap(), vec!["alice".to_string()]);
//
// storage
//     .copy("chats/alice", "backup/alice", CopyOptions { recursive: true })
//     .await
//     .unwrap();
// storage
//     .remove_tree("chats", RemoveOptions { recursive: true, force: false })
//     .await
//     .unwrap();
// assert_eq!(storage.read("backup/alice/2.jsonl").await.unwrap(), b"there".to_vec());
// # });
// ```

pub mod backend;
pub mod config;
pub mod error;
pub mod facade;
pub mod path;
pub mod store;

// Re-export the most commonly used types at the crate root for convenience.
pub use backend::local::LocalBackend;
pub use backend::remote::RemoteBackend;
pub use backend::{Backend, CopyOptions, Entry, EntryKind, MkdirOptions, RemoveOptions};
pub use config::{RuntimeMode, StorageConfig, MODE_ENV_VAR};
pub use error::{StorageError, StorageResult};
pub use facade::Storage;
pub use store::memory::InMemoryKvStore;
pub use store::metrics::{KvStoreStats, MetricsKvStore};
pub use store::KvStore;
