// SPDX-License-Identifier: PMPL-1.0-or-later
//! Performance benchmarks for the kvfs storage facade

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tokio::runtime::Runtime;

use kvfs_storage::path::normalize;
use kvfs_storage::{CopyOptions, InMemoryKvStore, RemoveOptions, Storage};

// ============================================================================
// Path Normalization
// ============================================================================

const BACKSLASH_PATH: &str = "data\\default-user\\chats\\Seraphina\\2024-01-01.jsonl";
const CANONICAL_PATH: &str = "data/default-user/chats/Seraphina/2024-01-01.jsonl";

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("path");

    group.bench_function("normalize_backslashes", |b| {
        b.iter(|| black_box(normalize(black_box(BACKSLASH_PATH))))
    });
    group.bench_function("normalize_already_canonical", |b| {
        b.iter(|| black_box(normalize(black_box(CANONICAL_PATH))))
    });

    group.finish();
}

// ============================================================================
// Facade Round Trips
// ============================================================================

fn bench_write_read(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let temp_dir = tempfile::tempdir().unwrap();
    let local_file = temp_dir.path().join("bench.bin").to_string_lossy().into_owned();
    let payload = vec![7u8; 4096];

    let mut group = c.benchmark_group("write_read");

    let remote = Storage::remote(InMemoryKvStore::new());
    group.bench_function("remote", |b| {
        b.to_async(&rt).iter(|| async {
            remote.write("bench/file.bin", &payload).await.unwrap();
            black_box(remote.read("bench/file.bin").await.unwrap())
        });
    });

    let local = Storage::local();
    group.bench_function("local", |b| {
        b.to_async(&rt).iter(|| async {
            local.write(&local_file, &payload).await.unwrap();
            black_box(local.read(&local_file).await.unwrap())
        });
    });

    group.finish();
}

// ============================================================================
// Directory Emulation
// ============================================================================

fn bench_remote_list(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("remote_list");

    for size in [10usize, 100, 1000] {
        let storage = Storage::remote(InMemoryKvStore::new());
        rt.block_on(async {
            for i in 0..size {
                storage
                    .write(&format!("chats/char-{}/log.jsonl", i % 10), b"{}")
                    .await
                    .unwrap();
                storage.write(&format!("chats/file-{}", i), b"{}").await.unwrap();
            }
        });

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.to_async(&rt)
                .iter(|| async { black_box(storage.list("chats").await.unwrap()) });
        });
    }

    group.finish();
}

fn bench_remote_copy_remove_tree(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("remote_tree");

    let storage = Storage::remote(InMemoryKvStore::new());
    rt.block_on(async {
        for i in 0..100 {
            storage
                .write(&format!("src/{}/entry.json", i), b"{\"k\":1}")
                .await
                .unwrap();
        }
    });

    group.bench_function("copy_then_remove_100_keys", |b| {
        b.to_async(&rt).iter(|| async {
            storage
                .copy("src", "dst", CopyOptions { recursive: true })
                .await
                .unwrap();
            storage
                .remove_tree("dst", RemoveOptions { recursive: true, force: false })
                .await
                .unwrap();
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize,
    bench_write_read,
    bench_remote_list,
    bench_remote_copy_remove_tree
);
criterion_main!(benches);
