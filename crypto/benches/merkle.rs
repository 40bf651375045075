// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use winter_crypto::{Hasher, MerkleTree, Sha256};

fn bench_merkle_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle_tree");

    for &size in &[1024usize, 4096, 16384] {
        let leaves: Vec<[u8; 32]> = (0..size)
            .map(|i| {
                let mut leaf = [0u8; 32];
                leaf[..8].copy_from_slice(&(i as u64).to_le_bytes());
                leaf
            })
            .collect();

        group.bench_with_input(BenchmarkId::new("build", size), &size, |b, _| {
            b.iter_batched(
                || leaves.clone(),
                |leaves| MerkleTree::new(black_box(leaves), Sha256::hash_fn()),
                criterion::BatchSize::SmallInput,
            )
        });

        let tree = MerkleTree::new(leaves.clone(), Sha256::hash_fn());
        let positions: Vec<usize> = (0..size).step_by(size / 32).collect();

        group.bench_with_input(BenchmarkId::new("prove_batch", size), &size, |b, _| {
            b.iter(|| tree.prove_batch(black_box(&positions)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_merkle_tree);
criterion_main!(benches);
