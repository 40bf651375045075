// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use winter_crypto::{Blake2s256, Hasher, Sha256};

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash");
    let data = vec![0u8; 64];

    group.bench_function("sha256", |b| {
        let mut result = [0u8; 32];
        b.iter(|| Sha256::hash_fn()(black_box(&data), &mut result))
    });

    group.bench_function("blake2s256", |b| {
        let mut result = [0u8; 32];
        b.iter(|| Blake2s256::hash_fn()(black_box(&data), &mut result))
    });

    group.finish();
}

criterion_group!(benches, bench_hash);
criterion_main!(benches);
