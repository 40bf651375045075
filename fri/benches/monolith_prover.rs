// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use math::field::f128::BaseElement;
use math::field::{FieldElement, StarkField};
use math::utils::log2;
use winter_crypto::Sha256;
use winter_fri::{FriOptions, FriProver};

fn bench_build_layers(c: &mut Criterion) {
    let mut group = c.benchmark_group("fri_prover_build_layers");

    for &domain_size in &[4096usize, 16384] {
        let offset = BaseElement::GENERATOR;
        let g = BaseElement::get_root_of_unity(log2(domain_size));
        let evaluations: Vec<BaseElement> = (0..domain_size)
            .map(|i| offset * g.exp(i as u128))
            .collect();
        let options = FriOptions::new(domain_size / 64, offset).unwrap();

        group.bench_with_input(
            BenchmarkId::new("build_layers", domain_size),
            &domain_size,
            |b, _| {
                b.iter_batched(
                    || evaluations.clone(),
                    |evaluations| {
                        let mut prover =
                            FriProver::<BaseElement, BaseElement, Sha256>::new(options);
                        prover.build_layers(black_box(evaluations));
                        prover
                    },
                    criterion::BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_build_layers);
criterion_main!(benches);
