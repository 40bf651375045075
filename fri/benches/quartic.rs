// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use math::field::f128::BaseElement;
use math::field::{FieldElement, StarkField};
use math::utils::log2;
use winter_fri::quartic;

fn bench_fold_codeword(c: &mut Criterion) {
    let mut group = c.benchmark_group("quartic_fold");

    for &domain_size in &[4096usize, 16384, 65536] {
        let offset = BaseElement::GENERATOR;
        let g = BaseElement::get_root_of_unity(log2(domain_size));
        let evaluations: Vec<BaseElement> = (0..domain_size)
            .map(|i| offset * g.exp(i as u128))
            .collect();
        let alpha = BaseElement::from(7u8);

        group.bench_with_input(
            BenchmarkId::new("fold_codeword", domain_size),
            &domain_size,
            |b, &size| {
                b.iter(|| {
                    quartic::fold_codeword(black_box(&evaluations), size, offset, black_box(alpha))
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_fold_codeword);
criterion_main!(benches);
