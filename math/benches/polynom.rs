// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use winter_math::field::f128::BaseElement;
use winter_math::polynom;
use winter_math::FieldElement;

fn bench_polynom(c: &mut Criterion) {
    let mut group = c.benchmark_group("polynom");

    for &size in &[64usize, 128, 256] {
        let poly: Vec<BaseElement> = (0..size).map(|i| BaseElement::from(i as u64 + 1)).collect();
        let x = BaseElement::from(42u64);

        group.bench_with_input(BenchmarkId::new("eval", size), &size, |b, _| {
            b.iter(|| polynom::eval(black_box(&poly), black_box(x)))
        });

        group.bench_with_input(BenchmarkId::new("mul", size), &size, |b, _| {
            b.iter(|| polynom::mul(black_box(&poly[..size / 2]), black_box(&poly[..size / 2])))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_polynom);
criterion_main!(benches);
