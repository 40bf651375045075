// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use winter_math::fft;
use winter_math::field::f128::BaseElement;
use winter_math::FieldElement;

fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft");

    for &size in &[1024usize, 2048, 4096, 8192] {
        let poly: Vec<BaseElement> = (0..size).map(|i| BaseElement::from(i as u64)).collect();
        let twiddles = fft::get_twiddles::<BaseElement>(size);
        let inv_twiddles = fft::get_inv_twiddles::<BaseElement>(size);

        group.bench_with_input(BenchmarkId::new("evaluate_poly", size), &size, |b, _| {
            b.iter_batched(
                || poly.clone(),
                |mut values| fft::evaluate_poly(black_box(&mut values), black_box(&twiddles)),
                criterion::BatchSize::SmallInput,
            )
        });

        let mut values = poly.clone();
        fft::evaluate_poly(&mut values, &twiddles);

        group.bench_with_input(BenchmarkId::new("interpolate_poly", size), &size, |b, _| {
            b.iter_batched(
                || values.clone(),
                |mut v| fft::interpolate_poly(black_box(&mut v), black_box(&inv_twiddles)),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fft);
criterion_main!(benches);
