// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use prover::math::field::{f128::BaseElement, FieldElement};

/// Computes the `n`th term of the sequence `1, 1, 2, 3, 5, 8, ...` (standard Fibonacci, 1-indexed
/// from two seed terms), advancing two terms per iteration to match the trace layout built by
/// `fibonacci::fib2::air::build_trace`.
pub fn compute_fib_term(n: usize) -> BaseElement {
    let mut a = BaseElement::ONE;
    let mut b = BaseElement::ONE;

    for _ in 0..(n / 2) {
        let a_next = a + b;
        let b_next = a_next + b;
        a = a_next;
        b = b_next;
    }

    b
}

/// Computes the `n`th term of the multiplicative analog `1, 2, 2, 4, 8, 32, ...` (same
/// recurrence shape as [`compute_fib_term`], with addition replaced by multiplication), advancing
/// two terms per iteration to match `fibonacci::mulfib2::air::build_trace`.
pub fn compute_mulfib_term(n: usize) -> BaseElement {
    let mut a = BaseElement::ONE;
    let mut b = BaseElement::new(2);

    for _ in 0..(n / 2) {
        let a_next = a * b;
        let b_next = a_next * b;
        a = a_next;
        b = b_next;
    }

    b
}
