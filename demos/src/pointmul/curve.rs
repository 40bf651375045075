// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use prover::math::field::{f128::BaseElement, FieldElement};

/// The curve used by this example: `y^2 = x^3 + 1` (short Weierstrass, `a = 0`). `(2, 3)` is a
/// point on it by construction (`3^2 = 9 = 2^3 + 1`), chosen so the curve equation holds as an
/// integer identity and therefore over any field of characteristic greater than 3.
pub const GX: BaseElement = BaseElement::new(2);
pub const GY: BaseElement = BaseElement::new(3);

/// Doubles the point `(x, y)`, returning the doubling slope together with the resulting point.
/// The slope is returned so trace-building code can store it as a witness register: the
/// transition constraint checks `slope * 2y = 3x^2` rather than computing `slope` itself (which
/// would require a field inversion inside the constraint).
pub fn double(x: BaseElement, y: BaseElement) -> (BaseElement, BaseElement, BaseElement) {
    let three = BaseElement::new(3);
    let two = BaseElement::new(2);
    let slope = (three * x * x) / (two * y);
    let x3 = slope * slope - two * x;
    let y3 = slope * (x - x3) - y;
    (slope, x3, y3)
}

/// Adds two distinct points `(x1, y1) + (x2, y2)`, returning the addition slope together with
/// the resulting point, for the same witness-register reason as [`double`].
pub fn add(
    x1: BaseElement,
    y1: BaseElement,
    x2: BaseElement,
    y2: BaseElement,
) -> (BaseElement, BaseElement, BaseElement) {
    let slope = (y2 - y1) / (x2 - x1);
    let x3 = slope * slope - x1 - x2;
    let y3 = slope * (x1 - x3) - y1;
    (slope, x3, y3)
}

/// Expands `scalar` into `num_steps` bits, MSB-first, with `bits[0]` always `false`: the leading
/// `1` bit of a `num_steps`-bit scalar is consumed by initializing the accumulator to `G` rather
/// than by a trace transition (this sidesteps ever needing to represent the point at infinity in
/// affine coordinates). `scalar` must fit in `num_steps` bits with its top bit set.
pub fn scalar_bits(scalar: u128, num_steps: usize) -> Vec<bool> {
    assert!(num_steps >= 2, "num_steps must be at least 2");
    assert!(
        num_steps == 128 || scalar < (1u128 << num_steps),
        "scalar does not fit in num_steps bits"
    );
    assert!(
        (scalar >> (num_steps - 1)) & 1 == 1,
        "scalar's leading bit (position num_steps - 1) must be set"
    );

    let mut bits = vec![false; num_steps];
    for (i, bit) in bits.iter_mut().enumerate().skip(1) {
        let shift = num_steps - 1 - i;
        *bit = (scalar >> shift) & 1 == 1;
    }
    bits
}

/// Computes `scalar * G` via the same double-and-add steps `air::build_trace` lays into the
/// execution trace, so the two never disagree about what "the result" is.
pub fn compute_result(scalar: u128, num_steps: usize) -> (BaseElement, BaseElement) {
    let bits = scalar_bits(scalar, num_steps);

    let mut x_dbl = GX;
    let mut y_dbl = GY;
    let mut x_acc = GX;
    let mut y_acc = GY;

    for bit in bits.iter().take(num_steps - 1) {
        let (x_next_acc, y_next_acc) = if *bit {
            let (_, x3, y3) = add(x_dbl, y_dbl, x_acc, y_acc);
            (x3, y3)
        } else {
            (x_acc, y_acc)
        };
        let (_, x_next_dbl, y_next_dbl) = double(x_dbl, y_dbl);

        x_dbl = x_next_dbl;
        y_dbl = y_next_dbl;
        x_acc = x_next_acc;
        y_acc = y_next_acc;
    }

    (x_acc, y_acc)
}
