// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Free-standing helpers shared by the `field`, `fft`, and `polynom` modules.

use crate::field::{FieldElement, StarkField};
use winter_utils::DeserializationError;

/// Returns `ceil(log2(value))`.
///
/// # Panics
/// Panics if `value` is not a power of two.
pub fn log2(value: usize) -> usize {
    assert!(value.is_power_of_two(), "value must be a power of 2");
    value.trailing_zeros() as usize
}

/// Returns `[1, seed, seed^2, ..., seed^(count - 1)]`.
pub fn get_power_series<B: FieldElement>(seed: B, count: usize) -> Vec<B> {
    let mut result = Vec::with_capacity(count);
    let mut power = B::ONE;
    for _ in 0..count {
        result.push(power);
        power *= seed;
    }
    result
}

/// Returns all elements of the cyclic group generated by `base`, i.e. `[1, base, base^2, ...]`
/// up to (but not including) the point where the sequence wraps back to `1`.
pub fn get_power_cycle<B: StarkField>(base: B) -> Vec<B> {
    let mut result = vec![B::ONE];
    let mut power = base;
    while power != B::ONE {
        result.push(power);
        power *= base;
    }
    result
}

/// Reinterprets `bytes` as a vector of field elements `E`.
pub fn read_elements_into_vec<E: FieldElement>(bytes: &[u8]) -> Result<Vec<E>, DeserializationError> {
    Ok(E::bytes_as_elements(bytes)?.to_vec())
}

/// Splits a vector of `N * count` elements into `count` rows of `N` elements each, in row-major
/// order. This is the inverse of [`untranspose_vector`].
pub fn transpose_vector<T: Copy, const N: usize>(values: &[T]) -> Vec<[T; N]> {
    winter_utils::group_slice_elements(values).to_vec()
}

/// Flattens `count` rows of `N` elements each back into a single vector of `N * count` elements,
/// preserving row order. This is the inverse of [`transpose_vector`].
pub fn untranspose_vector<T: Copy, const N: usize>(rows: &[[T; N]]) -> Vec<T> {
    let mut result = Vec::with_capacity(rows.len() * N);
    for row in rows {
        result.extend_from_slice(row);
    }
    result
}

/// Strips any trailing zero coefficients from `poly`, i.e. drops the highest-degree terms that
/// evaluate to zero. The constant term is always kept, even if it is zero.
pub fn remove_leading_zeros<B: FieldElement>(poly: &[B]) -> Vec<B> {
    let mut last_nonzero = 0;
    for (i, coeff) in poly.iter().enumerate() {
        if *coeff != B::ZERO {
            last_nonzero = i;
        }
    }
    poly[..=last_nonzero].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::f128::BaseElement;

    #[test]
    fn log2_matches_trailing_zeros() {
        assert_eq!(0, log2(1));
        assert_eq!(1, log2(2));
        assert_eq!(10, log2(1024));
    }

    #[test]
    fn power_series_starts_at_one() {
        let seed = BaseElement::from(7u8);
        let series = get_power_series(seed, 5);
        assert_eq!(BaseElement::ONE, series[0]);
        assert_eq!(seed, series[1]);
        assert_eq!(seed.exp(4), series[4]);
    }

    #[test]
    fn power_cycle_has_group_order_length() {
        let g = BaseElement::get_root_of_unity(3);
        let cycle = get_power_cycle(g);
        assert_eq!(8, cycle.len());
        assert_eq!(BaseElement::ONE, cycle[0] * g * g * g * g * g * g * g);
    }

    #[test]
    fn remove_leading_zeros_trims_trailing() {
        let poly = vec![BaseElement::ONE, BaseElement::from(2u8), BaseElement::ZERO];
        assert_eq!(vec![BaseElement::ONE, BaseElement::from(2u8)], remove_leading_zeros(&poly));

        let zero_poly = vec![BaseElement::ZERO, BaseElement::ZERO];
        assert_eq!(vec![BaseElement::ZERO], remove_leading_zeros(&zero_poly));
    }
}
