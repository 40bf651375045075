// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Radix-2 Cooley-Tukey FFT over a [`StarkField`]'s two-adic subgroup. Used to move the
//! execution trace and constraint evaluations between coefficient and evaluation form, both on
//! the plain subgroup and on a coset of it (the low-degree extension domain).

use crate::field::StarkField;
use crate::utils::{get_power_series, log2};

/// Returns the `domain_size / 2` twiddle factors used by [`evaluate_poly`], in natural
/// (non-bit-reversed) order: `twiddles[i] = g^i`, where `g` generates the subgroup of order
/// `domain_size`.
pub fn get_twiddles<B: StarkField>(domain_size: usize) -> Vec<B> {
    assert!(domain_size.is_power_of_two(), "domain size must be a power of 2");
    let root = B::get_root_of_unity(log2(domain_size));
    get_power_series(root, domain_size / 2)
}

/// Returns the inverse twiddle factors used by [`interpolate_poly`].
pub fn get_inv_twiddles<B: StarkField>(domain_size: usize) -> Vec<B> {
    assert!(domain_size.is_power_of_two(), "domain size must be a power of 2");
    let root = B::get_root_of_unity(log2(domain_size)).inv();
    get_power_series(root, domain_size / 2)
}

/// Evaluates the polynomial with coefficients `p` over the subgroup of order `p.len()`, in
/// place. `twiddles` must have been built with [`get_twiddles`] for a domain of size `p.len()`.
///
/// # Panics
/// Panics if `p.len()` is not a power of two, or if `twiddles.len() != p.len() / 2`.
pub fn evaluate_poly<B: StarkField>(p: &mut [B], twiddles: &[B]) {
    assert_eq!(
        p.len(),
        twiddles.len() * 2,
        "inconsistent domain size: {} values but {} twiddles",
        p.len(),
        twiddles.len()
    );
    fft_in_place(p, twiddles);
}

/// Evaluates the polynomial with coefficients `p` over a coset `offset * <g>` of the subgroup
/// of order `p.len()`.
pub fn evaluate_poly_with_offset<B: StarkField>(p: &[B], twiddles: &[B], offset: B) -> Vec<B> {
    let domain_size = p.len();
    assert_eq!(domain_size, twiddles.len() * 2, "inconsistent domain size");
    let mut shifted: Vec<B> = p
        .iter()
        .zip(get_power_series(offset, domain_size))
        .map(|(&coeff, power)| coeff * power)
        .collect();
    fft_in_place(&mut shifted, twiddles);
    shifted
}

/// Interpolates `domain_size` evaluations `v` (taken over the subgroup of order `v.len()`) back
/// into coefficient form, in place. `inv_twiddles` must have been built with
/// [`get_inv_twiddles`] for a domain of size `v.len()`.
pub fn interpolate_poly<B: StarkField>(v: &mut [B], inv_twiddles: &[B]) {
    assert_eq!(
        v.len(),
        inv_twiddles.len() * 2,
        "inconsistent domain size: {} values but {} inverse twiddles",
        v.len(),
        inv_twiddles.len()
    );
    fft_in_place(v, inv_twiddles);
    let inv_length = B::from(v.len() as u64).inv();
    for coeff in v.iter_mut() {
        *coeff *= inv_length;
    }
}

/// Interpolates `domain_size` evaluations `v` taken over a coset `offset * <g>` back into
/// coefficient form.
pub fn interpolate_poly_with_offset<B: StarkField>(
    v: &[B],
    inv_twiddles: &[B],
    offset: B,
) -> Vec<B> {
    let mut result = v.to_vec();
    fft_in_place(&mut result, inv_twiddles);
    let inv_length = B::from(result.len() as u64).inv();
    let inv_offset = offset.inv();
    for (coeff, power) in result
        .iter_mut()
        .zip(get_power_series(inv_offset, result.len()))
    {
        *coeff = *coeff * inv_length * power;
    }
    result
}

/// Standard iterative radix-2 decimation-in-time FFT: bit-reverse the input, then combine
/// progressively larger butterflies using `twiddles`, which must hold `values.len() / 2` powers
/// of the full-size root of unity in natural order.
fn fft_in_place<B: StarkField>(values: &mut [B], twiddles: &[B]) {
    let n = values.len();
    assert!(n.is_power_of_two(), "number of values must be a power of 2");
    assert_eq!(twiddles.len(), n / 2, "wrong number of twiddle factors");

    bit_reverse_permute(values);

    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let step = n / len;
        for start in (0..n).step_by(len) {
            for i in 0..half {
                let w = twiddles[i * step];
                let u = values[start + i];
                let v = values[start + i + half] * w;
                values[start + i] = u + v;
                values[start + i + half] = u - v;
            }
        }
        len <<= 1;
    }
}

fn bit_reverse_permute<B: StarkField>(values: &mut [B]) {
    let n = values.len();
    let bits = n.trailing_zeros();
    for i in 0..n {
        let j = i.reverse_bits() >> (usize::BITS - bits);
        if j > i {
            values.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::f128::BaseElement;
    use crate::field::FieldElement;
    use crate::polynom;

    #[test]
    fn evaluate_matches_direct_evaluation() {
        let domain_size = 16;
        let poly: Vec<BaseElement> = (0..domain_size).map(|i| BaseElement::from(i as u64 + 1)).collect();
        let twiddles = get_twiddles::<BaseElement>(domain_size);
        let mut values = poly.clone();
        evaluate_poly(&mut values, &twiddles);

        let root = BaseElement::get_root_of_unity(domain_size.trailing_zeros() as usize);
        for (i, &v) in values.iter().enumerate() {
            let x = root.exp(i as u128);
            assert_eq!(polynom::eval(&poly, x), v);
        }
    }

    #[test]
    fn interpolate_inverts_evaluate() {
        let domain_size = 32;
        let poly: Vec<BaseElement> = (0..domain_size).map(|i| BaseElement::from((i * 7 + 3) as u64)).collect();
        let twiddles = get_twiddles::<BaseElement>(domain_size);
        let inv_twiddles = get_inv_twiddles::<BaseElement>(domain_size);

        let mut values = poly.clone();
        evaluate_poly(&mut values, &twiddles);
        interpolate_poly(&mut values, &inv_twiddles);

        assert_eq!(poly, values);
    }

    #[test]
    fn coset_evaluate_matches_direct_evaluation() {
        let domain_size = 16;
        let offset = BaseElement::GENERATOR;
        let poly: Vec<BaseElement> = (0..domain_size).map(|i| BaseElement::from(i as u64 + 1)).collect();
        let twiddles = get_twiddles::<BaseElement>(domain_size);
        let values = evaluate_poly_with_offset(&poly, &twiddles, offset);

        let root = BaseElement::get_root_of_unity(domain_size.trailing_zeros() as usize);
        for (i, &v) in values.iter().enumerate() {
            let x = offset * root.exp(i as u128);
            assert_eq!(polynom::eval(&poly, x), v);
        }
    }

    #[test]
    fn coset_interpolate_inverts_coset_evaluate() {
        let domain_size = 16;
        let offset = BaseElement::GENERATOR;
        let poly: Vec<BaseElement> = (0..domain_size).map(|i| BaseElement::from((i * 3 + 1) as u64)).collect();
        let twiddles = get_twiddles::<BaseElement>(domain_size);
        let inv_twiddles = get_inv_twiddles::<BaseElement>(domain_size);

        let values = evaluate_poly_with_offset(&poly, &twiddles, offset);
        let result = interpolate_poly_with_offset(&values, &inv_twiddles, offset);

        assert_eq!(poly, result);
    }
}
