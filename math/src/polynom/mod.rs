// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Dense univariate polynomial arithmetic over a [`StarkField`]/[`FieldElement`]. Polynomials
//! are represented as coefficient vectors in ascending order (`poly[0]` is the constant term).

use crate::field::{FieldElement, StarkField};
use crate::utils::remove_leading_zeros;

/// Evaluates `poly` at `x` using Horner's method.
pub fn eval<B: FieldElement>(poly: &[B], x: B) -> B {
    let mut result = B::ZERO;
    for &coeff in poly.iter().rev() {
        result = result * x + coeff;
    }
    result
}

/// Returns `a + b`, padding the shorter polynomial with zeros.
pub fn add<B: FieldElement>(a: &[B], b: &[B]) -> Vec<B> {
    let n = a.len().max(b.len());
    (0..n)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(B::ZERO);
            let y = b.get(i).copied().unwrap_or(B::ZERO);
            x + y
        })
        .collect()
}

/// Returns `a - b`, padding the shorter polynomial with zeros.
pub fn sub<B: FieldElement>(a: &[B], b: &[B]) -> Vec<B> {
    let n = a.len().max(b.len());
    (0..n)
        .map(|i| {
            let x = a.get(i).copied().unwrap_or(B::ZERO);
            let y = b.get(i).copied().unwrap_or(B::ZERO);
            x - y
        })
        .collect()
}

/// Returns the product `a * b` via schoolbook convolution.
pub fn mul<B: FieldElement>(a: &[B], b: &[B]) -> Vec<B> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut result = vec![B::ZERO; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == B::ZERO {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            result[i + j] += x * y;
        }
    }
    result
}

/// Returns `poly` scaled by the constant `c`.
pub fn mul_by_const<B: FieldElement>(poly: &[B], c: B) -> Vec<B> {
    poly.iter().map(|&coeff| coeff * c).collect()
}

/// Returns the quotient of `poly / divisor`, discarding the remainder.
///
/// # Panics
/// Panics if `divisor` is the zero polynomial, or if `divisor`'s degree exceeds `poly`'s.
pub fn div<B: StarkField>(poly: &[B], divisor: &[B]) -> Vec<B> {
    let poly = remove_leading_zeros(poly);
    let divisor = remove_leading_zeros(divisor);
    assert!(
        divisor.len() <= poly.len(),
        "divisor degree must not exceed dividend degree"
    );
    assert!(
        divisor.iter().any(|&c| c != B::ZERO),
        "cannot divide by the zero polynomial"
    );

    let mut remainder = poly;
    let lead_inv = divisor[divisor.len() - 1].inv();
    let q_len = remainder.len() - divisor.len() + 1;
    let mut quotient = vec![B::ZERO; q_len];
    for i in (0..q_len).rev() {
        let coeff = remainder[i + divisor.len() - 1] * lead_inv;
        quotient[i] = coeff;
        for (j, &dc) in divisor.iter().enumerate() {
            remainder[i + j] -= coeff * dc;
        }
    }
    quotient
}

/// Divides `poly` by `x^degree - a` in place, leaving the quotient in `poly[degree..]` and the
/// remainder in `poly[..degree]`.
pub fn syn_div_in_place<B: StarkField>(poly: &mut [B], degree: usize, a: B) {
    let n = poly.len();
    for k in (degree..n).rev() {
        let term = a * poly[k];
        poly[k - degree] += term;
    }
}

/// Returns the quotient of `poly / (x^degree - a)`, discarding the remainder.
pub fn syn_div<B: StarkField>(poly: &[B], degree: usize, a: B) -> Vec<B> {
    let mut buf = poly.to_vec();
    syn_div_in_place(&mut buf, degree, a);
    buf.drain(0..degree);
    buf
}

/// Divides `poly` in place by `(x^degree - 1) / (x - exception)`, i.e. by the vanishing
/// polynomial of the cyclic group of order `degree` with a single point exempted. This avoids
/// ever materializing the `(x - exception)`-reduced divisor explicitly: multiplying `poly` by
/// `(x - exception)` first and then synthetically dividing by `x^degree - 1` produces the same
/// quotient, since the `(x - exception)` factors cancel.
pub fn syn_div_in_place_with_exception<B: StarkField>(
    poly: &mut Vec<B>,
    degree: usize,
    exception: B,
) {
    let mut previous = B::ZERO;
    for coeff in poly.iter_mut() {
        let current = *coeff;
        *coeff = previous - exception * current;
        previous = current;
    }
    poly.push(previous);
    syn_div_in_place(poly, degree, B::ONE);
    poly.drain(0..degree);
}

/// Returns the index of the highest-degree nonzero coefficient of `poly` (`0` for the zero
/// polynomial or an empty slice).
pub fn degree_of<B: FieldElement>(poly: &[B]) -> usize {
    for i in (0..poly.len()).rev() {
        if poly[i] != B::ZERO {
            return i;
        }
    }
    0
}

/// Interpolates the unique polynomial of degree `< xs.len()` passing through `(xs[i], ys[i])`
/// for every `i`, via Lagrange interpolation. `xs` must not contain duplicates.
///
/// # Panics
/// Panics if `xs.len() != ys.len()`.
pub fn interpolate<B: StarkField>(xs: &[B], ys: &[B], remove_trailing_zeros: bool) -> Vec<B> {
    assert_eq!(xs.len(), ys.len(), "xs and ys must have the same length");
    let n = xs.len();
    let mut result = vec![B::ZERO; n];
    for i in 0..n {
        let mut numerator = vec![B::ONE];
        let mut denominator = B::ONE;
        for (j, &xj) in xs.iter().enumerate() {
            if j == i {
                continue;
            }
            numerator = mul(&numerator, &[-xj, B::ONE]);
            denominator *= xs[i] - xj;
        }
        let scale = ys[i] * denominator.inv();
        for (k, &coeff) in numerator.iter().enumerate() {
            result[k] += coeff * scale;
        }
    }
    if remove_trailing_zeros {
        remove_leading_zeros(&result)
    } else {
        result
    }
}

/// Interpolates a batch of degree-3 polynomials, one per row of 4 `(x, y)` pairs. This is the
/// workhorse of a single FRI folding round, which degree-4-reduces `N/4` rows independently.
pub fn interpolate_batch<B: StarkField>(xs: &[[B; 4]], ys: &[[B; 4]]) -> Vec<[B; 4]> {
    assert_eq!(xs.len(), ys.len(), "xs and ys must have the same length");
    xs.iter()
        .zip(ys.iter())
        .map(|(x_row, y_row)| {
            let coeffs = interpolate(x_row, y_row, false);
            let mut row = [B::ZERO; 4];
            row.copy_from_slice(&coeffs);
            row
        })
        .collect()
}

/// Evaluates a batch of degree-3 polynomials, one per row, all at the same point `x`.
pub fn eval_batch<B: FieldElement>(polys: &[[B; 4]], x: B) -> Vec<B> {
    polys.iter().map(|poly| eval(poly, x)).collect()
}

#[cfg(test)]
mod tests;
