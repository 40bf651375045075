// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The single quartic folding round shared by the prover and the verifier: reshape a codeword
//! into rows of 4, interpolate a cubic through each row, and evaluate every cubic at a common
//! random point to produce the next (quarter-length) codeword.

use math::field::{FieldElement, StarkField};
use math::polynom;
use math::utils::log2;
use utils::{transpose_slice, untranspose_slice};

/// Returns the four evaluation-domain x-coordinates of row `row_index` of a degree-4-folding
/// codeword of `domain_size` elements, evaluated over the coset `offset * <g>`. Row `i` holds
/// the values at domain positions `i, i + domain_size/4, i + domain_size/2, i + 3*domain_size/4`
/// (the same interleaved layout [`transpose_slice`] groups values into).
pub fn row_xs<B: StarkField>(domain_size: usize, offset: B, row_index: usize) -> [B; 4] {
    let row_count = domain_size / 4;
    let g = B::get_root_of_unity(log2(domain_size));
    let mut xs = [B::ZERO; 4];
    for (j, x) in xs.iter_mut().enumerate() {
        *x = offset * g.exp((row_index + j * row_count) as u128);
    }
    xs
}

/// Reshapes `evaluations` (a codeword of `domain_size` elements over the coset `offset * <g>`)
/// into `domain_size / 4` rows, interpolates a cubic through each row, and evaluates every
/// cubic at `alpha`, producing the folded codeword for the next FRI layer.
pub fn fold_codeword<B, E>(evaluations: &[E], domain_size: usize, offset: B, alpha: E) -> Vec<E>
where
    B: StarkField,
    E: FieldElement + From<B>,
{
    let rows = transpose_slice::<E, 4>(evaluations);
    let xs: Vec<[E; 4]> = (0..rows.len())
        .map(|i| {
            let x = row_xs(domain_size, offset, i);
            [E::from(x[0]), E::from(x[1]), E::from(x[2]), E::from(x[3])]
        })
        .collect();
    let polys = interpolate_rows(&xs, &rows);
    polynom::eval_batch(&polys, alpha)
}

/// Interpolates a cubic through each `(xs[i], ys[i])` row. Mirrors [`polynom::interpolate_batch`]
/// but is kept local so it works over the evaluation field `E` directly, which need not be a
/// [`StarkField`] itself.
fn interpolate_rows<E: FieldElement>(xs: &[[E; 4]], ys: &[[E; 4]]) -> Vec<[E; 4]> {
    assert_eq!(xs.len(), ys.len());
    xs.iter()
        .zip(ys.iter())
        .map(|(x_row, y_row)| interpolate_row(x_row, y_row))
        .collect()
}

/// Interpolates the cubic passing through a single `(x, y)` row.
fn interpolate_row<E: FieldElement>(xs: &[E; 4], ys: &[E; 4]) -> [E; 4] {
    let mut coeffs = [E::ZERO; 4];
    for i in 0..4 {
        let mut numerator = vec![E::ONE];
        let mut denominator = E::ONE;
        for (j, &xj) in xs.iter().enumerate() {
            if j == i {
                continue;
            }
            numerator = polynom::mul(&numerator, &[-xj, E::ONE]);
            denominator *= xs[i] - xj;
        }
        let scale = ys[i] * denominator.inv();
        for (k, &c) in numerator.iter().enumerate() {
            coeffs[k] += c * scale;
        }
    }
    coeffs
}

/// Interpolates the cubic through `row` (the 4 values of a single folding row, located at the
/// x-coordinates [`row_xs`] computes) and evaluates it at `alpha`. This is what the verifier
/// uses to recompute, from a single opened row, the value the next FRI layer must agree with.
pub fn fold_row<B, E>(domain_size: usize, offset: B, row_index: usize, row: [E; 4], alpha: E) -> E
where
    B: StarkField,
    E: FieldElement + From<B>,
{
    let x = row_xs(domain_size, offset, row_index);
    let xs = [E::from(x[0]), E::from(x[1]), E::from(x[2]), E::from(x[3])];
    let coeffs = interpolate_row(&xs, &row);
    polynom::eval(&coeffs, alpha)
}

/// Lagrange-interpolates the polynomial through `(xs[i], ys[i])` for arbitrary `xs.len()`, over
/// the evaluation field `E` directly. Used for the remainder's low-degree check, where `E` need
/// not be a [`StarkField`] itself.
pub fn interpolate<E: FieldElement>(xs: &[E], ys: &[E]) -> Vec<E> {
    assert_eq!(xs.len(), ys.len(), "xs and ys must have the same length");
    let n = xs.len();
    let mut result = vec![E::ZERO; n];
    for i in 0..n {
        let mut numerator = vec![E::ONE];
        let mut denominator = E::ONE;
        for (j, &xj) in xs.iter().enumerate() {
            if j == i {
                continue;
            }
            numerator = polynom::mul(&numerator, &[-xj, E::ONE]);
            denominator *= xs[i] - xj;
        }
        let scale = ys[i] * denominator.inv();
        for (k, &coeff) in numerator.iter().enumerate() {
            result[k] += coeff * scale;
        }
    }
    result
}

/// Un-reshapes rows back into a flat codeword. Inverse of the grouping [`fold_codeword`] reads.
pub fn flatten_rows<E: FieldElement>(rows: &[[E; 4]]) -> Vec<E> {
    untranspose_slice(rows)
}

/// Returns the row index in the next (quartered) layer that `position` folds into.
pub fn fold_position(position: usize, next_domain_size: usize) -> usize {
    position % (next_domain_size / 4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::field::f128::BaseElement;
    use proptest::prelude::*;

    #[test]
    fn fold_codeword_matches_direct_poly_evaluation() {
        // codeword of the polynomial p(x) = 3 + 5x + 7x^2 + 11x^3 over a size-16 coset.
        let poly = vec![
            BaseElement::from(3u8),
            BaseElement::from(5u8),
            BaseElement::from(7u8),
            BaseElement::from(11u8),
        ];
        let domain_size = 16;
        let offset = BaseElement::GENERATOR;
        let g = BaseElement::get_root_of_unity(log2(domain_size));
        let evaluations: Vec<BaseElement> = (0..domain_size)
            .map(|i| polynom::eval(&poly, offset * g.exp(i as u128)))
            .collect();

        let alpha = BaseElement::from(9u8);
        let folded = fold_codeword(&evaluations, domain_size, offset, alpha);
        assert_eq!(domain_size / 4, folded.len());

        // every folded value should equal p evaluated at alpha, since p has degree < 4 and is
        // therefore its own row-interpolant at every row.
        let expected = polynom::eval(&poly, alpha);
        for value in folded {
            assert_eq!(expected, value);
        }
    }

    #[test]
    fn fold_position_wraps_into_next_layer_row_count() {
        assert_eq!(3, fold_position(3, 64));
        assert_eq!(1, fold_position(17, 64));
    }

    proptest::proptest! {
        /// `fold_row`, given the single row a verifier opens, must reproduce the same value
        /// `fold_codeword` computes for that row when folding the whole codeword at once: a
        /// verifier that only ever sees one row per query must still land on the prover's answer.
        #[test]
        fn fold_row_matches_fold_codeword_for_random_rows(
            coeffs in proptest::collection::vec(any::<u64>(), 1..9),
            alpha_raw in any::<u64>(),
        ) {
            let poly: Vec<BaseElement> = coeffs.into_iter().map(BaseElement::from).collect();
            let domain_size = 16;
            let offset = BaseElement::GENERATOR;
            let g = BaseElement::get_root_of_unity(log2(domain_size));
            let evaluations: Vec<BaseElement> = (0..domain_size)
                .map(|i| polynom::eval(&poly, offset * g.exp(i as u128)))
                .collect();

            let alpha = BaseElement::from(alpha_raw);
            let folded = fold_codeword(&evaluations, domain_size, offset, alpha);

            let rows = transpose_slice::<BaseElement, 4>(&evaluations);
            for (row_index, row) in rows.iter().enumerate() {
                let value = fold_row(domain_size, offset, row_index, *row, alpha);
                prop_assert_eq!(value, folded[row_index]);
            }
        }
    }
}
