// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crate::EvaluationFrame;
use crypto::Hasher;
use math::field::{FieldElement, StarkField};

/// Returns the number of elements of `E` packed into a single constraint evaluation Merkle leaf.
/// Packing several evaluations per leaf keeps the constraint tree shallow (and thus its batch
/// proofs small) without weakening the commitment: a leaf digest is still 32 bytes regardless of
/// how many elements of `E` are hashed into it.
pub fn evaluations_per_leaf<E: FieldElement, H: Hasher>() -> usize {
    let _ = H::hash_fn();
    (32 / E::ELEMENT_BYTES).max(1)
}

/// Maps execution-trace query positions to the (deduplicated) constraint evaluation leaf indices
/// that need to be opened to cover them, given `evaluations_per_leaf` elements packed per leaf.
///
/// `positions` must be sorted and deduplicated, as returned by query position generation.
pub fn map_trace_to_constraint_positions(
    positions: &[usize],
    evaluations_per_leaf: usize,
) -> Vec<usize> {
    let mut result = Vec::new();
    for &position in positions {
        let leaf_position = position / evaluations_per_leaf;
        if result.last() != Some(&leaf_position) {
            result.push(leaf_position);
        }
    }
    result
}

/// The DEEP-ALI quotient: `sum_i c_i.0 * (T_i(x) - T_i(z)) / (x - z) + c_i.1 * (T_i(x*g) -
/// T_i(z*g)) / (x - z*g)`, evaluated from an opened trace row `frame` and the out-of-domain
/// frame `ood_frame`. Ties the committed constraint codeword to the actual (low-degree) trace
/// polynomials instead of just the values opened from the trace commitment; both the prover
/// (when building the codeword) and the verifier (when cross-checking it) compute this the same
/// way from their respective `frame`s.
pub fn deep_quotient<B: StarkField>(
    frame: &EvaluationFrame<B>,
    ood_frame: &EvaluationFrame<B>,
    coefficients: &[(B, B)],
    x: B,
    z: B,
    z_next: B,
) -> B {
    let mut result = B::ZERO;
    for (i, &(c1, c2)) in coefficients.iter().enumerate() {
        result += c1 * (frame.current[i] - ood_frame.current[i]) / (x - z);
        result += c2 * (frame.next[i] - ood_frame.next[i]) / (x - z_next);
    }
    result
}
