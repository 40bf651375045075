// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::FriError;
use crate::options::FriOptions;
use crate::public_coin::PublicCoin;
use crate::quartic;
use crypto::{BatchMerkleProof, Hasher, MerkleTree};
use math::field::{FieldElement, StarkField};
use math::polynom;
use math::utils::log2;

/// Exposes a verifier's parsed view of a [`crate::proof::FriProof`]: the batch proof and raw
/// (unhashed) row bytes opened at every layer, plus the remainder codeword.
pub trait VerifierChannel<E: FieldElement> {
    type Hasher: Hasher;

    /// Returns the batch Merkle proof opened against each layer's commitment, in folding order.
    fn fri_layer_proofs(&self) -> &[BatchMerkleProof];

    /// Returns the raw row bytes opened in each layer's proof, in the same position order as
    /// that layer's proof values.
    fn fri_layer_queries(&self) -> &[Vec<Vec<u8>>];

    /// Returns the raw remainder codeword.
    fn fri_remainder(&self) -> &[u8];
}

/// Verifies that `evaluations` (the claimed values of the initial FRI codeword at `positions`)
/// are consistent with a polynomial of degree less than `domain_size / options.blowup_factor()`.
///
/// Implements the three-stage check: per-layer Merkle-consistency and fold-consistency (stages
/// 1-2 interleaved, one round per committed layer), followed by the remainder's own commitment
/// and low-degree check (stage 3).
pub fn verify<B, E, C, H>(
    channel: &C,
    evaluations: &[E],
    positions: &[usize],
    domain_size: usize,
    options: &FriOptions<B>,
) -> Result<(), FriError>
where
    B: StarkField,
    E: FieldElement + From<B>,
    H: Hasher,
    C: VerifierChannel<E, Hasher = H> + PublicCoin,
{
    let commitments = channel.fri_layer_commitments();
    let layer_proofs = channel.fri_layer_proofs();
    let layer_queries = channel.fri_layer_queries();

    if commitments.len() != layer_proofs.len() || commitments.len() != layer_queries.len() {
        return Err(FriError::NumPositionEvaluationMismatch);
    }
    if positions.len() != evaluations.len() {
        return Err(FriError::NumPositionEvaluationMismatch);
    }

    let mut current_domain_size = domain_size;
    let mut current_offset = options.domain_offset();
    let mut current_positions = positions.to_vec();
    let mut current_values = evaluations.to_vec();

    for depth in 0..commitments.len() {
        let row_count = current_domain_size / 4;

        let mut layer_positions: Vec<usize> =
            current_positions.iter().map(|&p| p % row_count).collect();
        layer_positions.sort_unstable();
        layer_positions.dedup();

        if !MerkleTree::verify_batch(
            &commitments[depth],
            &layer_positions,
            &layer_proofs[depth],
            H::hash_fn(),
        ) {
            return Err(FriError::LayerCommitmentMismatch(depth));
        }

        let raw_rows = &layer_queries[depth];
        if raw_rows.len() != layer_positions.len() {
            return Err(FriError::NumPositionEvaluationMismatch);
        }

        let mut rows: Vec<[E; 4]> = Vec::with_capacity(raw_rows.len());
        for bytes in raw_rows {
            let elements = E::bytes_as_elements(bytes)
                .map_err(|_| FriError::LayerCommitmentMismatch(depth))?;
            if elements.len() != 4 {
                return Err(FriError::LayerCommitmentMismatch(depth));
            }
            rows.push([elements[0], elements[1], elements[2], elements[3]]);
        }

        // every value the previous round (or the caller, at depth 0) claims at `current_positions`
        // must sit at the right slot of the row this layer opened for it.
        for (&p, &claimed) in current_positions.iter().zip(current_values.iter()) {
            let reduced = p % row_count;
            let row_idx = layer_positions
                .binary_search(&reduced)
                .map_err(|_| FriError::InvalidLayerFolding(depth))?;
            let slot = p / row_count;
            if rows[row_idx][slot] != claimed {
                return Err(FriError::InvalidLayerFolding(depth));
            }
        }

        let alpha: E = channel.draw_fri_alpha(depth);
        let mut next_values = Vec::with_capacity(layer_positions.len());
        for (&row_idx, &row) in layer_positions.iter().zip(rows.iter()) {
            next_values.push(quartic::fold_row(
                current_domain_size,
                current_offset,
                row_idx,
                row,
                alpha,
            ));
        }

        current_positions = layer_positions;
        current_values = next_values;
        current_domain_size = row_count;
        current_offset = current_offset.exp(4);
    }

    // stage 3: the remainder codeword
    let remainder = E::bytes_as_elements(channel.fri_remainder())
        .map_err(|_| FriError::RemainderDegreeMismatch)?;
    if remainder.len() != current_domain_size {
        return Err(FriError::RemainderCommitmentMismatch);
    }
    for (&p, &claimed) in current_positions.iter().zip(current_values.iter()) {
        if remainder[p] != claimed {
            return Err(FriError::RemainderCommitmentMismatch);
        }
    }

    let max_remainder_degree = current_domain_size / options.blowup_factor();
    let g = B::get_root_of_unity(log2(current_domain_size));
    let xs: Vec<E> = (0..current_domain_size)
        .map(|i| E::from(current_offset * g.exp(i as u128)))
        .collect();
    let coeffs = quartic::interpolate(&xs, remainder);
    if polynom::degree_of(&coeffs) >= max_remainder_degree {
        return Err(FriError::RemainderDegreeMismatch);
    }

    Ok(())
}
