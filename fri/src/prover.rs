// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Builds a chain of quartic-folding layer commitments down to a small remainder, and opens
//! that chain at a set of query positions. `FriProver` owns the full folding history (every
//! intermediate codeword and its commitment tree) so that [`Self::build_proof`] can be called
//! after the query positions are known, without re-deriving any layer.

use crate::options::FriOptions;
use crate::proof::{FriProof, FriProofLayer};
use crate::quartic;
use crypto::{DefaultRandomElementGenerator, Hasher, MerkleTree, RandomElementGenerator};
use math::field::{FieldElement, StarkField};
use std::marker::PhantomData;
use utils::transpose_slice;

pub struct FriProver<B, E, H>
where
    B: StarkField,
    E: FieldElement + From<B>,
    H: Hasher,
{
    options: FriOptions<B>,
    layer_trees: Vec<MerkleTree>,
    layer_rows: Vec<Vec<[E; 4]>>,
    remainder: Vec<E>,
    remainder_offset: B,
    _hasher: PhantomData<H>,
}

impl<B, E, H> FriProver<B, E, H>
where
    B: StarkField,
    E: FieldElement + From<B>,
    H: Hasher,
{
    pub fn new(options: FriOptions<B>) -> Self {
        let offset = options.domain_offset();
        FriProver {
            options,
            layer_trees: Vec::new(),
            layer_rows: Vec::new(),
            remainder: Vec::new(),
            remainder_offset: offset,
            _hasher: PhantomData,
        }
    }

    /// Returns the commitment of every layer built so far, in folding order.
    pub fn layer_commitments(&self) -> Vec<[u8; 32]> {
        self.layer_trees.iter().map(|t| *t.root()).collect()
    }

    /// Folds `evaluations` (a codeword over the coset `options.domain_offset() * <g>`) down to
    /// [`crate::options::MAX_REMAINDER_LENGTH`] or fewer elements, committing every intermediate
    /// layer. The folding coefficient for each round is drawn deterministically from that
    /// round's own layer commitment, so no external transcript is threaded through here.
    pub fn build_layers(&mut self, mut evaluations: Vec<E>) {
        let mut domain_size = evaluations.len();
        let mut offset = self.options.domain_offset();

        loop {
            let rows = transpose_slice::<E, 4>(&evaluations);
            let leaves: Vec<[u8; 32]> = rows
                .iter()
                .map(|row| {
                    let mut digest = [0u8; 32];
                    H::hash_fn()(E::elements_as_bytes(row), &mut digest);
                    digest
                })
                .collect();
            let tree = MerkleTree::new(leaves, H::hash_fn());
            let root = *tree.root();
            self.layer_trees.push(tree);
            self.layer_rows.push(rows);

            let mut prng = DefaultRandomElementGenerator::<H>::new_from_seed(root);
            let alpha: E = prng.draw();
            let folded = quartic::fold_codeword(&evaluations, domain_size, offset, alpha);

            if domain_size / 4 <= crate::options::MAX_REMAINDER_LENGTH {
                self.remainder = folded;
                self.remainder_offset = offset.exp(4);
                return;
            }

            evaluations = folded;
            domain_size /= 4;
            offset = offset.exp(4);
        }
    }

    /// Checks that the remainder codeword built by [`Self::build_layers`] is itself the
    /// evaluation of a polynomial of degree below `domain_size / blowup_factor`, the same bound
    /// the verifier enforces in its own final stage. Intended as a `debug_assertions`-only
    /// self-check in `prove`, never as a replacement for the verifier's own check.
    pub fn verify_remainder_degree(&self) -> bool {
        let domain_size = self.remainder.len();
        let max_remainder_degree = domain_size / self.options.blowup_factor();
        let g = B::get_root_of_unity(math::utils::log2(domain_size));
        let xs: Vec<E> = (0..domain_size)
            .map(|i| E::from(self.remainder_offset * g.exp(i as u128)))
            .collect();
        let coeffs = quartic::interpolate(&xs, &self.remainder);
        math::polynom::degree_of(&coeffs) < max_remainder_degree
    }

    /// Opens every committed layer at `positions` (positions over the *initial* domain; each
    /// layer reduces them modulo its own row count) and returns the resulting proof together
    /// with the raw remainder codeword.
    pub fn build_proof(&self, positions: &[usize]) -> FriProof {
        let mut layers = Vec::with_capacity(self.layer_trees.len());
        for (tree, rows) in self.layer_trees.iter().zip(self.layer_rows.iter()) {
            let row_count = rows.len();
            let mut layer_positions: Vec<usize> = positions.iter().map(|&p| p % row_count).collect();
            layer_positions.sort_unstable();
            layer_positions.dedup();

            let proof = tree.prove_batch(&layer_positions);
            let mut values = Vec::with_capacity(layer_positions.len() * 4 * E::ELEMENT_BYTES);
            for &p in &layer_positions {
                values.extend_from_slice(E::elements_as_bytes(&rows[p]));
            }
            layers.push(FriProofLayer { proof, values });
        }

        let remainder = E::elements_as_bytes(&self.remainder).to_vec();
        FriProof::new(layers, remainder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto::Sha256;
    use math::field::f128::BaseElement;
    use math::polynom;

    fn build_codeword(poly: &[BaseElement], domain_size: usize, offset: BaseElement) -> Vec<BaseElement> {
        let g = BaseElement::get_root_of_unity(math::utils::log2(domain_size));
        (0..domain_size)
            .map(|i| polynom::eval(poly, offset * g.exp(i as u128)))
            .collect()
    }

    #[test]
    fn folding_reaches_remainder_bound() {
        let domain_size = 4096;
        let offset = BaseElement::GENERATOR;
        let poly: Vec<BaseElement> = (0..16).map(|i| BaseElement::from(i as u64 + 1)).collect();
        let codeword = build_codeword(&poly, domain_size, offset);

        let options = FriOptions::new(domain_size / poly.len(), offset).unwrap();
        let mut prover = FriProver::<BaseElement, BaseElement, Sha256>::new(options);
        prover.build_layers(codeword);

        assert!(prover.remainder.len() <= crate::options::MAX_REMAINDER_LENGTH);
        assert_eq!(options.num_fri_layers(domain_size), prover.layer_trees.len());
    }

    #[test]
    fn remainder_degree_self_check_passes_for_valid_codeword() {
        let domain_size = 4096;
        let offset = BaseElement::GENERATOR;
        let poly: Vec<BaseElement> = (0..16).map(|i| BaseElement::from(i as u64 + 1)).collect();
        let codeword = build_codeword(&poly, domain_size, offset);

        let options = FriOptions::new(domain_size / poly.len(), offset).unwrap();
        let mut prover = FriProver::<BaseElement, BaseElement, Sha256>::new(options);
        prover.build_layers(codeword);

        assert!(prover.verify_remainder_degree());
    }

    #[test]
    fn remainder_degree_self_check_fails_for_tampered_remainder() {
        let domain_size = 4096;
        let offset = BaseElement::GENERATOR;
        let poly: Vec<BaseElement> = (0..16).map(|i| BaseElement::from(i as u64 + 1)).collect();
        let codeword = build_codeword(&poly, domain_size, offset);

        let options = FriOptions::new(domain_size / poly.len(), offset).unwrap();
        let mut prover = FriProver::<BaseElement, BaseElement, Sha256>::new(options);
        prover.build_layers(codeword);
        prover.remainder[0] += BaseElement::ONE;

        assert!(!prover.verify_remainder_degree());
    }

    #[test]
    fn proof_opens_consistent_rows() {
        let domain_size = 1024;
        let offset = BaseElement::GENERATOR;
        let poly: Vec<BaseElement> = (0..8).map(|i| BaseElement::from(i as u64 + 1)).collect();
        let codeword = build_codeword(&poly, domain_size, offset);

        let options = FriOptions::new(domain_size / poly.len(), offset).unwrap();
        let mut prover = FriProver::<BaseElement, BaseElement, Sha256>::new(options);
        prover.build_layers(codeword);

        let positions = vec![3usize, 17, 200];
        let proof = prover.build_proof(&positions);
        assert_eq!(prover.layer_trees.len(), proof.layers.len());
        for layer in &proof.layers {
            assert!(!layer.values.is_empty());
        }
    }
}
