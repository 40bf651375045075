// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crate::ProofOptions;
use crypto::{BatchMerkleProof, Hasher, MerkleTree};
use utils::{ByteReader, ByteWriter, DeserializationError};

// COMMITMENTS
// ================================================================================================

/// The Merkle roots a prover commits to, in the order they are sent: the execution trace, the
/// linear combinator's codeword (`lcRoot`), and then one root per FRI layer.
#[derive(Clone)]
pub struct Commitments {
    pub trace_root: [u8; 32],
    pub lc_root: [u8; 32],
    pub fri_roots: Vec<[u8; 32]>,
}

impl Commitments {
    pub fn serialize(&self, target: &mut ByteWriter) {
        target.write_bytes(&self.trace_root);
        target.write_bytes(&self.lc_root);
        target.write_u64_vint(self.fri_roots.len() as u64);
        for root in self.fri_roots.iter() {
            target.write_bytes(root);
        }
    }

    pub fn deserialize(source: &mut ByteReader) -> Result<Self, DeserializationError> {
        let trace_root = source.read_array::<32>()?;
        let lc_root = source.read_array::<32>()?;
        let num_fri_roots = source.read_u64_vint()? as usize;
        let mut fri_roots = Vec::with_capacity(num_fri_roots);
        for _ in 0..num_fri_roots {
            fri_roots.push(source.read_array::<32>()?);
        }
        Ok(Commitments {
            trace_root,
            lc_root,
            fri_roots,
        })
    }
}

// OUT-OF-DOMAIN EVALUATION FRAME
// ================================================================================================

/// Serialized trace polynomial evaluations at the two out-of-domain points `z` and `z * g` a
/// verifier checks the transition constraints against directly, instead of re-evaluating them
/// over the whole constraint evaluation domain.
#[derive(Clone)]
pub struct OodEvaluationFrame {
    pub trace_at_z1: Vec<u8>,
    pub trace_at_z2: Vec<u8>,
}

impl OodEvaluationFrame {
    pub fn serialize(&self, target: &mut ByteWriter) {
        target.write_u64_vint(self.trace_at_z1.len() as u64);
        target.write_bytes(&self.trace_at_z1);
        target.write_u64_vint(self.trace_at_z2.len() as u64);
        target.write_bytes(&self.trace_at_z2);
    }

    pub fn deserialize(source: &mut ByteReader) -> Result<Self, DeserializationError> {
        let len1 = source.read_u64_vint()? as usize;
        let trace_at_z1 = source.read_bytes(len1)?.to_vec();
        let len2 = source.read_u64_vint()? as usize;
        let trace_at_z2 = source.read_bytes(len2)?.to_vec();
        Ok(OodEvaluationFrame {
            trace_at_z1,
            trace_at_z2,
        })
    }
}

// QUERIES
// ================================================================================================

/// A batch Merkle proof together with the raw (un-hashed) leaf contents it authenticates. The
/// proof's own `values` are leaf digests, which is all a verifier needs to check inclusion, but
/// it takes the raw bytes underneath to recover the execution trace states or constraint
/// evaluations the leaves actually commit to.
#[derive(Clone)]
pub struct Queries {
    paths: Vec<u8>,
    values: Vec<u8>,
    num_leaves: usize,
}

impl Queries {
    /// Builds a new query batch from a Merkle tree, the (sorted, deduplicated) positions to
    /// open, and the raw bytes of every leaf at those positions, in the same order.
    pub fn new(tree: &MerkleTree, positions: &[usize], leaf_values: Vec<Vec<u8>>) -> Self {
        let proof = tree.prove_batch(positions);
        let mut paths = ByteWriter::new();
        proof.serialize_nodes(&mut paths);

        let mut values = Vec::new();
        for leaf in leaf_values.iter() {
            values.extend_from_slice(leaf);
        }

        Queries {
            paths: paths.into_bytes(),
            values,
            num_leaves: leaf_values.len(),
        }
    }

    /// Splits this batch back into a [`BatchMerkleProof`] and the raw per-leaf byte chunks it
    /// authenticates. `num_leaves` is the total leaf count of the tree the proof was drawn
    /// against, used only to sanity-check the decoded proof depth.
    pub fn into_batch<H: Hasher>(self, num_leaves: usize) -> (BatchMerkleProof, Vec<Vec<u8>>) {
        let mut reader = ByteReader::new(&self.paths);
        let proof =
            BatchMerkleProof::deserialize(&mut reader).expect("proof bytes were not well-formed");
        assert_eq!(
            1usize << proof.depth,
            num_leaves,
            "query proof depth does not match expected tree size"
        );

        let chunk_size = if self.num_leaves == 0 {
            0
        } else {
            self.values.len() / self.num_leaves
        };
        let values = self
            .values
            .chunks(chunk_size.max(1))
            .take(self.num_leaves)
            .map(|chunk| chunk.to_vec())
            .collect();

        (proof, values)
    }

    pub fn serialize(&self, target: &mut ByteWriter) {
        target.write_u64_vint(self.paths.len() as u64);
        target.write_bytes(&self.paths);
        target.write_u64_vint(self.num_leaves as u64);
        target.write_u64_vint(self.values.len() as u64);
        target.write_bytes(&self.values);
    }

    pub fn deserialize(source: &mut ByteReader) -> Result<Self, DeserializationError> {
        let paths_len = source.read_u64_vint()? as usize;
        let paths = source.read_bytes(paths_len)?.to_vec();
        let num_leaves = source.read_u64_vint()? as usize;
        let values_len = source.read_u64_vint()? as usize;
        let values = source.read_bytes(values_len)?.to_vec();
        Ok(Queries {
            paths,
            values,
            num_leaves,
        })
    }
}

// STARK PROOF
// ================================================================================================

/// A complete, self-contained STARK proof: every commitment, out-of-domain evaluation, and
/// query opening the verifier needs, plus the FRI low-degree proof over the linear combinator's
/// codeword (`lcProof` is `lc_queries` here — the combinator's commitment opened at the
/// execution query positions). Also carries the unextended trace length and the `ProofOptions`
/// the prover ran under, so a verifier can reconstruct the `Air` (and thus the
/// `ComputationContext` every other check is parameterized by) from the proof and the public
/// inputs alone.
#[derive(Clone)]
pub struct StarkProof {
    pub trace_length: usize,
    pub options: ProofOptions,
    pub commitments: Commitments,
    pub ood_frame: OodEvaluationFrame,
    pub trace_queries: Queries,
    pub lc_queries: Queries,
    pub fri_proof: fri::FriProof,
    pub pow_nonce: u64,
}

impl StarkProof {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut target = ByteWriter::new();
        target.write_u64_vint(self.trace_length as u64);
        self.options.serialize(&mut target);
        self.commitments.serialize(&mut target);
        self.ood_frame.serialize(&mut target);
        self.trace_queries.serialize(&mut target);
        self.lc_queries.serialize(&mut target);
        self.fri_proof.serialize(&mut target);
        target.write_u64_vint(self.pow_nonce);
        target.into_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DeserializationError> {
        let mut source = ByteReader::new(bytes);
        let trace_length = source.read_u64_vint()? as usize;
        let options = ProofOptions::deserialize(&mut source)?;
        let commitments = Commitments::deserialize(&mut source)?;
        let ood_frame = OodEvaluationFrame::deserialize(&mut source)?;
        let trace_queries = Queries::deserialize(&mut source)?;
        let lc_queries = Queries::deserialize(&mut source)?;
        // the number of FRI layers is never written to the wire: it follows deterministically
        // from the LDE domain size, which is itself `trace_length * extension_factor`.
        let lde_domain_size = trace_length * options.extension_factor();
        let num_fri_layers = fri::options::num_fri_layers(lde_domain_size);
        let fri_proof = fri::FriProof::deserialize(&mut source, num_fri_layers)?;
        let pow_nonce = source.read_u64_vint()?;
        Ok(StarkProof {
            trace_length,
            options,
            commitments,
            ood_frame,
            trace_queries,
            lc_queries,
            fri_proof,
            pow_nonce,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto::Sha256;

    fn make_leaves(n: usize) -> Vec<[u8; 32]> {
        (0..n)
            .map(|i| {
                let mut leaf = [0u8; 32];
                leaf[0..8].copy_from_slice(&(i as u64).to_le_bytes());
                leaf
            })
            .collect()
    }

    #[test]
    fn queries_round_trip_through_a_merkle_tree() {
        let tree = MerkleTree::new(make_leaves(16), Sha256::hash_fn());
        let positions = [1usize, 5, 9];
        let leaf_values: Vec<Vec<u8>> = positions.iter().map(|&p| vec![p as u8; 4]).collect();
        let queries = Queries::new(&tree, &positions, leaf_values.clone());

        let mut writer = ByteWriter::new();
        queries.serialize(&mut writer);
        let bytes = writer.into_bytes();
        let mut reader = ByteReader::new(&bytes);
        let decoded = Queries::deserialize(&mut reader).unwrap();

        let (proof, values) = decoded.into_batch::<Sha256>(16);
        assert!(MerkleTree::verify_batch(
            tree.root(),
            &positions,
            &proof,
            Sha256::hash_fn()
        ));
        assert_eq!(leaf_values, values);
    }
}
