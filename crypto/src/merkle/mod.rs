// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A binary Merkle tree over 32-byte leaf digests, with batch inclusion proofs that share
//! interior nodes across paths. `MerkleTree` and `BatchMerkleProof` are deliberately not
//! generic over a `Hasher` type: the hash function is threaded through as a plain
//! [`HashFunction`] value, the same way the rest of this crate treats hashing.

use crate::hash::HashFunction;
use utils::{ByteReader, ByteWriter, DeserializationError};

#[cfg(feature = "concurrent")]
use rayon::prelude::*;

const ZERO_DIGEST: [u8; 32] = [0u8; 32];

// MERKLE TREE
// ================================================================================================

/// A binary hash tree over a power-of-two vector of leaf digests.
pub struct MerkleTree {
    nodes: Vec<[u8; 32]>,
    leaves: Vec<[u8; 32]>,
}

impl MerkleTree {
    /// Builds a new Merkle tree from `leaves`, padding up to the next power of two with an
    /// all-zero digest if needed.
    ///
    /// # Panics
    /// Panics if `leaves` is empty.
    pub fn new(mut leaves: Vec<[u8; 32]>, hash_fn: HashFunction) -> Self {
        assert!(!leaves.is_empty(), "a Merkle tree must have at least one leaf");
        let padded_len = leaves.len().next_power_of_two();
        leaves.resize(padded_len, ZERO_DIGEST);

        let n = leaves.len();
        let mut nodes = vec![ZERO_DIGEST; 2 * n];
        nodes[n..].copy_from_slice(&leaves);

        // a single-leaf tree has no internal nodes at all: `nodes[n..2n)` and `nodes[1..2)`
        // coincide, so the leaf is already sitting at the root position.
        if n == 1 {
            return MerkleTree { nodes, leaves };
        }

        // the bottom internal level (n/2 hashes, each independent of the others) is the bulk of
        // the work for a wide tree, so it is the only level worth parallelizing; the remaining
        // levels shrink by half each time and are cheap enough to run serially.
        #[cfg(feature = "concurrent")]
        {
            let (internal, leaf_level) = nodes.split_at_mut(n);
            internal[n / 2..].par_iter_mut().enumerate().for_each(|(i, node)| {
                let mut buf = [0u8; 64];
                buf[..32].copy_from_slice(&leaf_level[2 * i]);
                buf[32..].copy_from_slice(&leaf_level[2 * i + 1]);
                hash_fn(&buf, node);
            });
        }
        #[cfg(not(feature = "concurrent"))]
        {
            for i in (n / 2..n).rev() {
                let mut buf = [0u8; 64];
                buf[..32].copy_from_slice(&nodes[2 * i]);
                buf[32..].copy_from_slice(&nodes[2 * i + 1]);
                hash_fn(&buf, &mut nodes[i]);
            }
        }

        for i in (1..n / 2).rev() {
            let mut buf = [0u8; 64];
            buf[..32].copy_from_slice(&nodes[2 * i]);
            buf[32..].copy_from_slice(&nodes[2 * i + 1]);
            hash_fn(&buf, &mut nodes[i]);
        }

        MerkleTree { nodes, leaves }
    }

    /// Returns the root digest of this tree.
    pub fn root(&self) -> &[u8; 32] {
        &self.nodes[1]
    }

    /// Returns the leaf digests of this tree, in order.
    pub fn leaves(&self) -> &[[u8; 32]] {
        &self.leaves
    }

    /// Returns the minimum set of interior sibling digests necessary to authenticate every
    /// position in `positions`, plus the leaf digests at those positions.
    ///
    /// # Panics
    /// Panics if any position is out of bounds.
    pub fn prove_batch(&self, positions: &[usize]) -> BatchMerkleProof {
        let n = self.leaves.len();
        let depth = n.trailing_zeros() as u8;

        let mut positions = positions.to_vec();
        positions.sort_unstable();
        positions.dedup();
        assert!(
            positions.last().map_or(true, |&p| p < n),
            "query position out of bounds"
        );

        let values: Vec<[u8; 32]> = positions.iter().map(|&p| self.leaves[p]).collect();

        let mut indices: Vec<usize> = positions.iter().map(|&p| p + n).collect();
        let mut nodes = Vec::with_capacity(depth as usize);
        for _ in 0..depth {
            let mut level = Vec::new();
            let mut i = 0;
            while i < indices.len() {
                let idx = indices[i];
                let sibling = idx ^ 1;
                if i + 1 < indices.len() && indices[i + 1] == sibling {
                    i += 2;
                } else {
                    level.push(self.nodes[sibling]);
                    i += 1;
                }
            }
            nodes.push(level);
            indices = indices.iter().map(|&idx| idx / 2).collect();
            indices.dedup();
        }

        BatchMerkleProof { values, nodes, depth }
    }

    /// Reconstructs the root implied by `proof` for the given `positions` and checks it against
    /// `root`.
    pub fn verify_batch(
        root: &[u8; 32],
        positions: &[usize],
        proof: &BatchMerkleProof,
        hash_fn: HashFunction,
    ) -> bool {
        let mut positions = positions.to_vec();
        positions.sort_unstable();
        positions.dedup();
        if positions.len() != proof.values.len() {
            return false;
        }

        let n = 1usize << proof.depth;
        let mut known: Vec<(usize, [u8; 32])> = positions
            .iter()
            .zip(proof.values.iter())
            .map(|(&p, &v)| (p + n, v))
            .collect();

        for level in proof.nodes.iter() {
            let mut siblings = level.iter();
            let mut next = Vec::new();
            let mut i = 0;
            while i < known.len() {
                let (idx, hash) = known[i];
                let sibling_idx = idx ^ 1;
                let sibling_hash = if i + 1 < known.len() && known[i + 1].0 == sibling_idx {
                    let h = known[i + 1].1;
                    i += 2;
                    h
                } else {
                    let h = match siblings.next() {
                        Some(h) => *h,
                        None => return false,
                    };
                    i += 1;
                    h
                };

                let (left, right) = if idx % 2 == 0 {
                    (hash, sibling_hash)
                } else {
                    (sibling_hash, hash)
                };
                let mut buf = [0u8; 64];
                buf[..32].copy_from_slice(&left);
                buf[32..].copy_from_slice(&right);
                let mut parent = [0u8; 32];
                hash_fn(&buf, &mut parent);
                next.push((idx / 2, parent));
            }
            known = next;
        }

        known.len() == 1 && known[0].1 == *root
    }
}

// BATCH MERKLE PROOF
// ================================================================================================

/// A batch Merkle inclusion proof: the leaf digests at a set of positions, plus the minimum
/// set of interior sibling digests (grouped by level, bottom-up) needed to authenticate them,
/// with shared siblings emitted exactly once.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchMerkleProof {
    pub values: Vec<[u8; 32]>,
    pub nodes: Vec<Vec<[u8; 32]>>,
    pub depth: u8,
}

impl BatchMerkleProof {
    /// Writes this proof's wire encoding to `target`: `depth`, then `values` in ascending
    /// position order, then `nodes` level by level.
    pub fn serialize_nodes(&self, target: &mut ByteWriter) {
        target.write_u8(self.depth);
        target.write_u64_vint(self.values.len() as u64);
        for value in &self.values {
            target.write_bytes(value);
        }
        for level in &self.nodes {
            target.write_u64_vint(level.len() as u64);
            for node in level {
                target.write_bytes(node);
            }
        }
    }

    /// Parses a proof previously written by [`Self::serialize_nodes`].
    pub fn deserialize(source: &mut ByteReader) -> Result<Self, DeserializationError> {
        let depth = source.read_u8()?;

        let num_values = source.read_u64_vint()? as usize;
        let mut values = Vec::with_capacity(num_values);
        for _ in 0..num_values {
            values.push(source.read_array::<32>()?);
        }

        let mut nodes = Vec::with_capacity(depth as usize);
        for _ in 0..depth {
            let level_len = source.read_u64_vint()? as usize;
            let mut level = Vec::with_capacity(level_len);
            for _ in 0..level_len {
                level.push(source.read_array::<32>()?);
            }
            nodes.push(level);
        }

        Ok(BatchMerkleProof { values, nodes, depth })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{Hasher, Sha256};
    use proptest::prelude::*;

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
    fn batch_proof_round_trips() {
        let tree = MerkleTree::new(make_leaves(16), Sha256::hash_fn());
        let positions = [1usize, 3, 7, 7, 12];
        let proof = tree.prove_batch(&positions);
        assert!(MerkleTree::verify_batch(tree.root(), &positions, &proof, Sha256::hash_fn()));
    }

    #[test]
    fn tampered_node_fails_verification() {
        let tree = MerkleTree::new(make_leaves(16), Sha256::hash_fn());
        let positions = [2usize, 9];
        let mut proof = tree.prove_batch(&positions);
        proof.nodes[0][0][0] ^= 1;
        assert!(!MerkleTree::verify_batch(tree.root(), &positions, &proof, Sha256::hash_fn()));
    }

    #[test]
    fn tampered_value_fails_verification() {
        let tree = MerkleTree::new(make_leaves(16), Sha256::hash_fn());
        let positions = [5usize];
        let mut proof = tree.prove_batch(&positions);
        proof.values[0][0] ^= 1;
        assert!(!MerkleTree::verify_batch(tree.root(), &positions, &proof, Sha256::hash_fn()));
    }

    #[test]
    fn wire_round_trip() {
        let tree = MerkleTree::new(make_leaves(32), Sha256::hash_fn());
        let proof = tree.prove_batch(&[0, 1, 2, 17, 31]);

        let mut writer = ByteWriter::new();
        proof.serialize_nodes(&mut writer);
        let bytes = writer.into_bytes();

        let mut reader = ByteReader::new(&bytes);
        let decoded = BatchMerkleProof::deserialize(&mut reader).unwrap();
        assert_eq!(proof, decoded);
    }

    proptest::proptest! {
        /// A batch proof over any subset of positions of any power-of-two leaf set verifies
        /// against the tree's root, and flipping any single byte of it breaks verification.
        #[test]
        fn batch_proof_sound_for_random_leaves_and_positions(
            log_n in 2usize..8,
            seed in 0u64..10_000,
            pos_seed in any::<u64>(),
        ) {
            let n = 1usize << log_n;
            let leaves: Vec<[u8; 32]> = (0..n)
                .map(|i| {
                    let mut leaf = [0u8; 32];
                    leaf[0..8].copy_from_slice(&(seed.wrapping_add(i as u64)).to_le_bytes());
                    leaf
                })
                .collect();
            let tree = MerkleTree::new(leaves, Sha256::hash_fn());

            let num_positions = 1 + (pos_seed as usize % n.min(8));
            let positions: Vec<usize> = (0..num_positions)
                .map(|i| ((pos_seed as usize).wrapping_add(i * 7)) % n)
                .collect();

            let proof = tree.prove_batch(&positions);
            prop_assert!(MerkleTree::verify_batch(tree.root(), &positions, &proof, Sha256::hash_fn()));

            let mut tampered = proof;
            tampered.values[0][0] ^= 1;
            prop_assert!(!MerkleTree::verify_batch(tree.root(), &positions, &tampered, Sha256::hash_fn()));
        }
    }
}
