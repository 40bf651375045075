// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crypto::BatchMerkleProof;
use utils::{ByteReader, ByteWriter, DeserializationError};

/// The committed query openings for a single FRI layer: a batch Merkle proof over the hashed
/// rows at the queried positions, plus the raw (unhashed) row bytes those leaves commit to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FriProofLayer {
    pub proof: BatchMerkleProof,
    pub values: Vec<u8>,
}

impl FriProofLayer {
    pub fn serialize(&self, target: &mut ByteWriter) {
        self.proof.serialize_nodes(target);
        target.write_u64_vint(self.values.len() as u64);
        target.write_bytes(&self.values);
    }

    pub fn deserialize(source: &mut ByteReader) -> Result<Self, DeserializationError> {
        let proof = BatchMerkleProof::deserialize(source)?;
        let len = source.read_u64_vint()? as usize;
        let values = source.read_bytes(len)?.to_vec();
        Ok(FriProofLayer { proof, values })
    }
}

/// A full FRI low-degree proof: one committed-and-queried layer per folding round, followed by
/// the raw remainder codeword reached once folding stops. The number of layers is never written
/// to the wire: both prover and verifier derive it from the LDE domain size via
/// [`crate::options::num_fri_layers`], so [`Self::deserialize`] needs that count passed in rather
/// than reading it back out of the proof.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FriProof {
    pub layers: Vec<FriProofLayer>,
    pub remainder: Vec<u8>,
}

impl FriProof {
    pub fn new(layers: Vec<FriProofLayer>, remainder: Vec<u8>) -> Self {
        FriProof { layers, remainder }
    }

    pub fn serialize(&self, target: &mut ByteWriter) {
        for layer in &self.layers {
            layer.serialize(target);
        }
        target.write_u64_vint(self.remainder.len() as u64);
        target.write_bytes(&self.remainder);
    }

    pub fn deserialize(
        source: &mut ByteReader,
        num_layers: usize,
    ) -> Result<Self, DeserializationError> {
        let mut layers = Vec::with_capacity(num_layers);
        for _ in 0..num_layers {
            layers.push(FriProofLayer::deserialize(source)?);
        }
        let remainder_len = source.read_u64_vint()? as usize;
        let remainder = source.read_bytes(remainder_len)?.to_vec();
        Ok(FriProof { layers, remainder })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        let proof = FriProof::new(
            vec![FriProofLayer {
                proof: BatchMerkleProof {
                    values: vec![[1u8; 32]],
                    nodes: vec![vec![[2u8; 32]]],
                    depth: 1,
                },
                values: vec![9, 9, 9, 9],
            }],
            vec![1, 2, 3, 4],
        );

        let mut writer = ByteWriter::new();
        proof.serialize(&mut writer);
        let bytes = writer.into_bytes();

        let mut reader = ByteReader::new(&bytes);
        let decoded = FriProof::deserialize(&mut reader, 1).unwrap();
        assert_eq!(proof, decoded);
    }
}
