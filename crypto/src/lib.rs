// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Hashing, Merkle commitments, and the Fiat-Shamir random coin shared by the prover and
//! verifier. This crate knows nothing about STARKs or FRI specifically — it is the "layer 2"
//! cryptographic plumbing that FRI and the outer STARK orchestration build on.

pub mod hash;
pub mod merkle;
pub mod random;

pub use hash::{Blake2s256, HashFunction, Hasher, Sha256};
pub use merkle::{BatchMerkleProof, MerkleTree};
pub use random::{DefaultRandomElementGenerator, RandomElementGenerator};
