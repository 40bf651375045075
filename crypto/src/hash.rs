// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Hash function capability consumed by [`crate::merkle`] and [`crate::random`]. A `Hasher`
//! is a zero-sized type identifying a 32-byte-digest hash function; `H::hash_fn()` returns a
//! plain function pointer so call sites (e.g. `MerkleTree::new`) can be generic over the
//! algorithm without paying for dynamic dispatch.

use blake2::{Blake2s, Digest as _};
use sha2::{Digest as _, Sha256 as Sha256Impl};

/// A hash function taking an input byte slice and writing a 32-byte digest into `result`.
pub type HashFunction = fn(&[u8], &mut [u8; 32]);

/// Identifies a concrete 32-byte-digest hash function.
pub trait Hasher {
    fn hash_fn() -> HashFunction;
}

/// SHA3-family/SHA-2 member used by default; collision resistance is the field-tested baseline
/// for STARK commitments.
pub struct Sha256;

impl Hasher for Sha256 {
    fn hash_fn() -> HashFunction {
        sha256
    }
}

fn sha256(values: &[u8], result: &mut [u8; 32]) {
    let digest = Sha256Impl::digest(values);
    result.copy_from_slice(&digest);
}

/// BLAKE2s, offered as a faster alternative to SHA-256 at the same security level.
pub struct Blake2s256;

impl Hasher for Blake2s256 {
    fn hash_fn() -> HashFunction {
        blake2s256
    }
}

fn blake2s256(values: &[u8], result: &mut [u8; 32]) {
    let digest = Blake2s::digest(values);
    result.copy_from_slice(&digest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_is_deterministic() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        Sha256::hash_fn()(b"winterfell", &mut a);
        Sha256::hash_fn()(b"winterfell", &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn blake2s256_differs_from_sha256() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        Sha256::hash_fn()(b"winterfell", &mut a);
        Blake2s256::hash_fn()(b"winterfell", &mut b);
        assert_ne!(a, b);
    }
}
