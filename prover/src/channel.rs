// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use common::{Air, ComputationContext, PublicCoin};
use crypto::Hasher;
use std::convert::TryInto;
use std::marker::PhantomData;

/// The prover-side counterpart of `verifier::VerifierChannel`: builds the same Fiat-Shamir
/// seeds from the same commitments, just as they become available during proof generation
/// instead of all at once from a finished proof.
pub struct ProverChannel<'a, A: Air, H: Hasher> {
    air: &'a A,
    trace_root: [u8; 32],
    lc_root: [u8; 32],
    fri_roots: Vec<[u8; 32]>,
    query_seed: [u8; 32],
    pow_nonce: u64,
    _hasher: PhantomData<H>,
}

impl<'a, A: Air, H: Hasher> ProverChannel<'a, A, H> {
    pub fn new(air: &'a A) -> Self {
        ProverChannel {
            air,
            trace_root: [0u8; 32],
            lc_root: [0u8; 32],
            fri_roots: Vec::new(),
            query_seed: [0u8; 32],
            pow_nonce: 0,
            _hasher: PhantomData,
        }
    }

    pub fn commit_trace(&mut self, root: [u8; 32]) {
        self.trace_root = root;
    }

    pub fn commit_lc(&mut self, root: [u8; 32]) {
        self.lc_root = root;
    }

    /// Records the FRI layer commitments and grinds a proof-of-work nonce over them until the
    /// resulting query seed satisfies the configured grinding factor. Returns the grinded seed;
    /// the nonce itself is available afterwards via [`Self::pow_nonce`].
    pub fn commit_fri_layers(&mut self, fri_roots: Vec<[u8; 32]>) -> [u8; 32] {
        self.fri_roots = fri_roots;

        let hash_fn = H::hash_fn();
        let mut root_bytes: Vec<u8> = Vec::with_capacity(self.fri_roots.len() * 32);
        for root in self.fri_roots.iter() {
            root.iter().for_each(|&v| root_bytes.push(v));
        }
        let mut base_seed = [0u8; 32];
        hash_fn(&root_bytes, &mut base_seed);

        let grinding_factor = self.air.context().options().grinding_factor();
        let mut nonce = 0u64;
        let mut seed = [0u8; 32];
        loop {
            let mut input = [0u8; 64];
            input[0..32].copy_from_slice(&base_seed);
            input[56..].copy_from_slice(&nonce.to_le_bytes());
            hash_fn(&input, &mut seed);

            let seed_head = u64::from_le_bytes(seed[..8].try_into().unwrap());
            if seed_head.trailing_zeros() >= grinding_factor {
                break;
            }
            nonce += 1;
        }

        self.pow_nonce = nonce;
        self.query_seed = seed;
        seed
    }

    pub fn pow_nonce(&self) -> u64 {
        self.pow_nonce
    }
}

impl<'a, A: Air, H: Hasher> PublicCoin for ProverChannel<'a, A, H> {
    type Hasher = H;

    fn context(&self) -> &ComputationContext {
        self.air.context()
    }

    fn constraint_seed(&self) -> [u8; 32] {
        self.trace_root
    }

    fn composition_seed(&self) -> [u8; 32] {
        self.lc_root
    }

    fn query_seed(&self) -> [u8; 32] {
        self.query_seed
    }
}
