// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! An implementation of the FRI (Fast Reed-Solomon Interactive Oracle Proof of Proximity) low
//! degree test: given oracle access to a codeword, convinces a verifier that it is close to the
//! evaluations of some polynomial of bounded degree, without the verifier ever reading the whole
//! codeword. This is the core tool the outer STARK protocol ([`common`], `prover`, `verifier`)
//! builds its succinctness on.
//!
//! Degree reduction happens in rounds of 4 (`FOLDING_FACTOR`): every round reshapes the current
//! codeword into rows of 4, interpolates a cubic through each row, and evaluates every cubic at
//! a common Fiat-Shamir-derived point to produce the next (quarter-length) codeword. Folding
//! stops once the codeword is small enough ([`options::MAX_REMAINDER_LENGTH`]) to be sent to the
//! verifier directly instead of committed to and queried.

pub mod combinator;
pub mod errors;
pub mod options;
pub mod proof;
pub mod prover;
pub mod public_coin;
pub mod quartic;
pub mod verifier;

pub use combinator::{combine, raise_degree};
pub use errors::{ConfigurationError, FriError};
pub use options::FriOptions;
pub use proof::{FriProof, FriProofLayer};
pub use prover::FriProver;
pub use public_coin::PublicCoin;
pub use verifier::{verify, VerifierChannel};
