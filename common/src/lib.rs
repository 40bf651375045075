// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Components shared by the prover and verifier: the [`Air`] trait a computation implements to
//! describe its transition and boundary constraints, the [`ComputationContext`]/[`ProofOptions`]
//! that parameterize a proof, the wire format of a [`proof::StarkProof`], and the [`PublicCoin`]
//! abstraction both sides use to derive the same Fiat-Shamir randomness independently.

mod air;
pub use air::{
    Air, Assertion, BoundaryConstraint, BoundaryConstraintGroup, ConstraintDivisor,
    EvaluationFrame, TraceInfo, TransitionConstraintDegree, TransitionConstraintGroup,
};

mod context;
pub use context::ComputationContext;

mod options;
pub use options::{HashFunction, ProofOptions};

pub mod errors;

pub mod proof;

mod public_coin;
pub use public_coin::PublicCoin;

pub mod utils;
