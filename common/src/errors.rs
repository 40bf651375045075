// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use displaydoc::Display;

// CONFIGURATION ERROR
// ================================================================================================

/// Error returned when a `ProofOptions`/`FriOptions` configuration is rejected. Defined in
/// `fri::errors` (the lowest crate both `FriOptions` and `ProofOptions` validation can reach
/// without a dependency cycle) and re-exported here under its spec-facing name.
pub use fri::errors::ConfigurationError;

// VERIFIER ERROR
// ================================================================================================

/// Error returned by [`crate::proof::StarkProof`] verification. Every variant is terminal: a
/// verifier that encounters one of these immediately aborts and never returns `false`.
#[derive(Display, Debug, Clone, Eq, PartialEq)]
pub enum VerifierError {
    /// proof deserialization failed: {0}
    ProofDeserializationFailed(String),
    /// out-of-domain evaluation frame could not be parsed from the proof
    OodFrameDeserializationFailed,
    /// out-of-domain constraint evaluation does not match the recomputed value
    InconsistentOodConstraintEvaluations,
    /// execution trace query at a sampled position does not match the trace commitment
    TraceQueryDoesNotMatchCommitment,
    /// execution trace query bytes could not be parsed into trace states
    TraceQueryDeserializationFailed,
    /// linear combinator query at a sampled position does not match the lcRoot commitment
    LcQueryDoesNotMatchCommitment,
    /// linear combinator query bytes could not be parsed into field elements
    LcQueryDeserializationFailed,
    /// query seed does not satisfy the required proof-of-work grinding factor
    QuerySeedProofOfWorkVerificationFailed,
    /// FRI verification failed: {0}
    FriVerificationFailed(String),
}

impl std::error::Error for VerifierError {}

// PROVER ERROR
// ================================================================================================

/// Error returned when proof generation cannot proceed. Most variants indicate a malformed or
/// inconsistent execution trace rather than a soundness problem.
#[derive(Display, Debug, Clone, Eq, PartialEq)]
pub enum ProverError {
    /// execution trace is empty
    EmptyExecutionTrace,
    /// execution trace length {0} is not a power of two
    TraceLengthNotPowerOfTwo(usize),
    /// execution trace does not satisfy assertion {0}
    UnsatisfiedAssertion(String),
    /// transition constraints were not satisfied at step {0}: {1}
    UnsatisfiedTransitionConstraintError(usize, String),
    /// internal consistency check failed: {0} (this indicates a prover bug, not a malicious input)
    InternalProverError(String),
}

impl std::error::Error for ProverError {}
