// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Error returned when a `FriOptions`/`ProofOptions` configuration is rejected. Raised by the
/// fallible constructors (`FriOptions::new`, `common::ProofOptions::new`) before any trace,
/// commitment, or proof data exists, so a caller can distinguish a bad configuration from a
/// failed proof.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ConfigurationError {
    #[error("extension factor {0} is not a power of two")]
    ExtensionFactorNotPowerOfTwo(usize),
    #[error("extension factor {0} is outside the supported range [2, 32]")]
    ExtensionFactorOutOfRange(usize),
    #[error("execution-trace spot check count {0} is outside the supported range [1, 128]")]
    ExeSpotCheckCountOutOfRange(usize),
    #[error("FRI spot check count {0} is outside the supported range [1, 64]")]
    FriSpotCheckCountOutOfRange(usize),
    #[error("grinding factor {0} exceeds the supported maximum of 32")]
    GrindingFactorOutOfRange(u32),
    #[error("blowup factor {0} is not a power of two")]
    BlowupFactorNotPowerOfTwo(usize),
}

/// Error returned when a FRI proof fails verification. Every variant is terminal.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum FriError {
    #[error("number of remainder values ({0}) exceeds the maximum allowed ({1})")]
    RemainderTooLarge(usize, usize),
    #[error("remainder is not a valid polynomial of the expected degree")]
    RemainderDegreeMismatch,
    #[error("remainder values are inconsistent with the final layer commitment")]
    RemainderCommitmentMismatch,
    #[error("layer {0} queries do not match the published layer commitment")]
    LayerCommitmentMismatch(usize),
    #[error("folded value at layer {0} does not match the corresponding value in the next layer")]
    InvalidLayerFolding(usize),
    #[error("number of query positions does not match the number of queried layer values")]
    NumPositionEvaluationMismatch,
}
