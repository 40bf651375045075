// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use super::PointMulExample;
use crate::Example;
use prover::{HashFunction, ProofOptions};

fn build_example() -> PointMulExample {
    let options = ProofOptions::new(16, 32, 32, 0, HashFunction::Blake2s256).unwrap();
    PointMulExample::new(16, options)
}

#[test]
fn prove_and_verify_succeeds() {
    let example = build_example();
    let proof = example.prove();
    assert!(example.verify(proof).is_ok());
}

#[test]
fn verify_rejects_wrong_public_input() {
    let example = build_example();
    let proof = example.prove();
    assert!(example.verify_with_wrong_inputs(proof).is_err());
}
