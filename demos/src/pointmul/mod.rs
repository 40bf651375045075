// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crate::{Example, ExampleOptions};
use log::debug;
use prover::{
    self,
    math::field::{f128::BaseElement, FieldElement},
    ProofOptions, StarkProof,
};
use std::time::Instant;
use verifier::{self, VerifierError};

mod curve;
use curve::compute_result;

mod air;
use air::{build_trace, PointMulAir};

#[cfg(test)]
mod tests;

// POINT MULTIPLICATION EXAMPLE
// ================================================================================================

pub fn get_example(options: ExampleOptions, num_steps: usize) -> Box<dyn Example> {
    Box::new(PointMulExample::new(
        num_steps,
        options.to_proof_options(48, 16),
    ))
}

pub struct PointMulExample {
    options: ProofOptions,
    num_steps: usize,
    scalar: u128,
    result: (BaseElement, BaseElement),
}

impl PointMulExample {
    pub fn new(num_steps: usize, options: ProofOptions) -> PointMulExample {
        assert!(num_steps.is_power_of_two(), "number of steps must be a power of 2");
        assert!(num_steps <= 128, "number of steps cannot exceed 128");

        // a fixed scalar with the top bit set, alternating bits below it
        let mut scalar: u128 = 1u128 << (num_steps - 1);
        let mut i = 0;
        while i + 1 < num_steps {
            scalar |= 1u128 << i;
            i += 2;
        }

        let now = Instant::now();
        let result = compute_result(scalar, num_steps);
        debug!(
            "Computed scalar multiplication for a {}-bit scalar in {} ms",
            num_steps,
            now.elapsed().as_millis()
        );

        PointMulExample {
            options,
            num_steps,
            scalar,
            result,
        }
    }
}

// EXAMPLE IMPLEMENTATION
// ================================================================================================

impl Example for PointMulExample {
    fn prove(&self) -> StarkProof {
        debug!(
            "Generating proof for {}-step elliptic curve point multiplication\n\
            ---------------------",
            self.num_steps
        );

        let now = Instant::now();
        let trace = build_trace(self.scalar, self.num_steps);
        let trace_width = trace.width();
        let trace_length = trace.len();
        debug!(
            "Generated execution trace of {} registers and {} steps in {} ms",
            trace_width,
            trace_length,
            now.elapsed().as_millis()
        );

        prover::prove::<PointMulAir>(trace, self.result, self.options.clone()).unwrap()
    }

    fn verify(&self, proof: StarkProof) -> Result<(), VerifierError> {
        verifier::verify::<PointMulAir>(proof, self.result)
    }

    fn verify_with_wrong_inputs(&self, proof: StarkProof) -> Result<(), VerifierError> {
        let wrong_result = (self.result.0 + BaseElement::ONE, self.result.1);
        verifier::verify::<PointMulAir>(proof, wrong_result)
    }
}
