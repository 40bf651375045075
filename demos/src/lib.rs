// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Worked end-to-end examples exercising the full prove/verify pipeline: standard and
//! multiplicative Fibonacci sequences, and elliptic-curve scalar multiplication.

use prover::{HashFunction, ProofOptions, StarkProof};
use std::time::Instant;
use structopt::StructOpt;
use verifier::VerifierError;

pub mod fibonacci;
pub mod pointmul;

// EXAMPLE TRAIT
// ================================================================================================

/// A worked computation the CLI can prove and verify. Implementations own their own inputs
/// (trace length, scalar, etc.) and `ProofOptions`, computed once at construction.
pub trait Example {
    fn prove(&self) -> StarkProof;
    fn verify(&self, proof: StarkProof) -> Result<(), VerifierError>;
    fn verify_with_wrong_inputs(&self, proof: StarkProof) -> Result<(), VerifierError>;
}

// EXAMPLE OPTIONS
// ================================================================================================

/// Security/configuration knobs shared by every example, parsed from the CLI.
#[derive(StructOpt, Debug)]
pub struct ExampleOptions {
    /// Hash function to use for Merkle commitments and the Fiat-Shamir coin
    #[structopt(long, default_value = "blake2s256")]
    pub hash_fn: String,

    /// Blowup factor between the trace domain and the low-degree extension domain
    #[structopt(short = "b", long, default_value = "0")]
    pub blowup_factor: usize,

    /// Number of execution-trace query positions
    #[structopt(short = "q", long, default_value = "0")]
    pub num_queries: usize,

    /// Proof-of-work grinding factor applied to the query seed
    #[structopt(short = "g", long, default_value = "16")]
    pub grinding_factor: u32,
}

impl ExampleOptions {
    /// Builds a `ProofOptions`, falling back to `default_blowup`/`default_queries` when the CLI
    /// left `blowup_factor`/`num_queries` at their zero sentinel. The same query count is used
    /// for both the execution-trace and FRI query counts (see `winter-common`'s `ProofOptions`).
    pub fn to_proof_options(&self, default_queries: usize, default_blowup: usize) -> ProofOptions {
        let blowup_factor = if self.blowup_factor == 0 {
            default_blowup
        } else {
            self.blowup_factor
        };
        let num_queries = if self.num_queries == 0 {
            default_queries
        } else {
            self.num_queries
        };
        let hash_fn = match self.hash_fn.to_lowercase().as_str() {
            "sha256" => HashFunction::Sha256,
            "blake2s256" => HashFunction::Blake2s256,
            other => panic!("unknown hash function: {}", other),
        };

        ProofOptions::new(
            blowup_factor,
            num_queries,
            num_queries,
            self.grinding_factor,
            hash_fn,
        )
        .expect("invalid proof options")
    }
}

// EXAMPLE TYPE
// ================================================================================================

/// Selects which worked example to run, with its computation-specific size parameter.
#[derive(StructOpt, Debug)]
pub enum ExampleType {
    /// Standard Fibonacci sequence, two terms computed per trace step
    Fib {
        #[structopt(short = "n", default_value = "1048576")]
        sequence_length: usize,
    },
    /// Multiplicative Fibonacci sequence, two terms computed per trace step
    MulFib {
        #[structopt(short = "n", default_value = "1048576")]
        sequence_length: usize,
    },
    /// Elliptic-curve scalar multiplication, one double-and-add step per trace step
    PointMul {
        #[structopt(short = "n", default_value = "64")]
        num_steps: usize,
    },
}

pub fn get_example(example_type: ExampleType, options: ExampleOptions) -> Box<dyn Example> {
    match example_type {
        ExampleType::Fib { sequence_length } => fibonacci::fib2::get_example(options, sequence_length),
        ExampleType::MulFib { sequence_length } => {
            fibonacci::mulfib2::get_example(options, sequence_length)
        }
        ExampleType::PointMul { num_steps } => pointmul::get_example(options, num_steps),
    }
}

/// Runs an example's full prove/verify cycle, logging timings the way the CLI does.
pub fn run(example: Box<dyn Example>) {
    let now = Instant::now();
    let proof = example.prove();
    log::info!("proof generated in {} ms", now.elapsed().as_millis());

    let proof_bytes = proof.to_bytes();
    log::info!(
        "proof size: {} KB, trace commitment: {}",
        proof_bytes.len() / 1024,
        hex::encode(proof.commitments.trace_root)
    );

    let proof = StarkProof::from_bytes(&proof_bytes).unwrap();
    let now = Instant::now();
    match example.verify(proof) {
        Ok(_) => log::info!("proof verified in {} ms", now.elapsed().as_millis()),
        Err(msg) => log::error!("failed to verify proof: {}", msg),
    }
}
