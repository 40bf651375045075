// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

mod trace;
pub use trace::{ExecutionTrace, ExecutionTraceFragment, TracePolyTable, TraceTable};

mod constraints;
use constraints::ConstraintEvaluator;

use crate::channel::ProverChannel;
use common::{
    errors::ProverError,
    proof::{Commitments, OodEvaluationFrame, Queries, StarkProof},
    utils, Air, HashFunction, PublicCoin, ProofOptions, TraceInfo,
};
use crypto::{Hasher, MerkleTree, RandomElementGenerator};
use fri::FriProver;
use math::field::{FieldElement, StarkField};

/// Builds a STARK proof that `trace` is a valid execution of the computation described by `A`
/// against `pub_inputs`, under the given security `options`.
pub fn prove<A: Air>(
    trace: ExecutionTrace<A::BaseElement>,
    pub_inputs: A::PublicInputs,
    options: ProofOptions,
) -> Result<StarkProof, ProverError> {
    match options.hash_fn() {
        HashFunction::Sha256 => prove_with_hasher::<A, crypto::Sha256>(trace, pub_inputs, options),
        HashFunction::Blake2s256 => prove_with_hasher::<A, crypto::Blake2s256>(trace, pub_inputs, options),
    }
}

fn prove_with_hasher<A: Air, H: Hasher>(
    trace: ExecutionTrace<A::BaseElement>,
    pub_inputs: A::PublicInputs,
    options: ProofOptions,
) -> Result<StarkProof, ProverError> {
    if trace.len() == 0 {
        return Err(ProverError::EmptyExecutionTrace);
    }
    if !trace.len().is_power_of_two() {
        return Err(ProverError::TraceLengthNotPowerOfTwo(trace.len()));
    }

    let trace_info = TraceInfo {
        length: trace.len(),
        meta: Vec::new(),
    };
    let air = A::new(trace_info, pub_inputs, options.clone());

    // make sure the trace actually satisfies the assertions the AIR exposes, before spending
    // any work committing to it
    for assertion in air.get_assertions() {
        for (i, &expected) in assertion.values().iter().enumerate() {
            let step = assertion.first_step() + i * assertion.stride();
            if trace.get(assertion.register(), step) != expected {
                return Err(ProverError::UnsatisfiedAssertion(assertion.to_string()));
            }
        }
    }

    // --- extend the trace into the low-degree extension domain and commit to it --------------
    let domain_offset = options.domain_offset::<A::BaseElement>();
    let (trace_table, trace_polys) = trace.extend(air.lde_blowup_factor(), domain_offset);

    let trace_commitment = trace_table.build_commitment::<H>();
    let trace_root = *trace_commitment.root();

    let mut channel = ProverChannel::<A, H>::new(&air);
    channel.commit_trace(trace_root);

    // --- build and evaluate the merged constraint codeword ------------------------------------
    let transition_groups = air
        .get_transition_constraints::<A::BaseElement, _>(channel.draw_transition_coefficient_prng());
    let boundary_groups = air
        .get_boundary_constraints::<A::BaseElement, _>(channel.draw_boundary_coefficient_prng());

    let mut deep_coeff_prng = channel.draw_deep_coefficient_prng();
    let z: A::BaseElement = deep_coeff_prng.draw();
    let evaluator = ConstraintEvaluator::new(&air, transition_groups, boundary_groups, deep_coeff_prng);
    let (lc_evaluations, ood_frame) =
        evaluator.evaluate(&trace_table, &trace_polys, domain_offset, z);

    // --- commit to the linear combinator's codeword, packing several evaluations per leaf -----
    let evaluations_per_leaf = utils::evaluations_per_leaf::<A::BaseElement, H>();
    let hash_fn = H::hash_fn();
    let lc_leaves: Vec<[u8; 32]> = lc_evaluations
        .chunks(evaluations_per_leaf)
        .map(|chunk| {
            let mut digest = [0u8; 32];
            hash_fn(A::BaseElement::elements_as_bytes(chunk), &mut digest);
            digest
        })
        .collect();
    let lc_tree = MerkleTree::new(lc_leaves, hash_fn);
    let lc_root = *lc_tree.root();
    channel.commit_lc(lc_root);

    // --- low-degree test the linear combinator's codeword via FRI -----------------------------
    let fri_options = options.to_fri_options::<A::BaseElement>();
    let mut fri_prover = FriProver::<A::BaseElement, A::BaseElement, H>::new(fri_options);
    fri_prover.build_layers(lc_evaluations.clone());

    // self-check: the remainder codeword must itself be low-degree, or the lc codeword was
    // malformed upstream. Kept out of release builds since it duplicates work the verifier
    // already does independently.
    if cfg!(debug_assertions) && !fri_prover.verify_remainder_degree() {
        return Err(ProverError::InternalProverError(
            "FRI remainder codeword failed its own degree check".to_string(),
        ));
    }

    let fri_roots = fri_prover.layer_commitments();
    channel.commit_fri_layers(fri_roots.clone());
    let pow_nonce = channel.pow_nonce();

    // --- draw query positions and open every commitment at them -------------------------------
    let lde_domain_size = air.lde_domain_size();
    let positions = channel.draw_query_positions(lde_domain_size, options.exe_spot_check_count());

    // a verifier needs both the current and the "next" trace row at every sampled position to
    // re-evaluate transition constraints, so the trace is opened at the union of both position
    // sets rather than just `positions`
    let blowup = trace_table.blowup();
    let next_positions: Vec<usize> = positions.iter().map(|&p| (p + blowup) % lde_domain_size).collect();
    let mut trace_positions: Vec<usize> = positions.iter().chain(next_positions.iter()).copied().collect();
    trace_positions.sort_unstable();
    trace_positions.dedup();

    let trace_queries = trace_table.query(trace_commitment, &trace_positions);

    let lc_positions = utils::map_trace_to_constraint_positions(&positions, evaluations_per_leaf);
    let lc_leaf_values: Vec<Vec<u8>> = lc_positions
        .iter()
        .map(|&p| {
            let start = p * evaluations_per_leaf;
            A::BaseElement::elements_as_bytes(&lc_evaluations[start..start + evaluations_per_leaf])
                .to_vec()
        })
        .collect();
    let lc_queries = Queries::new(&lc_tree, &lc_positions, lc_leaf_values);

    let fri_proof = fri_prover.build_proof(&positions);

    let commitments = Commitments {
        trace_root,
        lc_root,
        fri_roots,
    };
    let ood_frame = OodEvaluationFrame {
        trace_at_z1: A::BaseElement::elements_as_bytes(&ood_frame.current).to_vec(),
        trace_at_z2: A::BaseElement::elements_as_bytes(&ood_frame.next).to_vec(),
    };

    Ok(StarkProof {
        trace_length: trace.len(),
        options,
        commitments,
        ood_frame,
        trace_queries,
        lc_queries,
        fri_proof,
        pow_nonce,
    })
}
