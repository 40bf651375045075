// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Verifies [`StarkProof`]s produced by `winter-prover` against an [`Air`]'s public inputs,
//! without re-executing the underlying computation.

mod channel;
use channel::VerifierChannel;

mod evaluator;
use evaluator::evaluate_constraints;

use common::{
    errors::VerifierError, proof::StarkProof, Air, ConstraintDivisor, HashFunction, PublicCoin,
    TraceInfo,
};
use crypto::{Hasher, RandomElementGenerator};
use math::{
    field::{FieldElement, StarkField},
    utils::log2,
};

/// Checks that `proof` attests to a valid execution of the computation described by `A` against
/// `pub_inputs`. Returns `Ok(())` if the proof is valid, or a [`VerifierError`] describing the
/// first check that failed.
pub fn verify<A: Air>(proof: StarkProof, pub_inputs: A::PublicInputs) -> Result<(), VerifierError> {
    match proof.options.hash_fn() {
        HashFunction::Sha256 => verify_with_hasher::<A, crypto::Sha256>(proof, pub_inputs),
        HashFunction::Blake2s256 => verify_with_hasher::<A, crypto::Blake2s256>(proof, pub_inputs),
    }
}

fn verify_with_hasher<A: Air, H: Hasher>(
    proof: StarkProof,
    pub_inputs: A::PublicInputs,
) -> Result<(), VerifierError> {
    let trace_info = TraceInfo {
        length: proof.trace_length,
        meta: Vec::new(),
    };
    let options = proof.options.clone();
    let air = A::new(trace_info, pub_inputs, options);

    let channel = VerifierChannel::<A::BaseElement, A::BaseElement, H>::new(&air, proof)?;

    // --- draw the same randomness the prover derived from its commitments -----------------------
    let ood_frame = channel.read_ood_frame()?;
    let transition_groups = air
        .get_transition_constraints::<A::BaseElement, _>(channel.draw_transition_coefficient_prng());
    let boundary_groups = air
        .get_boundary_constraints::<A::BaseElement, _>(channel.draw_boundary_coefficient_prng());

    let mut deep_coeff_prng = channel.draw_deep_coefficient_prng();
    let z: A::BaseElement = deep_coeff_prng.draw();
    let deep_coefficients: Vec<(A::BaseElement, A::BaseElement)> = (0..air.trace_width())
        .map(|_| deep_coeff_prng.draw_pair())
        .collect();

    // --- read the opened trace rows and constraint evaluations, checked against the Merkle roots
    let lde_domain_size = air.lde_domain_size();
    let positions =
        channel.draw_query_positions(lde_domain_size, air.context().options().exe_spot_check_count());

    let frames = channel.read_trace_states(&positions)?;
    let lc_evaluations = channel.read_lc_evaluations(&positions)?;

    // --- re-derive the linear combinator's codeword at every sampled position and compare -------
    let g = A::BaseElement::get_root_of_unity(log2(lde_domain_size));
    let domain_offset = air.context().options().domain_offset::<A::BaseElement>();
    let g_trace = air.trace_domain_generator();
    let z_next = z * g_trace;

    let transition_divisor =
        ConstraintDivisor::from_transition(air.context().transition_constraint_degrees(), air.context());
    let periodic_polys = air.get_periodic_column_polys();

    for (i, &position) in positions.iter().enumerate() {
        let x = domain_offset * g.exp(position as u128);

        let value = evaluate_constraints(
            &air,
            &frames[i],
            &ood_frame,
            &transition_groups,
            &boundary_groups,
            &transition_divisor,
            &periodic_polys,
            &deep_coefficients,
            x,
            z,
            z_next,
        );

        if value != lc_evaluations[i] {
            return Err(VerifierError::InconsistentOodConstraintEvaluations);
        }
    }

    // --- low-degree test the linear combinator's codeword via FRI --------------------------------
    let fri_options = air.context().options().to_fri_options::<A::BaseElement>();
    fri::verify::<A::BaseElement, A::BaseElement, _, H>(
        &channel,
        &lc_evaluations,
        &positions,
        lde_domain_size,
        &fri_options,
    )
    .map_err(|e| VerifierError::FriVerificationFailed(e.to_string()))?;

    Ok(())
}
