// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use common::{
    utils::deep_quotient, Air, BoundaryConstraintGroup, ConstraintDivisor, EvaluationFrame,
    TransitionConstraintGroup,
};
use math::{field::StarkField, polynom};

/// Re-derives the merged constraint codeword's value at a single sampled position from the
/// trace row(s) opened there, the same way `prover::monolith::ConstraintEvaluator` built it in
/// the first place. A verifier compares this against the value opened from the linear
/// combination commitment at that position to cross-link the two commitments to the AIR
/// constraints — this is the "Stage 1" check `verifier::verify_with_hasher` runs before handing
/// the codeword to `fri::verify`.
///
/// Computes the same quantity as `fri::combinator::combine`/`raise_degree` applied to the
/// per-constraint quotient values at this one domain point (`cc0 * quotient + cc1 *
/// raise_degree(quotient, xp)`, summed over every constraint), just inlined into scalar
/// arithmetic rather than built as explicit vectors, since the verifier only ever needs the
/// codeword's value at the handful of sampled positions rather than over the whole domain.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_constraints<A: Air>(
    air: &A,
    frame: &EvaluationFrame<A::BaseElement>,
    ood_frame: &EvaluationFrame<A::BaseElement>,
    transition_groups: &[TransitionConstraintGroup<A::BaseElement>],
    boundary_groups: &[BoundaryConstraintGroup<A::BaseElement, A::BaseElement>],
    transition_divisor: &ConstraintDivisor<A::BaseElement>,
    periodic_polys: &[Vec<A::BaseElement>],
    deep_coefficients: &[(A::BaseElement, A::BaseElement)],
    x: A::BaseElement,
    z: A::BaseElement,
    z_next: A::BaseElement,
) -> A::BaseElement {
    let periodic_values: Vec<A::BaseElement> =
        periodic_polys.iter().map(|poly| polynom::eval(poly, x)).collect();

    let mut t_evaluations = vec![A::BaseElement::ZERO; air.num_transition_constraints()];
    air.evaluate_transition(frame, &periodic_values, &mut t_evaluations);

    let t_divisor_value = transition_divisor.evaluate_at(x);
    let mut value = A::BaseElement::ZERO;
    for group in transition_groups.iter() {
        let xp = x.exp(group.degree_adjustment() as u128);
        value += group.evaluate(&t_evaluations, xp);
    }
    value = value / t_divisor_value;

    for group in boundary_groups.iter() {
        let xp = x.exp(group.degree_adjustment() as u128);
        let b_divisor_value = group.divisor().evaluate_at(x);
        value += group.evaluate_at(&frame.current, x, xp) / b_divisor_value;
    }

    value += deep_quotient(frame, ood_frame, deep_coefficients, x, z, z_next);

    value
}
