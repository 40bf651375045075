// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use super::trace::{TraceTable, TracePolyTable};
use common::{
    utils::deep_quotient, Air, BoundaryConstraintGroup, ConstraintDivisor, EvaluationFrame,
    TransitionConstraintGroup,
};
use crypto::RandomElementGenerator;
use fri::combinator::{combine, raise_degree};
use math::{field::StarkField, polynom, utils::log2};

// CONSTRAINT EVALUATOR
// ================================================================================================

/// Merges an `Air`'s transition and boundary constraints into the single codeword that gets
/// committed to and low-degree tested by FRI.
///
/// Every individual transition and boundary constraint is evaluated across the whole domain and
/// divided by its own divisor to produce a quotient vector; each quotient is paired with a
/// degree-raised copy of itself (`fri::combinator::raise_degree`, multiplying pointwise by
/// `x^delta`), and the complete operand list is folded into one codeword via
/// `fri::combinator::combine`, weighted by the composition coefficients drawn per constraint by
/// `TransitionConstraintGroup`/`BoundaryConstraintGroup`. A DEEP quotient term is added to that
/// codeword afterwards, binding it to the genuine trace polynomials (rather than just the values
/// opened from the trace commitment) at a single out-of-domain point `z` — a supplementary
/// soundness term, added on top of the linear combination rather than folded into it.
pub struct ConstraintEvaluator<'a, A: Air> {
    air: &'a A,
    transition_groups: Vec<TransitionConstraintGroup<A::BaseElement>>,
    boundary_groups: Vec<BoundaryConstraintGroup<A::BaseElement, A::BaseElement>>,
    transition_divisor: ConstraintDivisor<A::BaseElement>,
    periodic_polys: Vec<Vec<A::BaseElement>>,
    deep_coefficients: Vec<(A::BaseElement, A::BaseElement)>,
}

impl<'a, A: Air> ConstraintEvaluator<'a, A> {
    pub fn new<R: RandomElementGenerator>(
        air: &'a A,
        transition_groups: Vec<TransitionConstraintGroup<A::BaseElement>>,
        boundary_groups: Vec<BoundaryConstraintGroup<A::BaseElement, A::BaseElement>>,
        mut deep_coeff_prng: R,
    ) -> Self {
        let transition_divisor =
            ConstraintDivisor::from_transition(air.context().transition_constraint_degrees(), air.context());
        let periodic_polys = air.get_periodic_column_polys();
        let deep_coefficients = (0..air.trace_width())
            .map(|_| deep_coeff_prng.draw_pair())
            .collect();

        ConstraintEvaluator {
            air,
            transition_groups,
            boundary_groups,
            transition_divisor,
            periodic_polys,
            deep_coefficients,
        }
    }

    /// Evaluates the merged constraint codeword over every point of `trace`'s domain (assumed to
    /// be a coset of offset `domain_offset`), folding in the DEEP quotient tying the codeword to
    /// `trace_polys` at the out-of-domain point `z`. Returns the codeword together with the
    /// trace polynomials' evaluations at `z` and `z * g_trace` (the out-of-domain evaluation
    /// frame a verifier needs to recompute the same quotient independently).
    pub fn evaluate(
        &self,
        trace: &TraceTable<A::BaseElement>,
        trace_polys: &TracePolyTable<A::BaseElement>,
        domain_offset: A::BaseElement,
        z: A::BaseElement,
    ) -> (Vec<A::BaseElement>, EvaluationFrame<A::BaseElement>) {
        let domain_size = trace.len();
        let g = A::BaseElement::get_root_of_unity(log2(domain_size));
        let g_trace = self.air.trace_domain_generator();
        let z_next = z * g_trace;

        let ood_frame = EvaluationFrame {
            current: trace_polys.evaluate_at(z),
            next: trace_polys.evaluate_at(z_next),
        };

        let xs: Vec<A::BaseElement> = (0..domain_size)
            .map(|step| domain_offset * g.exp(step as u128))
            .collect();

        // --- pass 1: evaluate every individual transition/boundary constraint at every point ----
        let num_transition_constraints = self.air.num_transition_constraints();
        let mut transition_raw: Vec<Vec<A::BaseElement>> =
            vec![Vec::with_capacity(domain_size); num_transition_constraints];
        let mut boundary_raw: Vec<Vec<Vec<A::BaseElement>>> = self
            .boundary_groups
            .iter()
            .map(|group| vec![Vec::with_capacity(domain_size); group.constraints().len()])
            .collect();

        let mut frame = EvaluationFrame::<A::BaseElement>::new(trace.width());
        let mut t_evaluations = vec![A::BaseElement::ZERO; num_transition_constraints];

        for (step, &x) in xs.iter().enumerate() {
            trace.read_frame_into(step, &mut frame);

            let periodic_values: Vec<A::BaseElement> = self
                .periodic_polys
                .iter()
                .map(|poly| polynom::eval(poly, x))
                .collect();
            self.air.evaluate_transition(&frame, &periodic_values, &mut t_evaluations);
            for (values, &evaluation) in transition_raw.iter_mut().zip(t_evaluations.iter()) {
                values.push(evaluation);
            }

            for (group, group_raw) in self.boundary_groups.iter().zip(boundary_raw.iter_mut()) {
                for (constraint, values) in group.constraints().iter().zip(group_raw.iter_mut()) {
                    values.push(constraint.evaluate_at(x, frame.current[constraint.register()]));
                }
            }
        }

        // --- pass 2: divide by divisors, raise degree, and assemble the combinator's operands ---
        let t_divisor_values: Vec<A::BaseElement> =
            xs.iter().map(|&x| self.transition_divisor.evaluate_at(x)).collect();

        let mut vectors: Vec<Vec<A::BaseElement>> = Vec::new();
        let mut coefficients: Vec<A::BaseElement> = Vec::new();

        for group in self.transition_groups.iter() {
            for (&index, &(cc0, cc1)) in group.indexes().iter().zip(group.coefficients().iter()) {
                let quotient: Vec<A::BaseElement> = transition_raw[index]
                    .iter()
                    .zip(t_divisor_values.iter())
                    .map(|(&value, &divisor)| value / divisor)
                    .collect();
                let raised = raise_degree(&quotient, &xs, group.degree_adjustment());
                vectors.push(quotient);
                coefficients.push(cc0);
                vectors.push(raised);
                coefficients.push(cc1);
            }
        }

        for (group, group_raw) in self.boundary_groups.iter().zip(boundary_raw.iter()) {
            let divisor_values: Vec<A::BaseElement> =
                xs.iter().map(|&x| group.divisor().evaluate_at(x)).collect();
            for (constraint, raw) in group.constraints().iter().zip(group_raw.iter()) {
                let quotient: Vec<A::BaseElement> = raw
                    .iter()
                    .zip(divisor_values.iter())
                    .map(|(&value, &divisor)| value / divisor)
                    .collect();
                let raised = raise_degree(&quotient, &xs, group.degree_adjustment());
                let (cc0, cc1) = *constraint.cc();
                vectors.push(quotient);
                coefficients.push(cc0);
                vectors.push(raised);
                coefficients.push(cc1);
            }
        }

        let mut result = combine(&vectors, &coefficients);

        // DEEP quotient: a supplementary soundness term added on top of the linear combination,
        // never folded into it, binding the codeword to the genuine trace polynomials at `z`.
        for (step, &x) in xs.iter().enumerate() {
            trace.read_frame_into(step, &mut frame);
            result[step] += deep_quotient(&frame, &ood_frame, &self.deep_coefficients, x, z, z_next);
        }

        (result, ood_frame)
    }
}
