// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use math::field::FieldElement;

// EVALUATION FRAME
// ================================================================================================

/// The register values at two adjacent steps of the execution trace (`current` at step `i`,
/// `next` at step `i + 1`), the minimal context a transition constraint needs.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct EvaluationFrame<E: FieldElement> {
    pub current: Vec<E>,
    pub next: Vec<E>,
}

impl<E: FieldElement> EvaluationFrame<E> {
    pub fn new(trace_width: usize) -> Self {
        EvaluationFrame {
            current: E::zeroed_vector(trace_width),
            next: E::zeroed_vector(trace_width),
        }
    }
}

// TRANSITION CONSTRAINT DEGREE
// ================================================================================================

/// The degree of a transition constraint, expressed as a base degree in the trace polynomials
/// plus contributions from any periodic columns it reads (each periodic column of cycle length
/// `c` behaves, for degree-counting purposes, like a polynomial of degree `trace_length/c - 1`).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TransitionConstraintDegree {
    base: usize,
    cycles: Vec<usize>,
}

impl TransitionConstraintDegree {
    /// Creates a new degree descriptor for a constraint of the given base degree, reading no
    /// periodic columns.
    pub fn new(base: usize) -> Self {
        TransitionConstraintDegree {
            base,
            cycles: Vec::new(),
        }
    }

    /// Creates a new degree descriptor for a constraint of the given base degree, also reading
    /// periodic columns with the given cycle lengths.
    pub fn with_cycles(base: usize, cycles: Vec<usize>) -> Self {
        assert!(
            cycles.iter().all(|&c| c.is_power_of_two()),
            "cycle lengths must be powers of two"
        );
        TransitionConstraintDegree { base, cycles }
    }

    /// Returns this constraint's base (structural) degree, independent of trace length. This is
    /// the quantity `ce_blowup_factor` is derived from.
    pub fn base(&self) -> usize {
        self.base
    }

    /// Returns the degree of this constraint's evaluation polynomial over a trace of the given
    /// length.
    pub fn get_evaluation_degree(&self, trace_length: usize) -> usize {
        let mut result = self.base * (trace_length - 1);
        for &cycle_length in self.cycles.iter() {
            result += trace_length / cycle_length - 1;
        }
        result
    }
}

// TRANSITION CONSTRAINT GROUP
// ================================================================================================

/// A group of transition constraints that all evaluate to polynomials of the same degree, and so
/// share a single degree-adjustment exponent in the composition polynomial.
#[derive(Debug, Clone)]
pub struct TransitionConstraintGroup<E: FieldElement> {
    degree: TransitionConstraintDegree,
    degree_adjustment: u32,
    indexes: Vec<usize>,
    coefficients: Vec<(E, E)>,
}

impl<E: FieldElement> TransitionConstraintGroup<E> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    pub fn new(degree: TransitionConstraintDegree, degree_adjustment: u32) -> Self {
        TransitionConstraintGroup {
            degree,
            degree_adjustment,
            indexes: Vec::new(),
            coefficients: Vec::new(),
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the shared degree descriptor of constraints in this group.
    pub fn degree(&self) -> &TransitionConstraintDegree {
        &self.degree
    }

    /// Returns the degree-adjustment exponent applied to constraints in this group when merging
    /// them into the composition polynomial.
    pub fn degree_adjustment(&self) -> u32 {
        self.degree_adjustment
    }

    /// Returns the indexes, into the full list of transition constraint evaluations, of the
    /// constraints belonging to this group.
    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    /// Returns the composition coefficients assigned to each constraint in this group, in the
    /// same order as `indexes()`.
    pub fn coefficients(&self) -> &[(E, E)] {
        &self.coefficients
    }

    // PUBLIC METHODS
    // --------------------------------------------------------------------------------------------

    /// Adds a constraint, identified by its index into the full evaluation vector, to this group
    /// with the given composition coefficients.
    pub fn add(&mut self, constraint_index: usize, coefficients: (E, E)) {
        self.indexes.push(constraint_index);
        self.coefficients.push(coefficients);
    }

    /// Merges the raw evaluations of this group's constraints (indexed into `evaluations` by
    /// `self.indexes`) into a single value via a random linear combination, applying the degree
    /// adjustment `x^degree_adjustment` to the second coefficient of each pair.
    pub fn evaluate(&self, evaluations: &[E], xp: E) -> E {
        let mut result = E::ZERO;
        for (&index, &(cc0, cc1)) in self.indexes.iter().zip(self.coefficients.iter()) {
            result += evaluations[index] * (cc0 + cc1 * xp);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::field::f128::BaseElement;

    #[test]
    fn evaluation_degree_accounts_for_periodic_columns() {
        let degree = TransitionConstraintDegree::with_cycles(2, vec![8]);
        // base contribution: 2 * (1024 - 1) = 2046; periodic contribution: 1024/8 - 1 = 127
        assert_eq!(2046 + 127, degree.get_evaluation_degree(1024));
    }

    #[test]
    fn group_evaluate_sums_weighted_constraints() {
        let degree = TransitionConstraintDegree::new(1);
        let mut group = TransitionConstraintGroup::<BaseElement>::new(degree, 0);
        group.add(0, (BaseElement::new(2), BaseElement::ZERO));
        group.add(2, (BaseElement::new(3), BaseElement::ZERO));

        let evaluations = vec![BaseElement::new(5), BaseElement::new(7), BaseElement::new(11)];
        let expected = evaluations[0] * BaseElement::new(2) + evaluations[2] * BaseElement::new(3);
        assert_eq!(expected, group.evaluate(&evaluations, BaseElement::ZERO));
    }
}
