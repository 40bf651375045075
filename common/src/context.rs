// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crate::air::TransitionConstraintDegree;
use crate::ProofOptions;
use math::field::StarkField;

// COMPUTATION CONTEXT
// ================================================================================================

/// The parameters common to a specific instance of a computation: its trace shape, the degrees
/// of its transition constraints, and the security options it is proved/verified under. An
/// `Air` implementation is handed one of these at construction and carries it for the lifetime
/// of the proof.
#[derive(Clone)]
pub struct ComputationContext {
    trace_width: usize,
    trace_length: usize,
    transition_constraint_degrees: Vec<TransitionConstraintDegree>,
    ce_blowup_factor: usize,
    options: ProofOptions,
}

impl ComputationContext {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    pub fn new(
        trace_width: usize,
        trace_length: usize,
        transition_constraint_degrees: Vec<TransitionConstraintDegree>,
        options: ProofOptions,
    ) -> Self {
        assert!(trace_width > 0, "trace width must be greater than 0");
        assert!(
            trace_length.is_power_of_two(),
            "trace length must be a power of two"
        );
        assert!(
            !transition_constraint_degrees.is_empty(),
            "at least one transition constraint degree must be provided"
        );

        // the constraint evaluation domain must be large enough to hold the evaluations of the
        // highest-degree transition constraint without aliasing.
        let max_degree = transition_constraint_degrees
            .iter()
            .map(TransitionConstraintDegree::base)
            .max()
            .unwrap_or(1);
        let ce_blowup_factor = max_degree.max(1).next_power_of_two();

        ComputationContext {
            trace_width,
            trace_length,
            transition_constraint_degrees,
            ce_blowup_factor,
            options,
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the width of the execution trace for this computation.
    pub fn trace_width(&self) -> usize {
        self.trace_width
    }

    /// Returns the length of the execution trace for this computation. Always a power of two.
    pub fn trace_length(&self) -> usize {
        self.trace_length
    }

    /// Returns the degrees of all transition constraints for this computation.
    pub fn transition_constraint_degrees(&self) -> &[TransitionConstraintDegree] {
        &self.transition_constraint_degrees
    }

    /// Returns the constraint evaluation domain blowup factor: the smallest power of two at
    /// least as large as the highest transition constraint degree.
    pub fn ce_blowup_factor(&self) -> usize {
        self.ce_blowup_factor
    }

    /// Returns the degree of the composition polynomial for this computation: the evaluation
    /// domain size, less one.
    pub fn composition_degree(&self) -> usize {
        self.trace_length * self.ce_blowup_factor - 1
    }

    /// Returns the proof options this computation is being proved/verified under.
    pub fn options(&self) -> &ProofOptions {
        &self.options
    }

    /// Returns the generator of the multiplicative subgroup of order `trace_length` in field
    /// `B`.
    pub fn get_trace_domain_generator<B: StarkField>(&self) -> B {
        B::get_root_of_unity(self.trace_length.trailing_zeros() as usize)
    }

    /// Returns the size of the low-degree extension domain: `trace_length * extension_factor`.
    pub fn lde_domain_size(&self) -> usize {
        self.trace_length * self.options.extension_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HashFunction;

    #[test]
    fn ce_blowup_factor_rounds_up_to_power_of_two() {
        let options = ProofOptions::new(8, 80, 40, 0, HashFunction::Sha256).unwrap();
        let context = ComputationContext::new(
            4,
            16,
            vec![TransitionConstraintDegree::new(3)],
            options,
        );
        assert_eq!(4, context.ce_blowup_factor());
    }

    #[test]
    fn lde_domain_size_scales_with_extension_factor() {
        let options = ProofOptions::new(8, 80, 40, 0, HashFunction::Sha256).unwrap();
        let context = ComputationContext::new(
            4,
            16,
            vec![TransitionConstraintDegree::new(1)],
            options,
        );
        assert_eq!(128, context.lde_domain_size());
    }
}
