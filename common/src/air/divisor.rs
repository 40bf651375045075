// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use super::{Assertion, TransitionConstraintDegree};
use crate::ComputationContext;
use math::field::StarkField;
use std::fmt;

// CONSTRAINT DIVISOR
// ================================================================================================

/// The denominator of a constraint's rational function, expressed as a ratio of two sparse
/// products:
///
/// ```text
/// divisor(x) = numerator(x) / exclude(x)
///            = prod_{(p, c) in numerator} (x^p - c)  /  prod_{e in exclude} (x - e)
/// ```
///
/// Transition constraints divide by `(x^n - 1) / (x - g^{n-1})` (every trace step except the
/// last one); boundary constraints divide by `x - g^step` for a single-step assertion, or by
/// `x^k - g^{step*k}` for a periodic one.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ConstraintDivisor<B: StarkField> {
    numerator: Vec<(usize, B)>,
    exclude: Vec<B>,
}

impl<B: StarkField> ConstraintDivisor<B> {
    // CONSTRUCTOR
    // --------------------------------------------------------------------------------------------
    pub fn new(numerator: Vec<(usize, B)>, exclude: Vec<B>) -> Self {
        ConstraintDivisor { numerator, exclude }
    }

    // CONSTRUCTORS FOR STANDARD DIVISORS
    // --------------------------------------------------------------------------------------------

    /// The divisor shared by all transition constraints: the trace domain's vanishing polynomial
    /// with the last step excluded (transition constraints only need to hold between steps, so
    /// there is no "next" state to check at the final step).
    pub fn from_transition(
        _degrees: &[TransitionConstraintDegree],
        context: &ComputationContext,
    ) -> Self {
        let trace_length = context.trace_length();
        let g = context.get_trace_domain_generator::<B>();
        let last_step = g.exp((trace_length - 1) as u128);
        ConstraintDivisor::new(vec![(trace_length, B::ONE)], vec![last_step])
    }

    /// The divisor for a single boundary assertion: a single root for a one-step assertion, or
    /// the vanishing polynomial of the asserted cycle for a periodic one.
    pub fn from_assertion(assertion: &Assertion<B>, context: &ComputationContext) -> Self {
        let g = context.get_trace_domain_generator::<B>();
        if assertion.stride() == 0 {
            let root = g.exp(assertion.first_step() as u128);
            ConstraintDivisor::new(vec![(1, B::ONE)], vec![root])
        } else {
            let num_cycles = (context.trace_length() / assertion.stride()) as u128;
            let offset = g.exp((assertion.first_step() as u128) * num_cycles);
            ConstraintDivisor::new(vec![(assertion.values().len(), offset)], vec![])
        }
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the `(power, constant)` terms of the numerator product.
    pub fn numerator(&self) -> &[(usize, B)] {
        &self.numerator
    }

    /// Returns the roots excluded from the numerator (the denominator's own roots).
    pub fn exclude(&self) -> &[B] {
        &self.exclude
    }

    /// Returns the degree of this divisor: the sum of numerator exponents, less the number of
    /// excluded roots.
    pub fn degree(&self) -> usize {
        let numerator_degree: usize = self.numerator.iter().map(|(power, _)| power).sum();
        numerator_degree - self.exclude.len()
    }

    /// Evaluates this divisor at `x`.
    pub fn evaluate_at(&self, x: B) -> B {
        let mut numerator = B::ONE;
        for &(power, constant) in self.numerator.iter() {
            numerator *= x.exp(power as u128) - constant;
        }
        let mut denominator = B::ONE;
        for &root in self.exclude.iter() {
            denominator *= x - root;
        }
        numerator / denominator
    }
}

impl<B: StarkField> fmt::Display for ConstraintDivisor<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (power, constant) in self.numerator.iter() {
            write!(f, "(x^{} - {})", power, constant)?;
        }
        if !self.exclude.is_empty() {
            write!(f, " / ")?;
            for root in self.exclude.iter() {
                write!(f, "(x - {})", root)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::field::f128::BaseElement;

    #[test]
    fn degree_accounts_for_excluded_roots() {
        let divisor = ConstraintDivisor::new(vec![(8, BaseElement::ONE)], vec![BaseElement::ONE]);
        assert_eq!(7, divisor.degree());
    }

    #[test]
    fn evaluate_matches_direct_computation() {
        let root = BaseElement::new(5);
        let divisor = ConstraintDivisor::new(vec![(1, BaseElement::ONE)], vec![root]);
        let x = BaseElement::new(9);
        assert_eq!((x - BaseElement::ONE) / (x - root), divisor.evaluate_at(x));
    }
}
