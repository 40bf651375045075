// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use prover::{
    math::field::{f128::BaseElement, FieldElement},
    Air, Assertion, ComputationContext, EvaluationFrame, ExecutionTrace, ProofOptions, TraceInfo,
    TransitionConstraintDegree,
};

// FIBONACCI AIR
// ================================================================================================

/// Two additive Fibonacci terms computed per trace step: register 0 holds `F(2i)`, register 1
/// holds `F(2i + 1)`.
pub struct FibAir {
    context: ComputationContext,
    result: BaseElement,
}

impl Air for FibAir {
    type BaseElement = BaseElement;
    type PublicInputs = BaseElement;

    fn new(trace_info: TraceInfo, pub_inputs: Self::PublicInputs, options: ProofOptions) -> Self {
        let degrees = vec![
            TransitionConstraintDegree::new(1),
            TransitionConstraintDegree::new(1),
        ];
        FibAir {
            context: ComputationContext::new(2, trace_info.length, degrees, options),
            result: pub_inputs,
        }
    }

    fn context(&self) -> &ComputationContext {
        &self.context
    }

    fn evaluate_transition<E: FieldElement + From<Self::BaseElement>>(
        &self,
        frame: &EvaluationFrame<E>,
        _periodic_values: &[E],
        result: &mut [E],
    ) {
        let current = &frame.current;
        let next = &frame.next;

        // a' = a + b
        result[0] = next[0] - (current[0] + current[1]);
        // b' = a' + b
        result[1] = next[1] - (next[0] + current[1]);
    }

    fn get_assertions(&self) -> Vec<Assertion<Self::BaseElement>> {
        vec![
            Assertion::single(0, 0, BaseElement::ONE),
            Assertion::single(1, 0, BaseElement::ONE),
            Assertion::single(1, self.trace_length() - 1, self.result),
        ]
    }
}

// TRACE BUILDER
// ================================================================================================

/// Builds a trace of `sequence_length / 2` steps computing the Fibonacci sequence two terms at a
/// time, ending with register 1 holding `F(sequence_length)`.
pub fn build_trace(sequence_length: usize) -> ExecutionTrace<BaseElement> {
    assert!(
        sequence_length.is_power_of_two(),
        "sequence length must be a power of 2"
    );

    let trace_length = sequence_length / 2;
    let mut reg0 = vec![BaseElement::ZERO; trace_length];
    let mut reg1 = vec![BaseElement::ZERO; trace_length];

    reg0[0] = BaseElement::ONE;
    reg1[0] = BaseElement::ONE;

    for i in 0..(trace_length - 1) {
        reg0[i + 1] = reg0[i] + reg1[i];
        reg1[i + 1] = reg0[i + 1] + reg1[i];
    }

    ExecutionTrace::init(vec![reg0, reg1])
}
