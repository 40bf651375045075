// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use super::curve::{add, double, scalar_bits, GX, GY};
use prover::{
    math::field::{f128::BaseElement, FieldElement},
    Air, Assertion, ComputationContext, EvaluationFrame, ExecutionTrace, ProofOptions, TraceInfo,
    TransitionConstraintDegree,
};

// REGISTER LAYOUT
// ================================================================================================

const BIT: usize = 0;
const X_DBL: usize = 1;
const Y_DBL: usize = 2;
const S_DBL: usize = 3;
const X_ACC: usize = 4;
const Y_ACC: usize = 5;
const S_ADD: usize = 6;
const TRACE_WIDTH: usize = 7;

// POINT MULTIPLICATION AIR
// ================================================================================================

/// Double-and-add scalar multiplication over the curve in [`super::curve`]: at step `i`,
/// register 1-2 hold `2^i * G`, registers 4-5 hold the running sum of the bits of the scalar
/// seen so far, and register 0 is the `i`th bit controlling whether `2^i * G` is folded into
/// that sum on the transition to step `i + 1`.
pub struct PointMulAir {
    context: ComputationContext,
    result: (BaseElement, BaseElement),
}

impl Air for PointMulAir {
    type BaseElement = BaseElement;
    type PublicInputs = (BaseElement, BaseElement);

    fn new(trace_info: TraceInfo, pub_inputs: Self::PublicInputs, options: ProofOptions) -> Self {
        let degrees = vec![
            TransitionConstraintDegree::new(2), // bit is boolean
            TransitionConstraintDegree::new(2), // doubling slope relation
            TransitionConstraintDegree::new(2), // next x_dbl
            TransitionConstraintDegree::new(2), // next y_dbl
            TransitionConstraintDegree::new(3), // addition slope relation, gated by bit
            TransitionConstraintDegree::new(3), // next x_acc, gated by bit
            TransitionConstraintDegree::new(3), // next y_acc, gated by bit
        ];
        PointMulAir {
            context: ComputationContext::new(TRACE_WIDTH, trace_info.length, degrees, options),
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
        let one = E::ONE;
        let two = E::from(BaseElement::new(2));
        let three = E::from(BaseElement::new(3));

        let bit = current[BIT];
        let x_dbl = current[X_DBL];
        let y_dbl = current[Y_DBL];
        let s_dbl = current[S_DBL];
        let x_acc = current[X_ACC];
        let y_acc = current[Y_ACC];
        let s_add = current[S_ADD];

        // bit is boolean
        result[0] = bit * (bit - one);

        // doubling: s_dbl * 2y = 3x^2
        result[1] = s_dbl * (two * y_dbl) - three * x_dbl * x_dbl;
        // next doubled point
        result[2] = next[X_DBL] - (s_dbl * s_dbl - two * x_dbl);
        result[3] = next[Y_DBL] - (s_dbl * (x_dbl - next[X_DBL]) - y_dbl);

        // addition (only binding when bit = 1): s_add * (x_dbl - x_acc) = y_dbl - y_acc
        result[4] = bit * (s_add * (x_dbl - x_acc) - (y_dbl - y_acc));

        // conditional accumulator update: next = bit ? (x_dbl, y_dbl) + (x_acc, y_acc) : (x_acc, y_acc)
        let added_x = s_add * s_add - x_dbl - x_acc;
        result[5] = next[X_ACC] - (bit * added_x + (one - bit) * x_acc);

        let added_y = s_add * (x_acc - next[X_ACC]) - y_acc;
        result[6] = next[Y_ACC] - (bit * added_y + (one - bit) * y_acc);
    }

    fn get_assertions(&self) -> Vec<Assertion<Self::BaseElement>> {
        let last_step = self.trace_length() - 1;
        vec![
            Assertion::single(X_DBL, 0, GX),
            Assertion::single(Y_DBL, 0, GY),
            Assertion::single(X_ACC, 0, GX),
            Assertion::single(Y_ACC, 0, GY),
            Assertion::single(X_ACC, last_step, self.result.0),
            Assertion::single(Y_ACC, last_step, self.result.1),
        ]
    }
}

// TRACE BUILDER
// ================================================================================================

/// Builds a `num_steps`-step trace of `scalar * G`. `scalar` must fit in `num_steps` bits with
/// its top bit set (see [`scalar_bits`]).
pub fn build_trace(scalar: u128, num_steps: usize) -> ExecutionTrace<BaseElement> {
    assert!(num_steps.is_power_of_two(), "num_steps must be a power of 2");
    let bits = scalar_bits(scalar, num_steps);

    let mut reg = vec![vec![BaseElement::ZERO; num_steps]; TRACE_WIDTH];

    reg[X_DBL][0] = GX;
    reg[Y_DBL][0] = GY;
    reg[X_ACC][0] = GX;
    reg[Y_ACC][0] = GY;

    for step in 0..(num_steps - 1) {
        let bit = bits[step];
        reg[BIT][step] = if bit { BaseElement::ONE } else { BaseElement::ZERO };

        let x_dbl = reg[X_DBL][step];
        let y_dbl = reg[Y_DBL][step];
        let x_acc = reg[X_ACC][step];
        let y_acc = reg[Y_ACC][step];

        let (s_dbl, x_next_dbl, y_next_dbl) = double(x_dbl, y_dbl);
        reg[S_DBL][step] = s_dbl;
        reg[X_DBL][step + 1] = x_next_dbl;
        reg[Y_DBL][step + 1] = y_next_dbl;

        if bit {
            let (s_add, x_next_acc, y_next_acc) = add(x_dbl, y_dbl, x_acc, y_acc);
            reg[S_ADD][step] = s_add;
            reg[X_ACC][step + 1] = x_next_acc;
            reg[Y_ACC][step + 1] = y_next_acc;
        } else {
            reg[S_ADD][step] = BaseElement::ZERO;
            reg[X_ACC][step + 1] = x_acc;
            reg[Y_ACC][step + 1] = y_acc;
        }
    }

    ExecutionTrace::init(reg)
}
