// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

mod trace_table;
pub use trace_table::TraceTable;

mod poly_table;
pub use poly_table::TracePolyTable;

use math::{fft, field::StarkField};

#[cfg(feature = "concurrent")]
use rayon::prelude::*;

// EXECUTION TRACE
// ================================================================================================

/// An unextended execution trace: one vector of values per register, all of the same
/// power-of-two length. This is what an [`crate::Air`] implementation's trace-building code
/// populates directly; [`ExecutionTrace::extend`] later turns it into the low-degree extended
/// [`TraceTable`]/[`TracePolyTable`] pair the prover actually commits to and queries.
pub struct ExecutionTrace<B: StarkField>(Vec<Vec<B>>);

impl<B: StarkField> ExecutionTrace<B> {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------

    /// Builds a new execution trace from a list of register traces, all of which must have the
    /// same, power-of-two length.
    pub fn init(registers: Vec<Vec<B>>) -> Self {
        assert!(!registers.is_empty(), "execution trace must have at least one register");
        let trace_length = registers[0].len();
        assert!(trace_length.is_power_of_two(), "execution trace length must be a power of two");
        for register in registers.iter() {
            assert_eq!(
                trace_length,
                register.len(),
                "all register traces must have the same length"
            );
        }
        ExecutionTrace(registers)
    }

    /// Builds a new execution trace of `width` registers and `length` steps, all initialized to
    /// zero, to be filled in fragment by fragment via [`Self::fragments`].
    pub fn new(width: usize, length: usize) -> Self {
        assert!(width > 0, "execution trace must have at least one register");
        assert!(length.is_power_of_two(), "execution trace length must be a power of two");
        ExecutionTrace(vec![vec![B::ZERO; length]; width])
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns the number of registers in this trace.
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Returns the number of steps in this trace.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0[0].len()
    }

    /// Returns the value of `register` at `step`.
    pub fn get(&self, register: usize, step: usize) -> B {
        self.0[register][step]
    }

    /// Sets the value of `register` at `step`.
    pub fn set(&mut self, register: usize, step: usize, value: B) {
        self.0[register][step] = value;
    }

    // FRAGMENTED CONSTRUCTION
    // --------------------------------------------------------------------------------------------

    /// Splits this trace into `num_fragments` equal-length, disjoint, mutable views over
    /// contiguous step ranges, so an `Air` implementation can populate them independently (and,
    /// with the `concurrent` feature, in parallel).
    pub fn fragments(&mut self, num_fragments: usize) -> Vec<ExecutionTraceFragment<B>> {
        let fragment_length = self.len() / num_fragments;
        assert!(
            fragment_length > 0,
            "fragment length must be greater than zero"
        );

        let mut fragment_data: Vec<Vec<&mut [B]>> = (0..num_fragments)
            .map(|_| Vec::with_capacity(self.width()))
            .collect();
        for register in self.0.iter_mut() {
            for (i, chunk) in register.chunks_mut(fragment_length).enumerate() {
                fragment_data[i].push(chunk);
            }
        }

        fragment_data
            .into_iter()
            .enumerate()
            .map(|(i, data)| ExecutionTraceFragment {
                index: i,
                offset: i * fragment_length,
                data,
            })
            .collect()
    }

    // LOW-DEGREE EXTENSION
    // --------------------------------------------------------------------------------------------

    /// Interpolates every register into a polynomial, then evaluates those polynomials over a
    /// coset of size `self.len() * blowup`, shifted by `domain_offset`. Returns the extended
    /// trace table (used for commitment/querying) and the polynomial table (used to compute
    /// out-of-domain evaluations).
    pub fn extend(&self, blowup: usize, domain_offset: B) -> (TraceTable<B>, TracePolyTable<B>) {
        assert!(blowup.is_power_of_two(), "blowup factor must be a power of two");
        let trace_length = self.len();
        let lde_domain_size = trace_length * blowup;

        let inv_twiddles = fft::get_inv_twiddles::<B>(trace_length);
        let lde_twiddles = fft::get_twiddles::<B>(lde_domain_size);

        #[cfg(feature = "concurrent")]
        let iter = self.0.par_iter();
        #[cfg(not(feature = "concurrent"))]
        let iter = self.0.iter();

        let (polys, extended): (Vec<Vec<B>>, Vec<Vec<B>>) = iter
            .map(|register| {
                let mut poly = register.clone();
                fft::interpolate_poly(&mut poly, &inv_twiddles);

                let mut padded_poly = poly.clone();
                padded_poly.resize(lde_domain_size, B::ZERO);
                let extended_register =
                    fft::evaluate_poly_with_offset(&padded_poly, &lde_twiddles, domain_offset);

                (poly, extended_register)
            })
            .unzip();

        (TraceTable::new(extended, blowup), TracePolyTable::new(polys))
    }
}

// EXECUTION TRACE FRAGMENT
// ================================================================================================

/// A mutable view into a contiguous range of steps across every register of an
/// [`ExecutionTrace`], handed out by [`ExecutionTrace::fragments`] so trace generation can
/// proceed fragment by fragment (and, behind the `concurrent` feature, across threads).
pub struct ExecutionTraceFragment<'a, B: StarkField> {
    index: usize,
    offset: usize,
    data: Vec<&'a mut [B]>,
}

impl<'a, B: StarkField> ExecutionTraceFragment<'a, B> {
    /// Returns the index of this fragment among the fragments of the trace it was split from.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the absolute trace step this fragment's local step 0 corresponds to.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of steps covered by this fragment.
    pub fn length(&self) -> usize {
        self.data[0].len()
    }

    /// Returns the number of registers in this fragment (equal to the full trace's width).
    pub fn width(&self) -> usize {
        self.data.len()
    }

    /// Sets the value of `register` at `step` steps past this fragment's offset.
    pub fn set(&mut self, register: usize, step: usize, value: B) {
        self.data[register][step] = value;
    }
}
