// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Finite field traits. `FieldElement` is the minimal algebraic interface the rest of the
//! workspace needs (the evaluation field `E`, which may equal the base field or be an
//! extension of it); `StarkField` adds the structure specific to prime fields with a large
//! two-adic subgroup, which is what makes FFT-based interpolation and FRI possible.

use std::fmt::{Debug, Display};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use winter_utils::DeserializationError;

pub mod f128;

/// An element of a finite field.
pub trait FieldElement:
    Copy
    + Clone
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + PartialEq
    + Eq
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Mul<Output = Self>
    + MulAssign
    + Div<Output = Self>
    + DivAssign
    + Neg<Output = Self>
    + for<'a> TryFrom<&'a [u8], Error = DeserializationError>
{
    /// Base field of this element; equal to `Self` for prime fields.
    type BaseField: StarkField;

    /// Number of bytes needed to encode an element of this field.
    const ELEMENT_BYTES: usize;

    const ZERO: Self;
    const ONE: Self;

    /// Returns `self^exponent`.
    fn exp(&self, exponent: u128) -> Self;

    /// Returns the multiplicative inverse of `self`, or `None` if `self` is zero.
    fn inv(self) -> Self;

    /// Returns a vector of `n` elements, all equal to `Self::ZERO`, without running `ZERO`'s
    /// (trivial) constructor `n` times.
    fn zeroed_vector(n: usize) -> Vec<Self>;

    /// Returns a byte representation of a slice of field elements. This does not allocate
    /// new memory; bytes point directly into `elements`.
    fn elements_as_bytes(elements: &[Self]) -> &[u8];

    /// Interprets `bytes` as a sequence of field elements, without copying. Returns an error
    /// if `bytes.len()` is not a multiple of `Self::ELEMENT_BYTES`, or if any chunk does not
    /// represent a valid element.
    fn bytes_as_elements(bytes: &[u8]) -> Result<&[Self], DeserializationError>;
}

/// A field element belonging to a prime field of characteristic `p`, with a multiplicative
/// subgroup of smooth order `2^TWO_ADICITY` that FFTs and FRI operate over.
pub trait StarkField:
    FieldElement<BaseField = Self> + Copy + Into<u128> + From<u128> + Ord
{
    /// Prime modulus of the field.
    const MODULUS: u128;

    /// Number of bits needed to represent `Self::MODULUS`.
    const MODULUS_BITS: u32;

    /// A multiplicative generator of the full field (not just the two-adic subgroup).
    const GENERATOR: Self;

    /// `(MODULUS - 1)` is divisible by `2^TWO_ADICITY` but not by `2^(TWO_ADICITY + 1)`.
    const TWO_ADICITY: u32;

    /// A generator of the two-adic multiplicative subgroup of order `2^TWO_ADICITY`.
    const TWO_ADIC_ROOT_OF_UNITY: Self;

    /// Returns a generator of the multiplicative subgroup of order `2^n`.
    ///
    /// # Panics
    /// Panics if `n > Self::TWO_ADICITY`.
    fn get_root_of_unity(n: usize) -> Self {
        assert!(
            n as u32 <= Self::TWO_ADICITY,
            "subgroup of order 2^{} does not exist in this field",
            n
        );
        let mut result = Self::TWO_ADIC_ROOT_OF_UNITY;
        for _ in n as u32..Self::TWO_ADICITY {
            result = result * result;
        }
        result
    }
}
