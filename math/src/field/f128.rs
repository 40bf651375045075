// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! A 128-bit STARK-friendly prime field, `p = 2^128 - 45 * 2^40 + 1`. The field has a
//! multiplicative subgroup of order `2^40`, which bounds the largest power-of-two evaluation
//! domain this crate can build a root of unity for.

use super::{FieldElement, StarkField};
use std::convert::TryFrom;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use winter_utils::DeserializationError;

// CONSTANTS
// ================================================================================================

/// Field modulus = 2^128 - 45 * 2^40 + 1.
const M: u128 = 340282366920938463463374557953744961537;

/// 2^128 mod M, expressed as `M`'s two's-complement-like shape: `2^128 = M + (45*2^40 - 1)`,
/// so `2^128 ≡ 45*2^40 - 1 (mod M)`. Reduction of 256-bit products exploits this repeatedly.
const C: u128 = 45 * (1u128 << 40) - 1;

/// A multiplicative generator of the full group of order `M - 1`.
const GENERATOR: u128 = 7;

/// `M - 1` is divisible by `2^40` but not `2^41`.
const TWO_ADICITY: u32 = 40;

/// A generator of the two-adic subgroup of order `2^40`.
const TWO_ADIC_ROOT_OF_UNITY: u128 = 125742876522576709331233832189852195272;

pub const ELEMENT_BYTES: usize = 16;

// BASE ELEMENT
// ================================================================================================

#[derive(Copy, Clone, Default, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct BaseElement(u128);

impl BaseElement {
    /// Creates a new field element from a raw `u128`, reducing it modulo `M` if necessary.
    pub const fn new(value: u128) -> Self {
        BaseElement(if value < M { value } else { value % M })
    }

    /// Returns the raw integer representative of this element, in `[0, M)`.
    pub fn as_int(&self) -> u128 {
        self.0
    }

    /// Returns a field element sampled uniformly at random from the thread-local RNG.
    pub fn rand() -> Self {
        use rand::Rng;
        BaseElement::new(rand::thread_rng().gen::<u128>())
    }

    /// Returns `n` field elements sampled deterministically from `seed`. Used by tests that
    /// need a reproducible "random" trace or constraint values.
    pub fn prng_vector(seed: [u8; 32], n: usize) -> Vec<Self> {
        use rand::{rngs::StdRng, Rng, SeedableRng};
        let mut rng = StdRng::from_seed(seed);
        (0..n).map(|_| BaseElement::new(rng.gen::<u128>())).collect()
    }
}

impl FieldElement for BaseElement {
    type BaseField = Self;

    const ELEMENT_BYTES: usize = ELEMENT_BYTES;
    const ZERO: Self = BaseElement(0);
    const ONE: Self = BaseElement(1);

    fn exp(&self, exponent: u128) -> Self {
        if exponent == 0 {
            return Self::ONE;
        } else if self.0 == 0 {
            return Self::ZERO;
        }

        let mut result = Self::ONE;
        let mut base = *self;
        let mut e = exponent;
        while e > 0 {
            if e & 1 == 1 {
                result *= base;
            }
            e >>= 1;
            if e > 0 {
                base *= base;
            }
        }
        result
    }

    fn inv(self) -> Self {
        BaseElement(exp_mod(self.0, M - 2))
    }

    fn zeroed_vector(n: usize) -> Vec<Self> {
        vec![Self::ZERO; n]
    }

    fn elements_as_bytes(elements: &[Self]) -> &[u8] {
        let p = elements.as_ptr();
        let len = elements.len() * Self::ELEMENT_BYTES;
        unsafe { std::slice::from_raw_parts(p as *const u8, len) }
    }

    fn bytes_as_elements(bytes: &[u8]) -> Result<&[Self], DeserializationError> {
        if bytes.len() % Self::ELEMENT_BYTES != 0 {
            return Err(DeserializationError::InvalidValue(format!(
                "byte slice of length {} does not divide evenly into elements of {} bytes",
                bytes.len(),
                Self::ELEMENT_BYTES
            )));
        }
        let p = bytes.as_ptr();
        if (p as usize) % std::mem::align_of::<u128>() != 0 {
            return Err(DeserializationError::InvalidValue(
                "byte slice is not properly aligned".into(),
            ));
        }
        let len = bytes.len() / Self::ELEMENT_BYTES;
        Ok(unsafe { std::slice::from_raw_parts(p as *const Self, len) })
    }
}

impl StarkField for BaseElement {
    const MODULUS: u128 = M;
    const MODULUS_BITS: u32 = 128;
    const GENERATOR: Self = BaseElement(GENERATOR);
    const TWO_ADICITY: u32 = TWO_ADICITY;
    const TWO_ADIC_ROOT_OF_UNITY: Self = BaseElement(TWO_ADIC_ROOT_OF_UNITY);
}

// OVERLOADED OPERATORS
// ================================================================================================

impl Add for BaseElement {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        let (sum, carry) = self.0.overflowing_add(rhs.0);
        let sum = if carry || sum >= M { sum.wrapping_sub(M) } else { sum };
        BaseElement(sum)
    }
}

impl AddAssign for BaseElement {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for BaseElement {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        let (diff, borrow) = self.0.overflowing_sub(rhs.0);
        let diff = if borrow { diff.wrapping_add(M) } else { diff };
        BaseElement(diff)
    }
}

impl SubAssign for BaseElement {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for BaseElement {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        BaseElement(mul_mod(self.0, rhs.0))
    }
}

impl MulAssign for BaseElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Div for BaseElement {
    type Output = Self;
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Self) -> Self {
        self * rhs.inv()
    }
}

impl DivAssign for BaseElement {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Neg for BaseElement {
    type Output = Self;
    fn neg(self) -> Self {
        BaseElement::ZERO - self
    }
}

// TYPE CONVERSIONS
// ================================================================================================

impl From<u128> for BaseElement {
    fn from(value: u128) -> Self {
        BaseElement::new(value)
    }
}

impl From<u64> for BaseElement {
    fn from(value: u64) -> Self {
        BaseElement(value as u128)
    }
}

impl From<u32> for BaseElement {
    fn from(value: u32) -> Self {
        BaseElement(value as u128)
    }
}

impl From<BaseElement> for u128 {
    fn from(value: BaseElement) -> Self {
        value.0
    }
}

impl<'a> TryFrom<&'a [u8]> for BaseElement {
    type Error = DeserializationError;

    fn try_from(bytes: &'a [u8]) -> Result<Self, Self::Error> {
        if bytes.len() != ELEMENT_BYTES {
            return Err(DeserializationError::InvalidValue(format!(
                "expected {} bytes to decode a field element, got {}",
                ELEMENT_BYTES,
                bytes.len()
            )));
        }
        let mut buf = [0u8; ELEMENT_BYTES];
        buf.copy_from_slice(bytes);
        let value = u128::from_le_bytes(buf);
        if value >= M {
            return Err(DeserializationError::InvalidValue(format!(
                "value {} is greater than or equal to the field modulus",
                value
            )));
        }
        Ok(BaseElement(value))
    }
}

impl fmt::Debug for BaseElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BaseElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// MODULAR ARITHMETIC HELPERS
// ================================================================================================

/// Splits `x` into its low and high 64-bit halves.
#[inline(always)]
fn split(x: u128) -> (u64, u64) {
    (x as u64, (x >> 64) as u64)
}

/// Computes `a * b` as a 256-bit product, returned as `(low, high)` such that
/// `a * b == low + high * 2^128`.
#[inline]
fn mul_wide(a: u128, b: u128) -> (u128, u128) {
    let (a0, a1) = split(a);
    let (b0, b1) = split(b);

    let p00 = (a0 as u128) * (b0 as u128);
    let p01 = (a0 as u128) * (b1 as u128);
    let p10 = (a1 as u128) * (b0 as u128);
    let p11 = (a1 as u128) * (b1 as u128);

    let (lo00, hi00) = split(p00);
    let (lo01, hi01) = split(p01);
    let (lo10, hi10) = split(p10);
    let (lo11, hi11) = split(p11);

    let r0 = lo00;
    let c1 = (hi00 as u128) + (lo01 as u128) + (lo10 as u128);
    let r1 = c1 as u64;
    let carry_to_2 = c1 >> 64;

    let c2 = (hi01 as u128) + (hi10 as u128) + (lo11 as u128) + carry_to_2;
    let r2 = c2 as u64;
    let carry_to_3 = c2 >> 64;

    let c3 = (hi11 as u128) + carry_to_3;
    let r3 = c3 as u64;

    let lo = (r0 as u128) | ((r1 as u128) << 64);
    let hi = (r2 as u128) | ((r3 as u128) << 64);
    (lo, hi)
}

/// Computes `a * C` (where `C < 2^46`) as a 256-bit product `(low, high)` with `high < 2^64`.
#[inline]
fn mul_by_c(a: u128) -> (u128, u128) {
    let (a0, a1) = split(a);
    let p0 = (a0 as u128) * C;
    let p1 = (a1 as u128) * C;

    let (lo0, hi0) = split(p0);
    let (lo1, hi1) = split(p1);

    let r0 = lo0;
    let c1 = (hi0 as u128) + (lo1 as u128);
    let r1 = c1 as u64;
    let carry = c1 >> 64;
    let r2 = (hi1 as u128) + carry;

    let lo = (r0 as u128) | ((r1 as u128) << 64);
    (lo, r2)
}

/// Reduces a 256-bit product `a * b` modulo `M`, using `2^128 ≡ C (mod M)`.
fn mul_mod(a: u128, b: u128) -> u128 {
    let (lo, hi) = mul_wide(a, b);
    let (lo2, hi2) = mul_by_c(hi);

    let (sum1, carry) = lo.overflowing_add(lo2);
    let total_hi = hi2 + (carry as u128);

    // total_hi is small (well under 2^64), so total_hi * C never needs widening.
    let extra = total_hi * C;
    let (mut result, carry2) = sum1.overflowing_add(extra);
    if carry2 {
        result += C;
    }

    while result >= M {
        result -= M;
    }
    result
}

/// Computes `base^exponent mod M` by repeated squaring.
fn exp_mod(base: u128, exponent: u128) -> u128 {
    if exponent == 0 {
        return 1;
    }
    let mut result = 1u128;
    let mut b = base % M;
    let mut e = exponent;
    while e > 0 {
        if e & 1 == 1 {
            result = mul_mod(result, b);
        }
        e >>= 1;
        if e > 0 {
            b = mul_mod(b, b);
        }
    }
    result
}
