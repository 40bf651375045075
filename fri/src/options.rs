// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::ConfigurationError;
use math::field::StarkField;

/// The degree-reduction factor applied at every FRI folding round. Fixed at 4: each round
/// interprets the codeword as rows of 4 values, interpolates a cubic through each row, and
/// evaluates it at a single random point to produce the next (quarter-length) codeword.
pub const FOLDING_FACTOR: usize = 4;

/// Folding stops once a codeword is at most this many elements long; the remaining values are
/// sent to the verifier directly instead of being committed to and queried.
pub const MAX_REMAINDER_LENGTH: usize = 256;

/// Parameters controlling how a composition polynomial's low-degree extension is folded down
/// to a remainder: how much larger the evaluation domain is than the polynomial's degree
/// (`blowup_factor`), and the coset shift applied to that domain (`domain_offset`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriOptions<B: StarkField> {
    blowup_factor: usize,
    domain_offset: B,
}

impl<B: StarkField> FriOptions<B> {
    /// Creates new FRI options.
    pub fn new(blowup_factor: usize, domain_offset: B) -> Result<Self, ConfigurationError> {
        if !blowup_factor.is_power_of_two() {
            return Err(ConfigurationError::BlowupFactorNotPowerOfTwo(blowup_factor));
        }
        Ok(FriOptions {
            blowup_factor,
            domain_offset,
        })
    }

    /// Returns the blowup factor between a composition polynomial's degree and the size of the
    /// domain its evaluations are committed over.
    pub fn blowup_factor(&self) -> usize {
        self.blowup_factor
    }

    /// Returns the coset shift applied to the evaluation domain.
    pub fn domain_offset(&self) -> B {
        self.domain_offset
    }

    /// Returns the number of quartic folding rounds needed to bring a codeword of
    /// `domain_size` elements down to [`MAX_REMAINDER_LENGTH`] or fewer.
    pub fn num_fri_layers(&self, domain_size: usize) -> usize {
        num_fri_layers(domain_size)
    }

    /// Returns the size of the final remainder codeword reached after folding a domain of
    /// `domain_size` elements down via [`Self::num_fri_layers`] rounds.
    pub fn remainder_size(&self, domain_size: usize) -> usize {
        remainder_size(domain_size)
    }
}

/// Number of quartic folding rounds a codeword of `domain_size` elements goes through before
/// reaching [`MAX_REMAINDER_LENGTH`] or fewer elements. Depends only on `domain_size` (not on any
/// field or blowup factor), so a verifier can recompute it from the claimed trace length and
/// extension factor alone, without the prover having to name the layer count in the proof itself.
pub fn num_fri_layers(domain_size: usize) -> usize {
    let mut size = domain_size;
    let mut num_layers = 0;
    while size > MAX_REMAINDER_LENGTH {
        size /= FOLDING_FACTOR;
        num_layers += 1;
    }
    num_layers
}

/// Size of the remainder codeword reached after folding a domain of `domain_size` elements down
/// via [`num_fri_layers`] rounds.
pub fn remainder_size(domain_size: usize) -> usize {
    domain_size / FOLDING_FACTOR.pow(num_fri_layers(domain_size) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use math::field::f128::BaseElement;

    #[test]
    fn num_fri_layers_stops_at_remainder_bound() {
        let options = FriOptions::new(8, BaseElement::GENERATOR).unwrap();
        // 256 * 4^4 = 65536
        assert_eq!(4, options.num_fri_layers(65536));
        assert_eq!(256, options.remainder_size(65536));
    }

    #[test]
    fn small_domain_needs_no_layers() {
        let options = FriOptions::new(8, BaseElement::GENERATOR).unwrap();
        assert_eq!(0, options.num_fri_layers(128));
        assert_eq!(128, options.remainder_size(128));
    }

    #[test]
    fn rejects_non_power_of_two_blowup() {
        let err = FriOptions::new(3, BaseElement::GENERATOR).err().unwrap();
        assert_eq!(err, ConfigurationError::BlowupFactorNotPowerOfTwo(3));
    }
}
