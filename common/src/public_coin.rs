// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crate::ComputationContext;
use crypto::{DefaultRandomElementGenerator, Hasher};

// PUBLIC COIN TRAIT
// ================================================================================================

/// The Fiat-Shamir transcript shared by the prover and verifier sides of a computation: a
/// sequence of 32-byte seeds, each derived from a commitment made earlier in the protocol, used
/// to draw the random coefficients and query positions that would otherwise require an
/// interactive verifier.
///
/// Implementors own the concrete commitments (trace root, constraint root, FRI layer roots,
/// grinded query seed); this trait only exposes the seeds derived from them.
pub trait PublicCoin {
    type Hasher: Hasher;

    /// Returns the computation context this coin is deriving randomness for.
    fn context(&self) -> &ComputationContext;

    /// Returns the seed used to draw coefficients for transition and boundary constraints.
    /// Derived from the execution trace commitment.
    fn constraint_seed(&self) -> [u8; 32];

    /// Returns the seed used to draw coefficients for the composition polynomial. Derived from
    /// the constraint evaluation commitment.
    fn composition_seed(&self) -> [u8; 32];

    /// Returns the seed used to draw query positions into the low-degree extension domain.
    /// Derived from the FRI layer commitments, grinded by a proof-of-work nonce.
    fn query_seed(&self) -> [u8; 32];

    // PROVIDED METHODS
    // --------------------------------------------------------------------------------------------

    /// Builds a coefficient stream for transition constraints, starting at counter 0 of
    /// [`Self::constraint_seed`].
    fn draw_transition_coefficient_prng(&self) -> DefaultRandomElementGenerator<Self::Hasher> {
        DefaultRandomElementGenerator::new(self.constraint_seed(), 0)
    }

    /// Builds a coefficient stream for boundary constraints. Uses the same commitment as
    /// [`Self::draw_transition_coefficient_prng`] but a disjoint starting counter, so the two
    /// streams never draw the same coefficient.
    fn draw_boundary_coefficient_prng(&self) -> DefaultRandomElementGenerator<Self::Hasher> {
        DefaultRandomElementGenerator::new(self.constraint_seed(), u64::MAX / 2)
    }

    /// Builds a coefficient stream for composition polynomial terms.
    fn draw_composition_coefficient_prng(&self) -> DefaultRandomElementGenerator<Self::Hasher> {
        DefaultRandomElementGenerator::new(self.composition_seed(), 0)
    }

    /// Builds the coefficient stream the DEEP quotient is drawn from: the out-of-domain point
    /// `z` (the first element drawn) followed by one coefficient pair per trace register. Uses
    /// the same commitment as [`Self::draw_transition_coefficient_prng`] but a third disjoint
    /// counter range, so all three streams can be drawn independently from a single trace
    /// commitment without ever repeating an output.
    fn draw_deep_coefficient_prng(&self) -> DefaultRandomElementGenerator<Self::Hasher> {
        DefaultRandomElementGenerator::new(self.constraint_seed(), u64::MAX / 4)
    }

    /// Draws `count` distinct query positions into a domain of size `domain_size`, skipping any
    /// position that lands on a multiple of the extension factor: those points of the LDE domain
    /// coincide with the unextended execution trace domain, rather than genuine low-degree
    /// extension points.
    fn draw_query_positions(&self, domain_size: usize, count: usize) -> Vec<usize> {
        let exclude_stride = self.context().options().extension_factor();
        fri::public_coin::draw_query_positions(
            &self.query_seed(),
            domain_size,
            count,
            exclude_stride,
            Self::Hasher::hash_fn(),
        )
    }
}
