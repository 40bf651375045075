// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crypto::RandomElementGenerator;

/// Exposes the Merkle commitments of every FRI layer, which double as the Fiat-Shamir seeds the
/// verifier re-derives the folding coefficients from.
pub trait PublicCoin {
    type RandomElementGenerator: RandomElementGenerator;

    /// Returns the commitments of every FRI layer, in folding order: `fri_layer_commitments()[0]`
    /// is the commitment of the initial (unfolded) codeword.
    fn fri_layer_commitments(&self) -> &[[u8; 32]];

    /// Draws the folding coefficient used at `layer_depth`, deterministically derived from that
    /// layer's own commitment.
    fn draw_fri_alpha<E: math::field::FieldElement>(&self, layer_depth: usize) -> E {
        let mut prng = Self::RandomElementGenerator::new_from_seed(
            self.fri_layer_commitments()[layer_depth],
        );
        prng.draw()
    }
}

/// Derives the pseudo-random query positions used to open every FRI layer, by hashing `seed`
/// with an incrementing counter and reducing the digest modulo `domain_size`.
///
/// `exclude_stride` skips any index `i` with `exclude_stride > 0 && i % exclude_stride == 0`
/// before it is accepted into the result: these are the points of the unextended trace domain
/// embedded in the LDE domain, which a caller drawing execution-trace query positions wants to
/// stay off of. Pass `0` to draw from the whole domain unfiltered (e.g. for FRI-internal layer
/// positions, which have no such excluded stride).
pub fn draw_query_positions(
    seed: &[u8; 32],
    domain_size: usize,
    num_positions: usize,
    exclude_stride: usize,
    hash_fn: crypto::HashFunction,
) -> Vec<usize> {
    let mut positions = Vec::with_capacity(num_positions);
    let mut counter: u64 = 0;
    while positions.len() < num_positions {
        let mut input = [0u8; 40];
        input[..32].copy_from_slice(seed);
        input[32..].copy_from_slice(&counter.to_le_bytes());
        counter += 1;

        let mut digest = [0u8; 32];
        hash_fn(&input, &mut digest);
        let value = u64::from_le_bytes(digest[..8].try_into().unwrap());
        let index = (value as usize) % domain_size;
        if exclude_stride > 0 && index % exclude_stride == 0 {
            continue;
        }
        if !positions.contains(&index) {
            positions.push(index);
        }
    }
    positions.sort_unstable();
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto::{Hasher, Sha256};
    use proptest::prelude::*;

    #[test]
    fn positions_are_distinct_and_in_range() {
        let positions = draw_query_positions(&[7u8; 32], 1024, 40, 0, Sha256::hash_fn());
        assert_eq!(40, positions.len());
        let mut deduped = positions.clone();
        deduped.dedup();
        assert_eq!(positions.len(), deduped.len());
        assert!(positions.iter().all(|&p| p < 1024));
    }

    #[test]
    fn different_seeds_draw_different_positions() {
        let a = draw_query_positions(&[1u8; 32], 1024, 10, 0, Sha256::hash_fn());
        let b = draw_query_positions(&[2u8; 32], 1024, 10, 0, Sha256::hash_fn());
        assert_ne!(a, b);
    }

    #[test]
    fn exclude_stride_skips_its_multiples() {
        let positions = draw_query_positions(&[3u8; 32], 1024, 40, 8, Sha256::hash_fn());
        assert_eq!(40, positions.len());
        assert!(positions.iter().all(|&p| p % 8 != 0));
    }

    proptest::proptest! {
        /// For any seed and any power-of-two domain, the drawn positions are in range and
        /// distinct, and asking for more positions only ever adds to the set already drawn for a
        /// smaller count: the query-index stream does not get reshuffled as more are requested.
        #[test]
        fn positions_grow_monotonically_and_stay_distinct(
            seed in proptest::array::uniform32(any::<u8>()),
            log_domain in 4usize..16,
            counts in (1usize..6, 1usize..6),
        ) {
            let domain_size = 1usize << log_domain;
            let (small, extra) = counts;
            let large = small + extra;

            let short = draw_query_positions(&seed, domain_size, small, 0, Sha256::hash_fn());
            let long = draw_query_positions(&seed, domain_size, large, 0, Sha256::hash_fn());

            prop_assert_eq!(short.len(), small);
            prop_assert_eq!(long.len(), large);
            prop_assert!(long.iter().all(|&p| p < domain_size));
            prop_assert!(short.iter().all(|p| long.contains(p)));

            let mut long_sorted = long.clone();
            long_sorted.sort_unstable();
            long_sorted.dedup();
            prop_assert_eq!(long_sorted.len(), long.len());
        }

        /// Testable Property 8: the drawn set never contains an index that is a nonzero multiple
        /// of `exclude_stride` when `exclude_stride` itself is nonzero.
        #[test]
        fn positions_never_hit_the_excluded_stride(
            seed in proptest::array::uniform32(any::<u8>()),
            log_domain in 4usize..16,
            log_stride in 0usize..4,
            count in 1usize..6,
        ) {
            let domain_size = 1usize << log_domain;
            let exclude_stride = 1usize << log_stride;

            let positions = draw_query_positions(&seed, domain_size, count, exclude_stride, Sha256::hash_fn());

            prop_assert_eq!(positions.len(), count);
            prop_assert!(positions.iter().all(|&p| p % exclude_stride != 0));
        }
    }
}
