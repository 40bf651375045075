// Copyright (c) Facebook, Inc. and its affiliates.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::ConfigurationError;
use fri::FriOptions;
use math::field::StarkField;
use serde::{Deserialize, Serialize};
use utils::{ByteReader, ByteWriter, DeserializationError};

// TYPES AND INTERFACES
// ================================================================================================

/// The hash function used for Merkle commitments and the Fiat-Shamir random coin. Both
/// algorithms produce 32-byte digests, so the rest of the system never needs to know which one
/// is in effect beyond this choice.
#[repr(u8)]
#[derive(Copy, Clone, Serialize, Deserialize)]
pub enum HashFunction {
    Sha256 = 1,
    Blake2s256 = 2,
}

impl HashFunction {
    pub fn serialize(&self, target: &mut ByteWriter) {
        target.write_u8(*self as u8);
    }

    pub fn deserialize(source: &mut ByteReader) -> Result<Self, DeserializationError> {
        match source.read_u8()? {
            1 => Ok(HashFunction::Sha256),
            2 => Ok(HashFunction::Blake2s256),
            _ => Err(DeserializationError::InvalidValue(
                "unrecognized hash function tag".to_string(),
            )),
        }
    }
}

/// Security parameters for a STARK proof. Constructing one validates every field; a value of
/// this type is always well-formed.
///
/// * `extension_factor` must be a power of 2 between 2 and 32; this is the ratio between the
///   low-degree extension domain and the trace domain (called "blowup factor" in the rest of
///   the crate's naming, since it is the single blowup used for both constraint evaluation and
///   FRI).
/// * `exe_spot_check_count` (number of execution-trace queries) must be between 1 and 128.
/// * `fri_spot_check_count` (number of FRI queries) must be between 1 and 64.
/// * `grinding_factor` must be between 0 and 32.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProofOptions {
    extension_factor: u8, // stored as power of 2
    exe_spot_check_count: u8,
    fri_spot_check_count: u8,
    grinding_factor: u8,
    hash_fn: HashFunction,
}

// PROOF OPTIONS IMPLEMENTATION
// ================================================================================================
impl ProofOptions {
    // CONSTRUCTORS
    // --------------------------------------------------------------------------------------------
    pub fn new(
        extension_factor: usize,
        exe_spot_check_count: usize,
        fri_spot_check_count: usize,
        grinding_factor: u32,
        hash_fn: HashFunction,
    ) -> Result<ProofOptions, ConfigurationError> {
        if !extension_factor.is_power_of_two() {
            return Err(ConfigurationError::ExtensionFactorNotPowerOfTwo(extension_factor));
        }
        if !(2..=32).contains(&extension_factor) {
            return Err(ConfigurationError::ExtensionFactorOutOfRange(extension_factor));
        }
        if exe_spot_check_count == 0 || exe_spot_check_count > 128 {
            return Err(ConfigurationError::ExeSpotCheckCountOutOfRange(exe_spot_check_count));
        }
        if fri_spot_check_count == 0 || fri_spot_check_count > 64 {
            return Err(ConfigurationError::FriSpotCheckCountOutOfRange(fri_spot_check_count));
        }
        if grinding_factor > 32 {
            return Err(ConfigurationError::GrindingFactorOutOfRange(grinding_factor));
        }

        Ok(ProofOptions {
            extension_factor: extension_factor.trailing_zeros() as u8,
            exe_spot_check_count: exe_spot_check_count as u8,
            fri_spot_check_count: fri_spot_check_count as u8,
            grinding_factor: grinding_factor as u8,
            hash_fn,
        })
    }

    /// Picks `extension_factor` as the smallest power of 2 at least `2 * max_constraint_degree`,
    /// and `exe_spot_check_count`/`fri_spot_check_count` at the defaults of 80/40, matching the
    /// defaults of the configuration surface.
    pub fn with_defaults(max_constraint_degree: usize, hash_fn: HashFunction) -> ProofOptions {
        let extension_factor = (2 * max_constraint_degree).next_power_of_two();
        ProofOptions::new(extension_factor, 80, 40, 0, hash_fn)
            .expect("defaulted extension factor is always a valid power of 2 in [2, 32]")
    }

    // PUBLIC ACCESSORS
    // --------------------------------------------------------------------------------------------

    /// Returns trace extension factor for a STARK proof (i.e. a factor by which the execution
    /// trace is extended). This directly impacts proof soundness as each query adds roughly
    /// log2(lde_domain_size / constraint_evaluation_domain_size) bits of security to a proof.
    /// However, higher extension factors also increase prover runtime - e.g. doubling the
    /// extension factor roughly doubles prover time.
    pub fn extension_factor(&self) -> usize {
        1 << (self.extension_factor as usize)
    }

    /// Returns the number of execution-trace positions sampled per proof. This directly impacts
    /// proof soundness as each query adds roughly log2(lde_domain_size / ce_domain_size) bits of
    /// security to a proof, at the cost of proof size.
    pub fn exe_spot_check_count(&self) -> usize {
        self.exe_spot_check_count as usize
    }

    /// Returns the number of FRI layer positions sampled per proof.
    pub fn fri_spot_check_count(&self) -> usize {
        self.fri_spot_check_count as usize
    }

    /// Returns query seed grinding factor for a STARK proof. Grinding applies Proof-of-Work
    /// to the query position seed. An honest prover needs to perform this work only once,
    /// while a dishonest prover will need to perform it every time they try to change a
    /// commitment. Thus, higher grinding factor makes it more difficult to forge a STARK
    /// proof. However, setting grinding factor too high (e.g. higher than 20) will adversely
    /// affect prover time.
    pub fn grinding_factor(&self) -> u32 {
        self.grinding_factor as u32
    }

    /// Returns the hash function to be used during STARK proof construction. Security of a
    /// STARK proof is bounded by collision resistance of the used hash function.
    pub fn hash_fn(&self) -> HashFunction {
        self.hash_fn
    }

    /// Returns the offset by which the low-degree extension domain is shifted in relation to the
    /// trace domain. Currently, this is hard-coded to the generator of the underlying base field.
    pub fn domain_offset<B: StarkField>(&self) -> B {
        B::GENERATOR
    }

    /// Returns options for the FRI protocol instantiated with parameters from this proof options.
    pub fn to_fri_options<B: StarkField>(&self) -> FriOptions<B> {
        FriOptions::new(self.extension_factor(), self.domain_offset())
            .expect("extension_factor is already validated as a power of 2 by ProofOptions::new")
    }

    // SERIALIZATION
    // --------------------------------------------------------------------------------------------

    pub fn serialize(&self, target: &mut ByteWriter) {
        target.write_u8(self.extension_factor);
        target.write_u8(self.exe_spot_check_count);
        target.write_u8(self.fri_spot_check_count);
        target.write_u8(self.grinding_factor);
        self.hash_fn.serialize(target);
    }

    pub fn deserialize(source: &mut ByteReader) -> Result<Self, DeserializationError> {
        Ok(ProofOptions {
            extension_factor: source.read_u8()?,
            exe_spot_check_count: source.read_u8()?,
            fri_spot_check_count: source.read_u8()?,
            grinding_factor: source.read_u8()?,
            hash_fn: HashFunction::deserialize(source)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_power_of_two_extension_factor() {
        let err = ProofOptions::new(3, 80, 40, 0, HashFunction::Sha256).err().unwrap();
        assert_eq!(err, ConfigurationError::ExtensionFactorNotPowerOfTwo(3));
    }

    #[test]
    fn rejects_excessive_fri_spot_check_count() {
        let err = ProofOptions::new(8, 80, 65, 0, HashFunction::Sha256).err().unwrap();
        assert_eq!(err, ConfigurationError::FriSpotCheckCountOutOfRange(65));
    }

    #[test]
    fn with_defaults_matches_configuration_surface_defaults() {
        let options = ProofOptions::with_defaults(6, HashFunction::Sha256);
        assert_eq!(options.extension_factor(), 8);
        assert_eq!(options.exe_spot_check_count(), 80);
        assert_eq!(options.fri_spot_check_count(), 40);
    }
}
