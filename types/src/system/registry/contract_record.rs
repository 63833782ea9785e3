//! Registration metadata of a deployed contract.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    bytesrepr::{self, FromBytes, ToBytes},
    system::registry::{CONTRACT_DESCRIPTION, CONTRACT_NAME},
    ProgramHash,
};

/// A fee value outside the accepted range. Fees are non-negative; `0` means "inherit the
/// chain-wide default".
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
#[error("invalid fee value: {0}")]
pub struct InvalidFee(pub i64);

/// One entry of the contract registry: how a contract was deployed and what fees it charges.
///
/// A record exists in the registry iff the contract was successfully deployed and initialized.
/// Once written it is never mutated by the registry core.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct ContractRecord {
    program_hash: ProgramHash,
    name: String,
    description: String,
    owner_fee: i64,
    validator_fee: i64,
}

impl ContractRecord {
    /// Constructs a new `ContractRecord`. Fails if either fee is negative.
    pub fn new(
        program_hash: ProgramHash,
        name: String,
        description: String,
        owner_fee: i64,
        validator_fee: i64,
    ) -> Result<ContractRecord, InvalidFee> {
        if owner_fee < 0 {
            return Err(InvalidFee(owner_fee));
        }
        if validator_fee < 0 {
            return Err(InvalidFee(validator_fee));
        }
        Ok(ContractRecord {
            program_hash,
            name,
            description,
            owner_fee,
            validator_fee,
        })
    }

    /// The placeholder record for the root registry itself, synthesized while the chain is
    /// bootstrapping and the registry has not yet written its own entry.
    pub fn root_placeholder() -> ContractRecord {
        ContractRecord {
            program_hash: ProgramHash::default(),
            name: CONTRACT_NAME.to_string(),
            description: CONTRACT_DESCRIPTION.to_string(),
            owner_fee: 0,
            validator_fee: 0,
        }
    }

    /// Identifier of the contract's code.
    pub fn program_hash(&self) -> ProgramHash {
        self.program_hash
    }

    /// The contract's name, from which its `Hname` is derived.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Per-contract owner fee; `0` inherits the chain default.
    pub fn owner_fee(&self) -> i64 {
        self.owner_fee
    }

    /// Per-contract validator fee; `0` inherits the chain default.
    pub fn validator_fee(&self) -> i64 {
        self.validator_fee
    }
}

impl ToBytes for ContractRecord {
    fn to_bytes(&self) -> Result<Vec<u8>, bytesrepr::Error> {
        let mut result = bytesrepr::allocate_buffer(self)?;
        self.write_bytes(&mut result)?;
        Ok(result)
    }

    fn serialized_length(&self) -> usize {
        self.program_hash.serialized_length()
            + self.name.serialized_length()
            + self.description.serialized_length()
            + self.owner_fee.serialized_length()
            + self.validator_fee.serialized_length()
    }

    fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), bytesrepr::Error> {
        self.program_hash.write_bytes(writer)?;
        self.name.write_bytes(writer)?;
        self.description.write_bytes(writer)?;
        self.owner_fee.write_bytes(writer)?;
        self.validator_fee.write_bytes(writer)
    }
}

impl FromBytes for ContractRecord {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), bytesrepr::Error> {
        let (program_hash, remainder) = ProgramHash::from_bytes(bytes)?;
        let (name, remainder) = String::from_bytes(remainder)?;
        let (description, remainder) = String::from_bytes(remainder)?;
        let (owner_fee, remainder) = i64::from_bytes(remainder)?;
        let (validator_fee, remainder) = i64::from_bytes(remainder)?;
        let record = ContractRecord {
            program_hash,
            name,
            description,
            owner_fee,
            validator_fee,
        };
        Ok((record, remainder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestRng;

    fn example_record(rng: &mut TestRng) -> ContractRecord {
        ContractRecord::new(
            ProgramHash::random(rng),
            "alpha".to_string(),
            "example contract".to_string(),
            500,
            0,
        )
        .expect("should create record")
    }

    #[test]
    fn serialization_roundtrip() {
        let mut rng = TestRng::new();
        bytesrepr::test_serialization_roundtrip(&example_record(&mut rng));
        bytesrepr::test_serialization_roundtrip(&ContractRecord::root_placeholder());
    }

    #[test]
    fn encoding_is_deterministic() {
        let mut rng = TestRng::new();
        let record = example_record(&mut rng);
        assert_eq!(record.to_bytes().unwrap(), record.clone().into_bytes().unwrap());
    }

    #[test]
    fn negative_fees_rejected_at_construction() {
        let program_hash = ProgramHash::default();
        assert_eq!(
            ContractRecord::new(program_hash, "x".to_string(), String::new(), -1, 0),
            Err(InvalidFee(-1))
        );
        assert_eq!(
            ContractRecord::new(program_hash, "x".to_string(), String::new(), 0, i64::MIN),
            Err(InvalidFee(i64::MIN))
        );
    }

    #[test]
    fn boundary_fees_accepted() {
        let program_hash = ProgramHash::default();
        for fee in [0, 1, i64::MAX] {
            let record =
                ContractRecord::new(program_hash, "x".to_string(), String::new(), fee, fee)
                    .expect("non-negative fees should be accepted");
            bytesrepr::test_serialization_roundtrip(&record);
        }
    }

    #[test]
    fn truncated_input_fails_to_decode() {
        let mut rng = TestRng::new();
        let serialized = example_record(&mut rng).to_bytes().unwrap();
        for len in 0..serialized.len() {
            assert!(bytesrepr::deserialize::<ContractRecord>(&serialized[..len]).is_err());
        }
    }
}
