//! Agent identifiers: the callers and owners visible to contract code.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{
    bytesrepr::{self, FromBytes, ToBytes, U8_SERIALIZED_LENGTH},
    Address, ChainId, Hname,
};

const ADDRESS_TAG: u8 = 0;
const CONTRACT_TAG: u8 = 1;

/// Identifier of a specific contract on a specific chain.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct ContractId {
    /// The chain the contract is deployed on.
    pub chain_id: ChainId,
    /// The contract's short identifier on that chain.
    pub hname: Hname,
}

impl ContractId {
    /// Constructs a new `ContractId`.
    pub const fn new(chain_id: ChainId, hname: Hname) -> ContractId {
        ContractId { chain_id, hname }
    }
}

impl Display for ContractId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.chain_id, self.hname)
    }
}

impl ToBytes for ContractId {
    fn to_bytes(&self) -> Result<Vec<u8>, bytesrepr::Error> {
        let mut result = bytesrepr::allocate_buffer(self)?;
        self.write_bytes(&mut result)?;
        Ok(result)
    }

    fn serialized_length(&self) -> usize {
        self.chain_id.serialized_length() + self.hname.serialized_length()
    }

    fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), bytesrepr::Error> {
        self.chain_id.write_bytes(writer)?;
        self.hname.write_bytes(writer)
    }
}

impl FromBytes for ContractId {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), bytesrepr::Error> {
        let (chain_id, remainder) = ChainId::from_bytes(bytes)?;
        let (hname, remainder) = Hname::from_bytes(remainder)?;
        Ok((ContractId { chain_id, hname }, remainder))
    }
}

/// An agent identifier denotes either an external address on the ledger or a contract on some
/// chain. It is the form in which callers and owners appear to contract code.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentId {
    /// An external address.
    Address(Address),
    /// A contract on a specific chain.
    Contract(ContractId),
}

impl AgentId {
    /// Returns `true` if the agent denotes an external address.
    pub fn is_address(&self) -> bool {
        matches!(self, AgentId::Address(_))
    }

    /// Returns the contract identifier if the agent denotes a contract.
    pub fn as_contract(&self) -> Option<&ContractId> {
        match self {
            AgentId::Address(_) => None,
            AgentId::Contract(contract_id) => Some(contract_id),
        }
    }
}

impl From<Address> for AgentId {
    fn from(address: Address) -> Self {
        AgentId::Address(address)
    }
}

impl From<ContractId> for AgentId {
    fn from(contract_id: ContractId) -> Self {
        AgentId::Contract(contract_id)
    }
}

impl Display for AgentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AgentId::Address(address) => write!(f, "A/{}", address),
            AgentId::Contract(contract_id) => write!(f, "C/{}", contract_id),
        }
    }
}

impl ToBytes for AgentId {
    fn to_bytes(&self) -> Result<Vec<u8>, bytesrepr::Error> {
        let mut result = bytesrepr::allocate_buffer(self)?;
        self.write_bytes(&mut result)?;
        Ok(result)
    }

    fn serialized_length(&self) -> usize {
        U8_SERIALIZED_LENGTH
            + match self {
                AgentId::Address(address) => address.serialized_length(),
                AgentId::Contract(contract_id) => contract_id.serialized_length(),
            }
    }

    fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), bytesrepr::Error> {
        match self {
            AgentId::Address(address) => {
                writer.push(ADDRESS_TAG);
                address.write_bytes(writer)
            }
            AgentId::Contract(contract_id) => {
                writer.push(CONTRACT_TAG);
                contract_id.write_bytes(writer)
            }
        }
    }
}

impl FromBytes for AgentId {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), bytesrepr::Error> {
        let (tag, remainder) = u8::from_bytes(bytes)?;
        match tag {
            ADDRESS_TAG => {
                let (address, remainder) = Address::from_bytes(remainder)?;
                Ok((AgentId::Address(address), remainder))
            }
            CONTRACT_TAG => {
                let (contract_id, remainder) = ContractId::from_bytes(remainder)?;
                Ok((AgentId::Contract(contract_id), remainder))
            }
            _ => Err(bytesrepr::Error::Formatting),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestRng;

    #[test]
    fn serialization_roundtrip() {
        let mut rng = TestRng::new();
        let address_agent = AgentId::Address(Address::random(&mut rng));
        let contract_agent = AgentId::Contract(ContractId::new(
            ChainId::random(&mut rng),
            Hname::from_name("alpha"),
        ));
        bytesrepr::test_serialization_roundtrip(&address_agent);
        bytesrepr::test_serialization_roundtrip(&contract_agent);
    }

    #[test]
    fn invalid_tag_fails_to_decode() {
        let mut rng = TestRng::new();
        let mut serialized = AgentId::Address(Address::random(&mut rng))
            .to_bytes()
            .unwrap();
        serialized[0] = 2;
        assert_eq!(
            bytesrepr::deserialize::<AgentId>(&serialized),
            Err(bytesrepr::Error::Formatting)
        );
    }

    #[test]
    fn address_and_contract_forms_are_distinguished() {
        let mut rng = TestRng::new();
        let address_agent = AgentId::from(Address::random(&mut rng));
        assert!(address_agent.is_address());
        assert!(address_agent.as_contract().is_none());

        let contract_id = ContractId::new(ChainId::random(&mut rng), Hname::from_name("root"));
        let contract_agent = AgentId::from(contract_id);
        assert!(!contract_agent.is_address());
        assert_eq!(contract_agent.as_contract(), Some(&contract_id));
    }
}
