//! Records of the chains this node participates in.

use vellum_execution_engine::storage::{StateAccess, StateMap};
use vellum_types::{
    bytesrepr::{self, FromBytes, ToBytes},
    Address, ChainId,
};

use crate::Error;

/// Store namespace holding one record per chain, keyed by chain identifier.
const CHAIN_RECORDS_KEY: &str = "chain_records";

/// Everything a node needs to take part in one chain: where the chain lives and which nodes
/// form its committee. `active` tells whether this node currently runs the chain.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ChainRecord {
    /// The chain's identifier.
    pub chain_id: ChainId,
    /// The chain's address on the ledger.
    pub chain_address: Address,
    /// Network locations of the committee nodes.
    pub committee_nodes: Vec<String>,
    /// Whether this node currently runs the chain.
    pub active: bool,
}

impl ToBytes for ChainRecord {
    fn to_bytes(&self) -> Result<Vec<u8>, bytesrepr::Error> {
        let mut result = bytesrepr::allocate_buffer(self)?;
        self.chain_id.write_bytes(&mut result)?;
        self.chain_address.write_bytes(&mut result)?;
        self.committee_nodes.write_bytes(&mut result)?;
        self.active.write_bytes(&mut result)?;
        Ok(result)
    }

    fn serialized_length(&self) -> usize {
        self.chain_id.serialized_length()
            + self.chain_address.serialized_length()
            + self.committee_nodes.serialized_length()
            + self.active.serialized_length()
    }
}

impl FromBytes for ChainRecord {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), bytesrepr::Error> {
        let (chain_id, remainder) = ChainId::from_bytes(bytes)?;
        let (chain_address, remainder) = Address::from_bytes(remainder)?;
        let (committee_nodes, remainder) = Vec::<String>::from_bytes(remainder)?;
        let (active, remainder) = bool::from_bytes(remainder)?;
        let record = ChainRecord {
            chain_id,
            chain_address,
            committee_nodes,
            active,
        };
        Ok((record, remainder))
    }
}

/// Access to the node's chain records, stored in a node-local partition.
#[derive(Clone, Debug)]
pub struct ChainRecordStore {
    map: StateMap,
}

impl ChainRecordStore {
    /// Creates a handle to the chain record partition.
    #[allow(clippy::new_without_default)]
    pub fn new() -> ChainRecordStore {
        ChainRecordStore {
            map: StateMap::new(CHAIN_RECORDS_KEY),
        }
    }

    /// Writes `record`, overwriting any previous record for the same chain.
    pub fn put<S: StateAccess + ?Sized>(
        &self,
        store: &mut S,
        record: &ChainRecord,
    ) -> Result<(), Error> {
        self.map
            .insert(store, record.chain_id.as_ref(), record.to_bytes()?);
        Ok(())
    }

    /// Returns the record for `chain_id`.
    pub fn get<S: StateAccess + ?Sized>(
        &self,
        store: &S,
        chain_id: ChainId,
    ) -> Result<ChainRecord, Error> {
        match self.map.get(store, chain_id.as_ref()) {
            None => Err(Error::ChainRecordNotFound(chain_id)),
            Some(bytes) => Ok(bytesrepr::deserialize(&bytes)?),
        }
    }

    /// Returns all records, in ascending chain identifier order.
    pub fn list<S: StateAccess + ?Sized>(&self, store: &S) -> Result<Vec<ChainRecord>, Error> {
        self.map
            .iter(store)
            .into_iter()
            .map(|(_, bytes)| bytesrepr::deserialize(&bytes).map_err(Error::from))
            .collect()
    }

    /// Marks the chain as run by this node.
    pub fn activate<S: StateAccess + ?Sized>(
        &self,
        store: &mut S,
        chain_id: ChainId,
    ) -> Result<(), Error> {
        self.set_active(store, chain_id, true)
    }

    /// Marks the chain as not run by this node. The record itself is kept.
    pub fn deactivate<S: StateAccess + ?Sized>(
        &self,
        store: &mut S,
        chain_id: ChainId,
    ) -> Result<(), Error> {
        self.set_active(store, chain_id, false)
    }

    fn set_active<S: StateAccess + ?Sized>(
        &self,
        store: &mut S,
        chain_id: ChainId,
        active: bool,
    ) -> Result<(), Error> {
        let mut record = self.get(store, chain_id)?;
        record.active = active;
        self.put(store, &record)
    }
}

#[cfg(test)]
mod tests {
    use vellum_execution_engine::storage::InMemoryState;
    use vellum_types::testing::TestRng;

    use super::*;

    fn sample_record(rng: &mut TestRng) -> ChainRecord {
        ChainRecord {
            chain_id: ChainId::random(rng),
            chain_address: Address::random(rng),
            committee_nodes: vec!["127.0.0.1:4000".to_string(), "127.0.0.1:4001".to_string()],
            active: false,
        }
    }

    #[test]
    fn serialization_roundtrip() {
        let mut rng = TestRng::new();
        bytesrepr::test_serialization_roundtrip(&sample_record(&mut rng));
    }

    #[test]
    fn put_get_list() {
        let mut rng = TestRng::new();
        let mut store = InMemoryState::new();
        let records = ChainRecordStore::new();

        let first = sample_record(&mut rng);
        let second = sample_record(&mut rng);
        records.put(&mut store, &first).unwrap();
        records.put(&mut store, &second).unwrap();

        assert_eq!(records.get(&store, first.chain_id).unwrap(), first);

        let mut expected = vec![first, second];
        expected.sort_by_key(|record| record.chain_id);
        assert_eq!(records.list(&store).unwrap(), expected);
    }

    #[test]
    fn missing_record_is_an_error() {
        let mut rng = TestRng::new();
        let store = InMemoryState::new();
        let chain_id = ChainId::random(&mut rng);
        assert!(matches!(
            ChainRecordStore::new().get(&store, chain_id),
            Err(Error::ChainRecordNotFound(found)) if found == chain_id
        ));
    }

    #[test]
    fn activate_flips_only_the_active_flag() {
        let mut rng = TestRng::new();
        let mut store = InMemoryState::new();
        let records = ChainRecordStore::new();
        let record = sample_record(&mut rng);
        records.put(&mut store, &record).unwrap();

        records.activate(&mut store, record.chain_id).unwrap();
        let activated = records.get(&store, record.chain_id).unwrap();
        assert!(activated.active);
        assert_eq!(activated.committee_nodes, record.committee_nodes);
        assert_eq!(activated.chain_address, record.chain_address);

        records.deactivate(&mut store, record.chain_id).unwrap();
        assert!(!records.get(&store, record.chain_id).unwrap().active);

        // activating an unknown chain fails
        assert!(matches!(
            records.activate(&mut store, ChainId::random(&mut rng)),
            Err(Error::ChainRecordNotFound(_))
        ));
    }
}
