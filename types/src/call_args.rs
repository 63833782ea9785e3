//! Named arguments passed to contract entry points.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bytesrepr::{self, FromBytes, ToBytes};

/// Named arguments to a contract call: an ordered map from argument name to the argument's
/// serialized value.
#[derive(Clone, Default, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallArgs(BTreeMap<String, Vec<u8>>);

impl CallArgs {
    /// Creates an empty `CallArgs`.
    pub fn new() -> CallArgs {
        CallArgs::default()
    }

    /// Serializes `value` and inserts it under `name`, overwriting any previous value.
    pub fn insert<T: ToBytes>(&mut self, name: &str, value: T) -> Result<(), bytesrepr::Error> {
        self.0.insert(name.to_string(), value.into_bytes()?);
        Ok(())
    }

    /// Inserts already-serialized bytes under `name`.
    pub fn insert_raw(&mut self, name: &str, value: Vec<u8>) {
        self.0.insert(name.to_string(), value);
    }

    /// Returns the raw bytes stored under `name`, if present.
    pub fn get_raw(&self, name: &str) -> Option<&[u8]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Deserializes the value stored under `name`, or `None` if absent.
    pub fn get<T: FromBytes>(&self, name: &str) -> Result<Option<T>, bytesrepr::Error> {
        match self.0.get(name) {
            None => Ok(None),
            Some(bytes) => bytesrepr::deserialize(bytes).map(Some),
        }
    }

    /// Returns the number of arguments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no arguments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ToBytes for CallArgs {
    fn to_bytes(&self) -> Result<Vec<u8>, bytesrepr::Error> {
        self.0.to_bytes()
    }

    fn serialized_length(&self) -> usize {
        self.0.serialized_length()
    }
}

impl FromBytes for CallArgs {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), bytesrepr::Error> {
        let (map, remainder) = BTreeMap::from_bytes(bytes)?;
        Ok((CallArgs(map), remainder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get_typed_values() {
        let mut args = CallArgs::new();
        args.insert("owner_fee", 500i64).unwrap();
        args.insert("description", String::from("test chain")).unwrap();

        assert_eq!(args.get::<i64>("owner_fee").unwrap(), Some(500));
        assert_eq!(
            args.get::<String>("description").unwrap(),
            Some(String::from("test chain"))
        );
        assert_eq!(args.get::<i64>("missing").unwrap(), None);
    }

    #[test]
    fn get_with_wrong_type_fails() {
        let mut args = CallArgs::new();
        args.insert("flag", true).unwrap();
        assert!(args.get::<i64>("flag").is_err());
    }

    #[test]
    fn serialization_roundtrip() {
        let mut args = CallArgs::new();
        args.insert("a", 1u64).unwrap();
        args.insert("b", String::from("two")).unwrap();
        bytesrepr::test_serialization_roundtrip(&args);
        bytesrepr::test_serialization_roundtrip(&CallArgs::new());
    }
}
