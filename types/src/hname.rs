//! Short deterministic contract identifiers.

use std::fmt::{self, Debug, Display, Formatter};

use blake2::{
    digest::{Update, VariableOutput},
    VarBlake2b,
};
use serde::{Deserialize, Serialize};

use crate::bytesrepr::{self, FromBytes, ToBytes, U32_SERIALIZED_LENGTH};

/// The number of bytes in a serialized [`Hname`].
pub const HNAME_SERIALIZED_LENGTH: usize = U32_SERIALIZED_LENGTH;

/// Deterministic short identifier of a contract, derived from its name.
///
/// Used as the contract's key in the chain's contract registry. The value `0` is reserved as
/// the nil identifier and is never produced by derivation.
#[derive(Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hname(u32);

impl Hname {
    /// The nil identifier.
    pub const NIL: Hname = Hname(0);

    /// Constructs a new `Hname` from a raw value.
    pub const fn new(value: u32) -> Hname {
        Hname(value)
    }

    /// Derives the `Hname` for a contract `name`: the first four bytes (little-endian) of the
    /// Blake2b-256 digest of the name. A zero result is remapped so that `0` stays reserved.
    pub fn from_name(name: &str) -> Hname {
        let mut digest = [0u8; 32];
        let mut hasher = VarBlake2b::new(32).expect("should create hasher");
        hasher.update(name.as_bytes());
        hasher.finalize_variable(|slice| {
            digest.copy_from_slice(slice);
        });
        let mut value = u32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]]);
        if value == 0 {
            value = u32::MAX;
        }
        Hname(value)
    }

    /// Returns the raw value.
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Returns the identifier's bytes as stored in registry map keys.
    pub fn to_bytes_fixed(&self) -> [u8; HNAME_SERIALIZED_LENGTH] {
        self.0.to_le_bytes()
    }
}

impl Display for Hname {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

impl Debug for Hname {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Hname({:08x})", self.0)
    }
}

impl From<u32> for Hname {
    fn from(value: u32) -> Self {
        Hname(value)
    }
}

impl ToBytes for Hname {
    fn to_bytes(&self) -> Result<Vec<u8>, bytesrepr::Error> {
        self.0.to_bytes()
    }

    fn serialized_length(&self) -> usize {
        self.0.serialized_length()
    }

    fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), bytesrepr::Error> {
        self.0.write_bytes(writer)
    }
}

impl FromBytes for Hname {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), bytesrepr::Error> {
        let (value, remainder) = u32::from_bytes(bytes)?;
        Ok((Hname(value), remainder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_stable() {
        let first = Hname::from_name("alpha");
        let second = Hname::from_name("alpha");
        assert_eq!(first, second);
        assert_ne!(first, Hname::from_name("beta"));
    }

    #[test]
    fn derivation_never_yields_nil() {
        for name in ["", "root", "alpha", "beta", "some much longer contract name"] {
            assert_ne!(Hname::from_name(name), Hname::NIL);
        }
    }

    #[test]
    fn serialization_roundtrip() {
        bytesrepr::test_serialization_roundtrip(&Hname::from_name("alpha"));
        bytesrepr::test_serialization_roundtrip(&Hname::NIL);
        bytesrepr::test_serialization_roundtrip(&Hname::new(u32::MAX));
    }

    #[test]
    fn registry_key_bytes_match_codec() {
        let hname = Hname::from_name("alpha");
        assert_eq!(
            hname.to_bytes_fixed().to_vec(),
            hname.to_bytes().expect("should serialize")
        );
    }
}
