//! Fixed-length opaque identifiers used in chain state.

use std::fmt::{self, Debug, Display, Formatter};

use serde::{de::Error as SerdeError, Deserialize, Deserializer, Serialize, Serializer};

use crate::bytesrepr::{self, FromBytes, ToBytes};

/// The number of bytes in each of the fixed-length identifier types.
pub const IDENTIFIER_LENGTH: usize = 32;

macro_rules! impl_identifier {
    ($type:ident, $name:expr) => {
        impl $type {
            #[doc = concat!("Constructs a new `", $name, "` from the raw bytes.")]
            pub const fn new(value: [u8; IDENTIFIER_LENGTH]) -> $type {
                $type(value)
            }

            /// Returns the raw bytes of the identifier.
            pub fn value(&self) -> [u8; IDENTIFIER_LENGTH] {
                self.0
            }

            /// Returns a random instance using the given RNG; used in tests.
            #[cfg(any(feature = "testing", test))]
            pub fn random(rng: &mut crate::testing::TestRng) -> Self {
                use rand::RngCore;
                let mut bytes = [0u8; IDENTIFIER_LENGTH];
                rng.fill_bytes(&mut bytes);
                $type(bytes)
            }
        }

        impl AsRef<[u8]> for $type {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl From<[u8; IDENTIFIER_LENGTH]> for $type {
            fn from(bytes: [u8; IDENTIFIER_LENGTH]) -> Self {
                $type(bytes)
            }
        }

        impl Display for $type {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, "{}", base16::encode_lower(&self.0))
            }
        }

        impl Debug for $type {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                write!(f, concat!($name, "({})"), base16::encode_lower(&self.0))
            }
        }

        impl ToBytes for $type {
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

        impl FromBytes for $type {
            fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), bytesrepr::Error> {
                let (bytes, remainder) = FromBytes::from_bytes(bytes)?;
                Ok(($type(bytes), remainder))
            }
        }

        impl Serialize for $type {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    base16::encode_lower(&self.0).serialize(serializer)
                } else {
                    self.0.serialize(serializer)
                }
            }
        }

        impl<'de> Deserialize<'de> for $type {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                if deserializer.is_human_readable() {
                    let hex_string = String::deserialize(deserializer)?;
                    let vec = base16::decode(&hex_string).map_err(SerdeError::custom)?;
                    let bytes = <[u8; IDENTIFIER_LENGTH]>::try_from(vec.as_slice())
                        .map_err(SerdeError::custom)?;
                    Ok($type(bytes))
                } else {
                    <[u8; IDENTIFIER_LENGTH]>::deserialize(deserializer).map($type)
                }
            }
        }
    };
}

/// Identifier of a chain: an independently governed instance of contract state on the ledger.
#[derive(Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct ChainId([u8; IDENTIFIER_LENGTH]);

impl_identifier!(ChainId, "ChainId");

/// An address on the ledger, outside of any chain.
#[derive(Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Address([u8; IDENTIFIER_LENGTH]);

impl_identifier!(Address, "Address");

/// An asset color tag. Fees and token transfers are denominated in a color.
#[derive(Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Color([u8; IDENTIFIER_LENGTH]);

impl_identifier!(Color, "Color");

impl Color {
    /// The color of the ledger's native token.
    pub const NATIVE: Color = Color([0; IDENTIFIER_LENGTH]);
}

/// Identifier of a contract's code, e.g. the hash of its program binary.
#[derive(Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct ProgramHash([u8; IDENTIFIER_LENGTH]);

impl_identifier!(ProgramHash, "ProgramHash");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestRng;

    #[test]
    fn serialization_roundtrip() {
        let mut rng = TestRng::new();
        bytesrepr::test_serialization_roundtrip(&ChainId::random(&mut rng));
        bytesrepr::test_serialization_roundtrip(&Address::random(&mut rng));
        bytesrepr::test_serialization_roundtrip(&Color::random(&mut rng));
        bytesrepr::test_serialization_roundtrip(&ProgramHash::random(&mut rng));
    }

    #[test]
    fn native_color_is_all_zeros() {
        assert_eq!(Color::NATIVE.value(), [0; IDENTIFIER_LENGTH]);
    }

    #[test]
    fn json_roundtrip_is_hex() {
        let mut rng = TestRng::new();
        let address = Address::random(&mut rng);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address));
        let decoded: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, address);
    }
}
