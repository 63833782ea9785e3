//! Contains serialization and deserialization code for types used throughout the system.
//!
//! Encoding is deterministic: the same value always produces the same bytes. This is a
//! consensus requirement, since encoded values are stored in chain state and hashed.

use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
    mem,
};

/// The number of bytes in a serialized `bool`.
pub const BOOL_SERIALIZED_LENGTH: usize = 1;
/// The number of bytes in a serialized `u8`.
pub const U8_SERIALIZED_LENGTH: usize = mem::size_of::<u8>();
/// The number of bytes in a serialized `u32`.
pub const U32_SERIALIZED_LENGTH: usize = mem::size_of::<u32>();
/// The number of bytes in a serialized `u64`.
pub const U64_SERIALIZED_LENGTH: usize = mem::size_of::<u64>();
/// The number of bytes in a serialized `i64`.
pub const I64_SERIALIZED_LENGTH: usize = mem::size_of::<i64>();

/// A type which can be serialized to a `Vec<u8>`.
pub trait ToBytes {
    /// Serializes `&self` to a `Vec<u8>`.
    fn to_bytes(&self) -> Result<Vec<u8>, Error>;

    /// Consumes `self` and serializes to a `Vec<u8>`.
    fn into_bytes(self) -> Result<Vec<u8>, Error>
    where
        Self: Sized,
    {
        self.to_bytes()
    }

    /// Returns the length of the `Vec<u8>` which would be returned from a successful call to
    /// `to_bytes()` or `into_bytes()`. The data is not actually serialized, so this call is
    /// relatively cheap.
    fn serialized_length(&self) -> usize;

    /// Writes `&self` into a mutable `writer`.
    fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), Error> {
        writer.extend(self.to_bytes()?);
        Ok(())
    }
}

/// A type which can be deserialized from a `Vec<u8>`.
pub trait FromBytes: Sized {
    /// Deserializes the slice into `Self`, returning the unused remainder.
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error>;

    /// Deserializes the `Vec<u8>` into `Self`, returning the unused remainder.
    fn from_vec(bytes: Vec<u8>) -> Result<(Self, Vec<u8>), Error> {
        Self::from_bytes(bytes.as_slice()).map(|(x, remainder)| (x, Vec::from(remainder)))
    }
}

/// Returns a `Vec<u8>` initialized with sufficient capacity to hold `to_be_serialized` after
/// serialization.
pub fn allocate_buffer<T: ToBytes>(to_be_serialized: &T) -> Result<Vec<u8>, Error> {
    Ok(Vec::with_capacity(to_be_serialized.serialized_length()))
}

/// Serialization and deserialization errors.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
#[repr(u8)]
#[non_exhaustive]
pub enum Error {
    /// Early end of stream while deserializing.
    EarlyEndOfStream = 0,
    /// Formatting error while deserializing.
    Formatting,
    /// Not all input bytes were consumed.
    LeftOverBytes,
    /// Out of memory error.
    OutOfMemory,
}

impl Display for Error {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Error::EarlyEndOfStream => {
                formatter.write_str("Deserialization error: early end of stream")
            }
            Error::Formatting => formatter.write_str("Deserialization error: formatting"),
            Error::LeftOverBytes => formatter.write_str("Deserialization error: left-over bytes"),
            Error::OutOfMemory => formatter.write_str("Serialization error: out of memory"),
        }
    }
}

impl std::error::Error for Error {}

/// Serializes `t` into a `Vec<u8>`.
pub fn serialize(t: impl ToBytes) -> Result<Vec<u8>, Error> {
    t.into_bytes()
}

/// Deserializes `bytes` into an instance of `T`.
///
/// Returns an error if the bytes cannot be deserialized into `T` or if not all of the input
/// bytes are consumed in the operation.
pub fn deserialize<T: FromBytes>(bytes: &[u8]) -> Result<T, Error> {
    let (t, remainder) = T::from_bytes(bytes)?;
    if remainder.is_empty() {
        Ok(t)
    } else {
        Err(Error::LeftOverBytes)
    }
}

fn safe_split_at(bytes: &[u8], n: usize) -> Result<(&[u8], &[u8]), Error> {
    if n > bytes.len() {
        Err(Error::EarlyEndOfStream)
    } else {
        Ok(bytes.split_at(n))
    }
}

impl ToBytes for bool {
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        u8::from(*self).to_bytes()
    }

    fn serialized_length(&self) -> usize {
        BOOL_SERIALIZED_LENGTH
    }
}

impl FromBytes for bool {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error> {
        match bytes.split_first() {
            None => Err(Error::EarlyEndOfStream),
            Some((byte, rem)) => match byte {
                0 => Ok((false, rem)),
                1 => Ok((true, rem)),
                _ => Err(Error::Formatting),
            },
        }
    }
}

impl ToBytes for u8 {
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(vec![*self])
    }

    fn serialized_length(&self) -> usize {
        U8_SERIALIZED_LENGTH
    }

    fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), Error> {
        writer.push(*self);
        Ok(())
    }
}

impl FromBytes for u8 {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error> {
        match bytes.split_first() {
            None => Err(Error::EarlyEndOfStream),
            Some((byte, rem)) => Ok((*byte, rem)),
        }
    }
}

macro_rules! impl_bytesrepr_for_le_int {
    ($type:ty, $length:expr) => {
        impl ToBytes for $type {
            fn to_bytes(&self) -> Result<Vec<u8>, Error> {
                Ok(self.to_le_bytes().to_vec())
            }

            fn serialized_length(&self) -> usize {
                $length
            }

            fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), Error> {
                writer.extend_from_slice(&self.to_le_bytes());
                Ok(())
            }
        }

        impl FromBytes for $type {
            fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error> {
                let (le_bytes, remainder) = safe_split_at(bytes, $length)?;
                let mut buffer = [0u8; $length];
                buffer.copy_from_slice(le_bytes);
                Ok((<$type>::from_le_bytes(buffer), remainder))
            }
        }
    };
}

impl_bytesrepr_for_le_int!(u32, U32_SERIALIZED_LENGTH);
impl_bytesrepr_for_le_int!(u64, U64_SERIALIZED_LENGTH);
impl_bytesrepr_for_le_int!(i64, I64_SERIALIZED_LENGTH);

impl<const COUNT: usize> ToBytes for [u8; COUNT] {
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(self.to_vec())
    }

    fn serialized_length(&self) -> usize {
        COUNT
    }

    fn write_bytes(&self, writer: &mut Vec<u8>) -> Result<(), Error> {
        writer.extend_from_slice(self);
        Ok(())
    }
}

impl<const COUNT: usize> FromBytes for [u8; COUNT] {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (data, remainder) = safe_split_at(bytes, COUNT)?;
        let mut result = [0u8; COUNT];
        result.copy_from_slice(data);
        Ok((result, remainder))
    }
}

fn u8_slice_to_bytes(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    let serialized_length = u8_slice_serialized_length(bytes);
    let mut vec = Vec::with_capacity(serialized_length);
    let length_32: u32 = bytes.len().try_into().map_err(|_| Error::OutOfMemory)?;
    vec.extend_from_slice(&length_32.to_le_bytes());
    vec.extend_from_slice(bytes);
    Ok(vec)
}

fn u8_slice_serialized_length(bytes: &[u8]) -> usize {
    U32_SERIALIZED_LENGTH + bytes.len()
}

impl ToBytes for str {
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        u8_slice_to_bytes(self.as_bytes())
    }

    fn serialized_length(&self) -> usize {
        u8_slice_serialized_length(self.as_bytes())
    }
}

impl ToBytes for String {
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        self.as_str().to_bytes()
    }

    fn serialized_length(&self) -> usize {
        self.as_str().serialized_length()
    }
}

impl FromBytes for String {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (str_bytes, remainder) = Vec::<u8>::from_bytes(bytes)?;
        let result = String::from_utf8(str_bytes).map_err(|_| Error::Formatting)?;
        Ok((result, remainder))
    }
}

impl<T: ToBytes> ToBytes for Vec<T> {
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut result = allocate_buffer(self)?;
        let length_32: u32 = self.len().try_into().map_err(|_| Error::OutOfMemory)?;
        result.extend_from_slice(&length_32.to_le_bytes());
        for item in self.iter() {
            item.write_bytes(&mut result)?;
        }
        Ok(result)
    }

    fn serialized_length(&self) -> usize {
        U32_SERIALIZED_LENGTH + self.iter().map(ToBytes::serialized_length).sum::<usize>()
    }
}

impl<T: FromBytes> FromBytes for Vec<T> {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (count, mut stream) = u32::from_bytes(bytes)?;
        // the reservation is bounded by the remaining stream length, not by the length
        // prefix, so a hostile prefix cannot drive the allocation
        let mut result = Vec::with_capacity((count as usize).min(stream.len()));
        for _ in 0..count {
            let (value, remainder) = T::from_bytes(stream)?;
            result.push(value);
            stream = remainder;
        }
        Ok((result, stream))
    }
}

impl<T: ToBytes> ToBytes for Option<T> {
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        match self {
            None => Ok(vec![0]),
            Some(v) => {
                let mut result = allocate_buffer(self)?;
                result.push(1);
                v.write_bytes(&mut result)?;
                Ok(result)
            }
        }
    }

    fn serialized_length(&self) -> usize {
        U8_SERIALIZED_LENGTH
            + match self {
                None => 0,
                Some(v) => v.serialized_length(),
            }
    }
}

impl<T: FromBytes> FromBytes for Option<T> {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (tag, rem) = u8::from_bytes(bytes)?;
        match tag {
            0 => Ok((None, rem)),
            1 => {
                let (t, rem) = T::from_bytes(rem)?;
                Ok((Some(t), rem))
            }
            _ => Err(Error::Formatting),
        }
    }
}

impl<K, V> ToBytes for BTreeMap<K, V>
where
    K: ToBytes,
    V: ToBytes,
{
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut result = allocate_buffer(self)?;
        let num_keys: u32 = self.len().try_into().map_err(|_| Error::OutOfMemory)?;
        result.extend_from_slice(&num_keys.to_le_bytes());
        for (key, value) in self.iter() {
            key.write_bytes(&mut result)?;
            value.write_bytes(&mut result)?;
        }
        Ok(result)
    }

    fn serialized_length(&self) -> usize {
        U32_SERIALIZED_LENGTH
            + self
                .iter()
                .map(|(key, value)| key.serialized_length() + value.serialized_length())
                .sum::<usize>()
    }
}

impl<K, V> FromBytes for BTreeMap<K, V>
where
    K: FromBytes + Ord,
    V: FromBytes,
{
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error> {
        let (num_keys, mut stream) = u32::from_bytes(bytes)?;
        let mut result = BTreeMap::new();
        for _ in 0..num_keys {
            let (key, remainder) = K::from_bytes(stream)?;
            let (value, remainder) = V::from_bytes(remainder)?;
            result.insert(key, value);
            stream = remainder;
        }
        Ok((result, stream))
    }
}

impl ToBytes for () {
    fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(Vec::new())
    }

    fn serialized_length(&self) -> usize {
        0
    }
}

impl FromBytes for () {
    fn from_bytes(bytes: &[u8]) -> Result<(Self, &[u8]), Error> {
        Ok(((), bytes))
    }
}

/// Asserts that `t` can be serialized and when deserialized back into an instance `T` compares
/// equal to `t`, and that `serialized_length` matches the actual number of bytes produced.
#[cfg(any(feature = "testing", test))]
#[track_caller]
pub fn test_serialization_roundtrip<T>(t: &T)
where
    T: ToBytes + FromBytes + PartialEq + std::fmt::Debug,
{
    let serialized = ToBytes::to_bytes(t).expect("should serialize");
    assert_eq!(
        serialized.len(),
        t.serialized_length(),
        "serialized_length of {:?} should be {} not {}",
        t,
        serialized.len(),
        t.serialized_length()
    );
    let deserialized = deserialize::<T>(&serialized).expect("should deserialize");
    assert_eq!(*t, deserialized);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_roundtrip_scalars() {
        test_serialization_roundtrip(&0u8);
        test_serialization_roundtrip(&u8::MAX);
        test_serialization_roundtrip(&17u32);
        test_serialization_roundtrip(&u64::MAX);
        test_serialization_roundtrip(&-1i64);
        test_serialization_roundtrip(&i64::MIN);
        test_serialization_roundtrip(&true);
        test_serialization_roundtrip(&false);
    }

    #[test]
    fn should_roundtrip_strings_and_vecs() {
        test_serialization_roundtrip(&String::new());
        test_serialization_roundtrip(&String::from("hello, world"));
        test_serialization_roundtrip(&Vec::<u8>::new());
        test_serialization_roundtrip(&vec![1u8, 2, 3, 255]);
        test_serialization_roundtrip(&vec![String::from("a"), String::from("b")]);
    }

    #[test]
    fn should_roundtrip_option_and_map() {
        test_serialization_roundtrip(&Option::<u64>::None);
        test_serialization_roundtrip(&Some(42u64));
        let mut map = BTreeMap::new();
        map.insert(String::from("x"), vec![1u8, 2]);
        map.insert(String::from("y"), Vec::new());
        test_serialization_roundtrip(&map);
    }

    #[test]
    fn should_fail_on_early_end_of_stream() {
        assert_eq!(u32::from_bytes(&[1, 2]), Err(Error::EarlyEndOfStream));
        let truncated_string = 10u32.to_le_bytes();
        assert_eq!(
            String::from_bytes(&truncated_string),
            Err(Error::EarlyEndOfStream)
        );
    }

    #[test]
    fn should_fail_on_left_over_bytes() {
        let mut serialized = 1u32.to_bytes().unwrap();
        serialized.push(0xff);
        assert_eq!(deserialize::<u32>(&serialized), Err(Error::LeftOverBytes));
    }

    #[test]
    fn should_not_allocate_for_hostile_length_prefix() {
        // a length prefix claiming u32::MAX elements over a 2-byte stream must fail on the
        // first missing element rather than reserve space for the claimed count
        let mut serialized = u32::MAX.to_le_bytes().to_vec();
        serialized.extend_from_slice(&[1, 2]);
        assert_eq!(
            Vec::<u64>::from_bytes(&serialized),
            Err(Error::EarlyEndOfStream)
        );
        assert_eq!(
            Vec::<String>::from_bytes(&serialized),
            Err(Error::EarlyEndOfStream)
        );
    }

    #[test]
    fn should_fail_on_invalid_utf8() {
        let serialized = vec![0xffu8, 0xfe].to_bytes().unwrap();
        assert_eq!(String::from_bytes(&serialized), Err(Error::Formatting));
    }

    #[test]
    fn should_fail_on_invalid_bool_and_option_tags() {
        assert_eq!(bool::from_bytes(&[2]), Err(Error::Formatting));
        assert_eq!(Option::<u8>::from_bytes(&[3, 0]), Err(Error::Formatting));
    }
}
