//! Fixed-width byte strings written without a length prefix
//!
//! A plain `[u8; N]` is written like a byte sequence, with a ULEB128(`N`)
//! prefix (see [`seq`](crate::seq)). The types in this module are the
//! explicit opt-out: their width is implied by the type, so only the raw
//! bytes go on the wire.
//!
//! * [`FixedBytes<N>`] is the general-purpose raw byte string.
//! * [`Address`] is the 32-byte account/object address of the target chain.
//!
//! The distinction is made by type identity alone; nothing inspects the width
//! of an array to decide whether it is prefixed.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde_impls")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::conv::error::EncodeResult;
use crate::conv::{target::Target, Decode, Encode};
use crate::error::{AddressParseError, HexConvError, WidthError};
use crate::parse::{ParseResult, Parser};

/// Simple type for holding fixed-length binary sequences.
///
/// While `FixedBytes<N>` is naturally implemented around `[u8; N]`, it is
/// serialized differently: as exactly `N` raw bytes, with no length prefix.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FixedBytes<const N: usize>([u8; N]);

impl<const N: usize> FixedBytes<N> {
    /// Constructs a [`FixedBytes<N>`] from a byte-array of length `N`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bcs_model::FixedBytes;
    /// assert_eq!(FixedBytes::from_array([1, 2, 3u8]).bytes(), &[1, 2, 3u8]);
    /// ```
    #[inline(always)]
    #[must_use]
    pub const fn from_array(arr: [u8; N]) -> FixedBytes<N> {
        Self(arr)
    }

    /// Returns an immutable reference to the raw bytes of this [`FixedBytes<N>`].
    #[inline]
    #[must_use]
    pub const fn bytes(&self) -> &[u8; N] {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn bytes_mut(&mut self) -> &mut [u8; N] {
        &mut self.0
    }

    /// Attempts to construct a [`FixedBytes<N>`] by copying the bytes of a
    /// byte-slice whose length is presumptively equal to `N`.
    ///
    /// # Errors
    ///
    /// Returns [`WidthError::WrongWidth`] if `bytes.len() != N`.
    pub fn try_from_slice(bytes: &[u8]) -> Result<FixedBytes<N>, WidthError> {
        <[u8; N]>::try_from(bytes)
            .map(Self)
            .map_err(|_| WidthError::WrongWidth {
                exact: N,
                actual: bytes.len(),
            })
    }

    /// Returns the length, in bytes, of this [`FixedBytes<N>`], which is always `N`.
    #[inline(always)]
    #[must_use]
    pub const fn len(&self) -> usize {
        N
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    #[inline(always)]
    #[must_use]
    pub const fn to_array(self) -> [u8; N] {
        self.0
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl<const N: usize> fmt::Debug for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedBytes<{}>({:x})", N, self)
    }
}

impl<const N: usize> fmt::LowerHex for FixedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

impl<const N: usize> Default for FixedBytes<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBytes<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Borrow<[u8; N]> for FixedBytes<N> {
    fn borrow(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for FixedBytes<N> {
    fn from(value: [u8; N]) -> Self {
        Self(value)
    }
}

impl<const N: usize> From<FixedBytes<N>> for [u8; N] {
    fn from(bytes: FixedBytes<N>) -> Self {
        bytes.0
    }
}

impl<const N: usize> From<FixedBytes<N>> for Vec<u8> {
    fn from(bytes: FixedBytes<N>) -> Self {
        bytes.0.into()
    }
}

impl<const N: usize> TryFrom<&[u8]> for FixedBytes<N> {
    type Error = WidthError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_slice(value)
    }
}

impl<const N: usize> Encode for FixedBytes<N> {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        Ok(buf.push_many(self.0) + buf.resolve_zero())
    }
}

impl<const N: usize> Decode for FixedBytes<N> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.consume_arr::<N>().map(Self)
    }
}

/// Byte-width of an [`Address`].
pub const ADDRESS_LENGTH: usize = 32;

/// Account or object address.
///
/// Serialized as exactly [`ADDRESS_LENGTH`] raw bytes. The textual form is
/// `0x`-prefixed lowercase hex; parsing also accepts short forms such as
/// `0x2`, which are left-padded with zeros.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Address(FixedBytes<ADDRESS_LENGTH>);

impl Address {
    pub const ZERO: Self = Self(FixedBytes::from_array([0; ADDRESS_LENGTH]));

    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(FixedBytes::from_array(bytes))
    }

    #[must_use]
    pub const fn bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        self.0.bytes()
    }

    /// Parses an address from hex, with or without a `0x` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`WidthError::TooWide`] for more than 64 hex digits, or a
    /// [`HexConvError`] for non-hex characters.
    pub fn from_hex(s: &str) -> Result<Self, AddressParseError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() > 2 * ADDRESS_LENGTH {
            return Err(WidthError::TooWide {
                limit: ADDRESS_LENGTH,
                actual: (digits.len() + 1) / 2,
            }
            .into());
        }
        let padded = format!("{:0>width$}", digits, width = 2 * ADDRESS_LENGTH);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes).map_err(|_| HexConvError::NonHex(s.to_owned()))?;
        Ok(Self::new(bytes))
    }

    /// Returns the full-width `0x`-prefixed hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{:x}", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{:x})", self.0)
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self::new(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl Encode for Address {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        self.0.write_to(buf)
    }
}

impl Decode for Address {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        FixedBytes::parse(p).map(Self)
    }
}

#[cfg(feature = "serde_impls")]
impl<const N: usize> Serialize for FixedBytes<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

#[cfg(feature = "serde_impls")]
impl<'de, const N: usize> Deserialize<'de> for FixedBytes<N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = Vec::<u8>::deserialize(deserializer)?;
        Self::try_from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde_impls")]
impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[cfg(feature = "serde_impls")]
impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn fixed_bytes_are_raw() {
        let data = FixedBytes::from_array([0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(data.to_bytes(), Ok(vec![0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(FixedBytes::<4>::try_decode(&[0xde, 0xad, 0xbe, 0xef]), Ok(data));
        assert_eq!(format!("{:x}", data), "deadbeef");
    }

    #[test]
    fn try_from_slice_checks_width() {
        assert_eq!(
            FixedBytes::<4>::try_from_slice(&[1, 2, 3]),
            Err(WidthError::WrongWidth { exact: 4, actual: 3 })
        );
    }

    #[test]
    fn address_differs_from_byte_array_by_prefix() {
        let raw = [0x11u8; ADDRESS_LENGTH];
        let as_address = Address::new(raw).to_bytes().unwrap();
        let as_array = raw.to_bytes().unwrap();
        assert_eq!(as_address.len(), 32);
        assert_eq!(as_array.len(), 33);
        assert_eq!(as_array[0], 0x20);
        assert_eq!(&as_array[1..], as_address.as_slice());
    }

    #[test]
    fn address_hex_forms() {
        let two = Address::from_hex("0x2").unwrap();
        let mut expected = [0u8; ADDRESS_LENGTH];
        expected[31] = 2;
        assert_eq!(two, Address::new(expected));
        assert_eq!(
            two.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
        assert_eq!(two.to_hex().parse::<Address>(), Ok(two));
        assert_eq!("0X2".parse::<Address>(), Ok(two));
        assert_eq!(Address::from_hex("0xABcd").unwrap().bytes()[30..], [0xab, 0xcd]);
    }

    #[test]
    fn address_hex_errors() {
        assert!(matches!(
            Address::from_hex("0xg1"),
            Err(AddressParseError::Hex(HexConvError::NonHex(_)))
        ));
        assert!(matches!(
            Address::from_hex("0x\u{e9}"),
            Err(AddressParseError::Hex(HexConvError::NonHex(_)))
        ));
        let long = format!("0x{}", "1".repeat(66));
        assert_eq!(
            Address::from_hex(&long),
            Err(AddressParseError::Width(WidthError::TooWide { limit: 32, actual: 33 }))
        );
    }

    #[cfg(feature = "serde_impls")]
    #[test]
    fn address_json_is_hex() {
        let addr = Address::from_hex("0x2").unwrap();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr.to_hex()));
        assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), addr);
    }
}
