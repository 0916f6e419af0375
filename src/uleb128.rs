//! Unsigned LEB128 variable-length integers
//!
//! Every length prefix and variant index in the canonical format is written as
//! an unsigned little-endian base-128 integer: seven payload bits per byte,
//! least-significant group first, with the high bit of every byte but the last
//! set.
//!
//! Encodings are always minimal. Decoding rejects both overlong encodings
//! (a redundant trailing zero group) and values that do not fit into the
//! requested integer width, so that every accepted input re-encodes to
//! exactly the same bytes.

use crate::conv::{error::EncodeResult, target::Target, Decode, Encode};
use crate::parse::{ParseError, ParseResult, Parser, SliceParser};

/// Maximum number of bytes in the ULEB128 encoding of a `u64`.
pub const MAX_LEN: usize = 10;

/// Appends the minimal ULEB128 encoding of `value`, returning the number of
/// bytes written.
pub fn write<U: Target>(buf: &mut U, mut value: u64) -> usize {
    let mut n = 0;
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            return n + buf.push_one(byte);
        }
        n += buf.push_one(byte | 0x80);
    }
}

/// Returns the minimal ULEB128 encoding of `value` as a fresh vector.
#[must_use]
pub fn to_vec(value: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(MAX_LEN);
    write(&mut buf, value);
    buf
}

/// Number of bytes in the ULEB128 encoding of `value`.
#[must_use]
pub const fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    if bits == 0 {
        1
    } else {
        (bits + 6) / 7
    }
}

/// Consumes a ULEB128 value of at most 64 bits.
///
/// # Errors
///
/// * [`ParseError::Truncated`] if the input ends before a terminating byte
/// * [`ParseError::Uleb128Overflow`] if the value exceeds 64 bits
/// * [`ParseError::NonCanonicalUleb128`] if the encoding is not minimal
pub fn read<P: Parser>(p: &mut P) -> ParseResult<u64> {
    let offset = p.offset();
    let mut value: u64 = 0;
    for ix in 0..MAX_LEN {
        let byte = p.consume_byte()?;
        let group = u64::from(byte & 0x7f);
        let shift = 7 * ix as u32;
        // only one payload bit of the tenth byte fits into 64 bits
        if shift == 63 && group > 1 {
            return Err(ParseError::Uleb128Overflow { offset, width: 64 });
        }
        value |= group << shift;
        if byte & 0x80 == 0 {
            if byte == 0 && ix > 0 {
                return Err(ParseError::NonCanonicalUleb128 { offset });
            }
            return Ok(value);
        }
    }
    Err(ParseError::Uleb128Overflow { offset, width: 64 })
}

/// Consumes a ULEB128 value and narrows it to the integer type `T`.
///
/// # Errors
///
/// In addition to the errors of [`read`], returns
/// [`ParseError::Uleb128Overflow`] when the value does not fit into `T`.
pub fn read_as<T, P>(p: &mut P) -> ParseResult<T>
where
    T: TryFrom<u64>,
    P: Parser,
{
    let offset = p.offset();
    let value = read(p)?;
    T::try_from(value).map_err(|_| ParseError::Uleb128Overflow {
        offset,
        width: (std::mem::size_of::<T>() * 8) as u32,
    })
}

/// Decodes a ULEB128 value from the front of `bytes`, returning it along with
/// the number of bytes it occupied.
pub fn from_slice(bytes: &[u8]) -> ParseResult<(u64, usize)> {
    let mut p = SliceParser::new(bytes);
    let value = read(&mut p)?;
    Ok((value, p.offset()))
}

/// Integer that is serialized as ULEB128 rather than fixed-width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Uleb128(pub u64);

impl Uleb128 {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn into_inner(self) -> u64 {
        self.0
    }
}

impl From<u64> for Uleb128 {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Uleb128> for u64 {
    fn from(value: Uleb128) -> Self {
        value.0
    }
}

impl Encode for Uleb128 {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        Ok(write(buf, self.0) + buf.resolve_zero())
    }
}

impl Decode for Uleb128 {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        read(p).map(Self)
    }
}
