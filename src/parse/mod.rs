//! Custom parsing model with byte-level precision
//!
//! This module provides the fundamental definitions related to the task of
//! processing a raw sequence of canonical bytes into the leaf values of an
//! arbitrarily nested type.
//!
//! For type-aware parsing, see the [`Decode`](crate::Decode) trait, which is a
//! high-level interface built almost entirely around the definitions contained
//! within this module.
//!
//! # Model
//!
//!  * The parser is constructed over an immutable byte-buffer.
//!  * All parsing is non-backtracking and zero-lookahead; a byte can only be
//!    viewed by consuming it, after every preceding byte has been consumed.
//!  * A failed [`consume`](Parser::consume) or
//!    [`consume_arr`](Parser::consume_arr) leaves the offset unchanged. Reads
//!    composed of several steps, such as ULEB128 values, may have consumed
//!    some bytes before failing.

pub mod error;

pub use error::{ParseError, ParseResult};

use crate::uleb128;

/// Abstraction over a stateful parse-object reading canonical bytes.
///
/// Implementors provide [`consume_byte`](Parser::consume_byte),
/// [`consume`](Parser::consume), [`offset`](Parser::offset) and
/// [`view_len`](Parser::view_len); every `take_*` method is derived from them.
///
/// All fixed-width numeric `take_*` methods are little-endian.
pub trait Parser {
    /// Total number of bytes in the buffer being parsed.
    fn view_len(&self) -> usize;

    /// Number of bytes consumed so far.
    fn offset(&self) -> usize;

    /// Number of bytes that can still be consumed.
    fn remainder(&self) -> usize {
        self.view_len() - self.offset()
    }

    /// Consumes and returns a single byte.
    fn consume_byte(&mut self) -> ParseResult<u8>;

    /// Attempts to consume and return a slice of exactly `nbytes` bytes.
    ///
    /// # Invariants
    ///
    /// Returns `Ok(s)` only when `s.len() == nbytes`; on `Err(_)`, no bytes
    /// have been consumed.
    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]>;

    /// Consumes `N` bytes and returns them in array-form
    fn consume_arr<const N: usize>(&mut self) -> ParseResult<[u8; N]> {
        let offset = self.offset();
        let slice = self.consume(N)?;
        <[u8; N]>::try_from(slice).map_err(|_| ParseError::LengthMismatch {
            expected: N,
            actual: slice.len(),
            offset,
        })
    }

    #[inline]
    fn take_u8(&mut self) -> ParseResult<u8> {
        self.consume_byte()
    }

    #[inline]
    fn take_i8(&mut self) -> ParseResult<i8> {
        Ok(self.consume_byte()? as i8)
    }

    #[inline]
    fn take_u16(&mut self) -> ParseResult<u16> {
        self.consume_arr::<2>().map(u16::from_le_bytes)
    }

    #[inline]
    fn take_i16(&mut self) -> ParseResult<i16> {
        self.consume_arr::<2>().map(i16::from_le_bytes)
    }

    #[inline]
    fn take_u32(&mut self) -> ParseResult<u32> {
        self.consume_arr::<4>().map(u32::from_le_bytes)
    }

    #[inline]
    fn take_i32(&mut self) -> ParseResult<i32> {
        self.consume_arr::<4>().map(i32::from_le_bytes)
    }

    #[inline]
    fn take_u64(&mut self) -> ParseResult<u64> {
        self.consume_arr::<8>().map(u64::from_le_bytes)
    }

    #[inline]
    fn take_i64(&mut self) -> ParseResult<i64> {
        self.consume_arr::<8>().map(i64::from_le_bytes)
    }

    #[inline]
    fn take_u128(&mut self) -> ParseResult<u128> {
        self.consume_arr::<16>().map(u128::from_le_bytes)
    }

    #[inline]
    fn take_i128(&mut self) -> ParseResult<i128> {
        self.consume_arr::<16>().map(i128::from_le_bytes)
    }

    /// Consumes a single byte and returns the boolean value it represents
    ///
    /// The only valid encodings are `0x01` for `true` and `0x00` for `false`.
    fn take_bool(&mut self) -> ParseResult<bool> {
        let offset = self.offset();
        match self.consume_byte()? {
            0x00 => Ok(false),
            0x01 => Ok(true),
            byte => Err(ParseError::InvalidBoolean { byte, offset }),
        }
    }

    /// Consumes the presence byte of an optional value.
    fn take_presence(&mut self) -> ParseResult<bool> {
        let offset = self.offset();
        match self.consume_byte()? {
            0x00 => Ok(false),
            0x01 => Ok(true),
            byte => Err(ParseError::InvalidOptionTag { byte, offset }),
        }
    }

    /// Consumes a ULEB128-encoded value of at most 64 bits.
    fn take_uleb128(&mut self) -> ParseResult<u64>
    where
        Self: Sized,
    {
        uleb128::read(self)
    }

    /// Consumes a ULEB128 length prefix.
    fn take_length(&mut self) -> ParseResult<usize>
    where
        Self: Sized,
    {
        uleb128::read_as::<usize, _>(self)
    }

    /// Consumes a ULEB128 variant index and checks it against the number of
    /// variants declared by `type_name`.
    ///
    /// # Invariants
    ///
    /// The only possible return values are `Err(_)` and `Ok(ix)` with `ix < count`.
    fn take_variant_index(&mut self, type_name: &'static str, count: usize) -> ParseResult<usize>
    where
        Self: Sized,
    {
        let offset = self.offset();
        let index = uleb128::read(self)?;
        match usize::try_from(index) {
            Ok(ix) if ix < count => Ok(ix),
            _ => Err(ParseError::InvalidVariant {
                type_name,
                index,
                count,
                offset,
            }),
        }
    }

    /// Consumes and returns a `Vec<u8>` of length `nbytes`, following
    /// the same behavioral guarantees as [`consume`](Parser::consume).
    #[inline]
    fn take_dynamic(&mut self, nbytes: usize) -> ParseResult<Vec<u8>> {
        self.consume(nbytes).map(Vec::from)
    }
}

/// [`Parser`] over a borrowed byte-slice.
#[derive(Clone, Debug)]
pub struct SliceParser<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> SliceParser<'a> {
    #[must_use]
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Returns the bytes that have not been consumed yet.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }
}

impl<'a> From<&'a [u8]> for SliceParser<'a> {
    fn from(buf: &'a [u8]) -> Self {
        Self::new(buf)
    }
}

impl Parser for SliceParser<'_> {
    #[inline]
    fn view_len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    fn offset(&self) -> usize {
        self.offset
    }

    fn consume_byte(&mut self) -> ParseResult<u8> {
        match self.buf.get(self.offset) {
            Some(&byte) => {
                self.offset += 1;
                Ok(byte)
            }
            None => Err(ParseError::Truncated {
                offset: self.offset,
                expected: 1,
                actual: 0,
            }),
        }
    }

    fn consume(&mut self, nbytes: usize) -> ParseResult<&[u8]> {
        let start = self.offset;
        let available = self.buf.len() - start;
        if nbytes > available {
            return Err(ParseError::Truncated {
                offset: start,
                expected: nbytes,
                actual: available,
            });
        }
        self.offset += nbytes;
        Ok(&self.buf[start..self.offset])
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn little_endian_words() {
        let mut p = SliceParser::new(&[0x2c, 0x01, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(p.take_u16(), Ok(300));
        assert_eq!(p.take_u32(), Ok(0x1234_5678));
        assert_eq!(p.remainder(), 0);
    }

    #[test]
    fn failed_consume_leaves_offset() {
        let mut p = SliceParser::new(&[1, 2, 3]);
        assert_eq!(p.take_u8(), Ok(1));
        assert_eq!(
            p.take_u32(),
            Err(ParseError::Truncated {
                offset: 1,
                expected: 4,
                actual: 2
            })
        );
        assert_eq!(p.offset(), 1);
        assert_eq!(p.rest(), &[2, 3]);
    }

    #[test]
    fn failed_uleb128_keeps_prefix_consumed() {
        let mut p = SliceParser::new(&[0x80, 0x80]);
        assert_eq!(
            p.take_uleb128(),
            Err(ParseError::Truncated {
                offset: 2,
                expected: 1,
                actual: 0
            })
        );
        assert_eq!(p.offset(), 2);
    }

    #[test]
    fn booleans_are_strict() {
        let mut p = SliceParser::new(&[0x01, 0x00, 0xff]);
        assert_eq!(p.take_bool(), Ok(true));
        assert_eq!(p.take_bool(), Ok(false));
        assert_eq!(
            p.take_bool(),
            Err(ParseError::InvalidBoolean {
                byte: 0xff,
                offset: 2
            })
        );
    }

    #[test]
    fn variant_index_out_of_range() {
        let mut p = SliceParser::new(&[0x03]);
        assert_eq!(
            p.take_variant_index("Shape", 3),
            Err(ParseError::InvalidVariant {
                type_name: "Shape",
                index: 3,
                count: 3,
                offset: 0
            })
        );
    }
}
