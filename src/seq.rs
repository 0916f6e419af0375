//! Sequence shapes: variable-length sequences and fixed-size arrays
//!
//! * `Vec<T>` and `[T]` are always length-prefixed with the ULEB128 element
//!   count, followed by each element in order.
//! * `[T; N]` carries no prefix, since its length is part of its type, with
//!   one exception: an array of bytes is written like a byte sequence, with a
//!   ULEB128(`N`) prefix. Raw fixed-width byte strings with no prefix are
//!   spelled [`FixedBytes<N>`](crate::FixedBytes) or
//!   [`Address`](crate::Address) instead.

use crate::conv::error::EncodeResult;
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::{ParseError, ParseResult, Parser};
use crate::uleb128;

impl<T: Encode> Encode for [T] {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        if T::IS_BYTE {
            buf.anticipate(uleb128::MAX_LEN + self.len());
        }
        Ok(uleb128::write(buf, self.len() as u64) + T::write_many(self, buf)? + buf.resolve_zero())
    }
}

impl<T: Encode> Encode for Vec<T> {
    #[inline]
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        self.as_slice().write_to(buf)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let len = p.take_length()?;
        T::parse_many(p, len)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        let prefix = if T::IS_BYTE {
            uleb128::write(buf, N as u64)
        } else {
            0
        };
        Ok(prefix + T::write_many(self, buf)? + buf.resolve_zero())
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        if T::IS_BYTE {
            let offset = p.offset();
            let len = p.take_length()?;
            if len != N {
                return Err(ParseError::LengthMismatch {
                    expected: N,
                    actual: len,
                    offset,
                });
            }
        }
        let offset = p.offset();
        let items = T::parse_many(p, N)?;
        <[T; N]>::try_from(items).map_err(|items: Vec<T>| ParseError::LengthMismatch {
            expected: N,
            actual: items.len(),
            offset,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::DecodeError;

    #[test]
    fn byte_vec_prefixed() {
        assert_eq!(vec![0xaau8, 0xbb].to_bytes(), Ok(vec![0x02, 0xaa, 0xbb]));
        assert_eq!(Vec::<u8>::new().to_bytes(), Ok(vec![0x00]));
    }

    #[test]
    fn element_vec_prefixed() {
        assert_eq!(
            vec![1u16, 2].to_bytes(),
            Ok(vec![0x02, 0x01, 0x00, 0x02, 0x00])
        );
        assert_eq!(
            Vec::<u16>::try_decode(&[0x02, 0x01, 0x00, 0x02, 0x00]),
            Ok(vec![1, 2])
        );
    }

    #[test]
    fn nested_vectors() {
        let value = vec![vec![1u8], vec![], vec![2, 3]];
        let bytes = value.to_bytes().unwrap();
        assert_eq!(bytes, [0x03, 0x01, 0x01, 0x00, 0x02, 0x02, 0x03]);
        assert_eq!(Vec::<Vec<u8>>::try_decode(&bytes), Ok(value));
    }

    #[test]
    fn byte_array_prefixed_other_arrays_not() {
        assert_eq!([7u8; 3].to_bytes(), Ok(vec![0x03, 7, 7, 7]));
        assert_eq!([1u16, 2].to_bytes(), Ok(vec![0x01, 0x00, 0x02, 0x00]));
        assert_eq!([-1i8, 1].to_bytes(), Ok(vec![0xff, 0x01]));
        assert_eq!(<[u8; 3]>::try_decode(&[0x03, 7, 7, 7]), Ok([7u8; 3]));
        assert_eq!(<[u16; 2]>::try_decode(&[0x01, 0x00, 0x02, 0x00]), Ok([1, 2]));
    }

    #[test]
    fn byte_array_length_must_match() {
        assert_eq!(
            <[u8; 4]>::try_decode(&[0x03, 1, 2, 3]),
            Err(DecodeError::Parse(ParseError::LengthMismatch {
                expected: 4,
                actual: 3,
                offset: 0
            }))
        );
    }

    #[test]
    fn short_byte_sequence_is_truncation() {
        let mut bytes = vec![0x0a];
        bytes.extend_from_slice(&[1, 2, 3, 4, 5]);
        assert_eq!(
            Vec::<u8>::try_decode(&bytes),
            Err(DecodeError::Parse(ParseError::Truncated {
                offset: 1,
                expected: 10,
                actual: 5
            }))
        );
    }

    #[test]
    fn huge_length_prefix_does_not_allocate() {
        let mut bytes = uleb128::to_vec(u64::from(u32::MAX));
        bytes.push(0x01);
        assert!(matches!(
            Vec::<u64>::try_decode(&bytes),
            Err(DecodeError::Parse(ParseError::Truncated { .. }))
        ));
    }
}
