//! Leaf shapes: unit, booleans, fixed-width integers, strings and tuples

use crate::conv::error::EncodeResult;
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::{ParseError, ParseResult, Parser};
use crate::uleb128;

impl Encode for () {
    #[inline(always)]
    fn write_to<U: Target>(&self, _: &mut U) -> EncodeResult<usize> {
        Ok(0)
    }

    #[inline(always)]
    fn to_bytes(&self) -> EncodeResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// The zero-width placeholder: decoding it consumes no bytes.
impl Decode for () {
    #[inline]
    fn parse<P: Parser>(_: &mut P) -> ParseResult<()> {
        Ok(())
    }
}

impl Encode for bool {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        Ok(buf.push_one(u8::from(*self)) + buf.resolve_zero())
    }
}

impl Decode for bool {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.take_bool()
    }
}

impl Encode for u8 {
    const IS_BYTE: bool = true;

    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        Ok(buf.push_one(*self) + buf.resolve_zero())
    }

    fn write_many<U: Target>(items: &[Self], buf: &mut U) -> EncodeResult<usize> {
        Ok(buf.push_all(items) + buf.resolve_zero())
    }
}

impl Decode for u8 {
    const IS_BYTE: bool = true;

    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.take_u8()
    }

    fn parse_many<P: Parser>(p: &mut P, n: usize) -> ParseResult<Vec<Self>> {
        p.take_dynamic(n)
    }
}

macro_rules! impl_int {
    ($($t:ty => $take:ident),+ $(,)?) => {
        $(
            impl Encode for $t {
                #[inline]
                fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
                    Ok(buf.push_many(self.to_le_bytes()) + buf.resolve_zero())
                }
            }

            impl Decode for $t {
                #[inline]
                fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
                    p.$take()
                }
            }
        )+
    };
}

impl_int! {
    i8 => take_i8,
    u16 => take_u16,
    i16 => take_i16,
    u32 => take_u32,
    i32 => take_i32,
    u64 => take_u64,
    i64 => take_i64,
    u128 => take_u128,
    i128 => take_i128,
}

impl Encode for str {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        let bytes = self.as_bytes();
        buf.anticipate(uleb128::MAX_LEN + bytes.len());
        Ok(uleb128::write(buf, bytes.len() as u64) + buf.push_all(bytes) + buf.resolve_zero())
    }
}

impl Encode for String {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        self.as_str().write_to(buf)
    }
}

impl Decode for String {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        let len = p.take_length()?;
        let offset = p.offset();
        let bytes = p.take_dynamic(len)?;
        String::from_utf8(bytes).map_err(|err| ParseError::InvalidUtf8 {
            offset,
            source: err.utf8_error(),
        })
    }
}

macro_rules! impl_tuple {
    ($($name:ident . $ix:tt),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
                $crate::write_all_to!($(&self.$ix),+ => buf)
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
                Ok(($($name::parse(p)?,)+))
            }
        }
    };
}

impl_tuple!(A.0);
impl_tuple!(A.0, B.1);
impl_tuple!(A.0, B.1, C.2);
impl_tuple!(A.0, B.1, C.2, D.3);
impl_tuple!(A.0, B.1, C.2, D.3, E.4);
impl_tuple!(A.0, B.1, C.2, D.3, E.4, F.5);
impl_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6);
impl_tuple!(A.0, B.1, C.2, D.3, E.4, F.5, G.6, H.7);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_is_zero_width() {
        assert_eq!(().to_bytes(), Ok(vec![]));
        assert_eq!(<()>::try_decode(&[]), Ok(()));
    }

    #[test]
    fn integers_little_endian() {
        assert_eq!(0x0102u16.to_bytes(), Ok(vec![0x02, 0x01]));
        assert_eq!((-2i32).to_bytes(), Ok(vec![0xfe, 0xff, 0xff, 0xff]));
        assert_eq!(
            u64::MAX.to_bytes(),
            Ok(vec![0xff; 8])
        );
        assert_eq!(1u128.to_bytes().map(|b| b.len()), Ok(16));
        assert_eq!(i64::try_decode(&(-7i64).to_le_bytes()), Ok(-7));
    }

    #[test]
    fn bool_bytes() {
        assert_eq!(true.to_bytes(), Ok(vec![0x01]));
        assert_eq!(false.to_bytes(), Ok(vec![0x00]));
    }

    #[test]
    fn string_length_prefixed() {
        assert_eq!("sui".to_bytes(), Ok(vec![0x03, b's', b'u', b'i']));
        assert_eq!(String::try_decode(&[0x02, b'h', b'i']), Ok("hi".to_owned()));
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        let err = String::try_decode(&[0x02, 0xc3, 0x28]).unwrap_err();
        assert!(matches!(
            err,
            crate::DecodeError::Parse(ParseError::InvalidUtf8 { offset: 1, .. })
        ));
    }

    #[test]
    fn tuples_concatenate() {
        assert_eq!((1u8, 2u16, true).to_bytes(), Ok(vec![0x01, 0x02, 0x00, 0x01]));
        assert_eq!(
            <(u8, u16, bool)>::try_decode(&[0x01, 0x02, 0x00, 0x01]),
            Ok((1, 2, true))
        );
    }
}
