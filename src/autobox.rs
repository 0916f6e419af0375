//! Transparent indirections
//!
//! Encoding a reference, box, or shared pointer produces exactly the bytes of
//! the value it points to; decoding allocates the pointer and parses the
//! pointee into it.

use std::rc::Rc;
use std::sync::Arc;

use crate::conv::error::EncodeResult;
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::{ParseResult, Parser};

impl<T: Encode + ?Sized> Encode for &T {
    #[inline]
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        (**self).write_to(buf)
    }
}

macro_rules! impl_autobox {
    ($($ptr:ident),+) => {
        $(
            impl<T: Encode + ?Sized> Encode for $ptr<T> {
                #[inline]
                fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
                    (**self).write_to(buf)
                }
            }

            impl<T: Decode> Decode for $ptr<T> {
                fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
                    Ok($ptr::new(T::parse(p)?))
                }
            }
        )+
    };
}

impl_autobox!(Box, Rc, Arc);
