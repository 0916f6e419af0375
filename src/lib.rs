//! Canonical binary codec for Move-based blockchain data
//!
//! # Overview
//!
//! Transactions, signatures, and on-chain objects are exchanged with the
//! chain's runtime in the Binary Canonical Serialization (BCS) format: a
//! deterministic byte layout with no header, no version tag, and no schema on
//! the wire. Producer and consumer agree on the shape of every value out of
//! band, and every value has exactly one valid encoding.
//!
//! This crate models that format with two traits, [`Encode`] and [`Decode`],
//! implemented for the primitive shapes and derivable for records and tagged
//! unions. A hand-written implementation of either trait overrides the
//! structural rules for a single type.
//!
//! # Format
//!
//! * booleans are one byte, `0x00` or `0x01`;
//! * fixed-width integers are little-endian;
//! * lengths and variant indices are ULEB128 ([`uleb128`]);
//! * strings and sequences are length-prefixed; so are arrays of bytes;
//! * other arrays, records, and tuples are the concatenation of their parts;
//! * optional values carry a presence byte ([`schema`]);
//! * tagged unions carry a variant index ([`adt`]);
//! * [`FixedBytes`] and [`Address`] are raw bytes with no prefix.
//!
//! # Derive
//!
//! ```
//! use bcs_model::{Decode, Encode};
//!
//! #[derive(Debug, PartialEq, Encode, Decode)]
//! struct Transfer {
//!     amount: u64,
//!     #[bcs = "optional"]
//!     memo: Option<String>,
//!     #[bcs = "-"]
//!     cached_digest: Vec<u8>,
//! }
//!
//! let transfer = Transfer { amount: 5, memo: None, cached_digest: vec![1, 2] };
//! let bytes = bcs_model::marshal(&transfer).unwrap();
//! assert_eq!(bytes, [5, 0, 0, 0, 0, 0, 0, 0, 0]);
//!
//! let decoded: Transfer = bcs_model::from_bytes(&bytes).unwrap();
//! assert_eq!(decoded, Transfer { amount: 5, memo: None, cached_digest: vec![] });
//! ```

extern crate self as bcs_model;

pub mod adt;
pub mod autobox;
pub mod b64;
pub mod conv;
pub mod error;
pub mod fixed;
pub mod parse;
pub mod prim;
pub mod schema;
pub mod seq;
pub mod u256;
pub mod uleb128;

pub use crate::adt::TaggedUnion;
pub use crate::b64::{decode_base64, encode_base64, from_base64, to_base64};
pub use crate::conv::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
pub use crate::conv::{target::Target, Decode, Encode};
pub use crate::fixed::{Address, FixedBytes, ADDRESS_LENGTH};
pub use crate::parse::{ParseError, ParseResult, Parser, SliceParser};
pub use crate::schema::{Optional, Ptr};
pub use crate::u256::U256;
pub use crate::uleb128::Uleb128;

pub use ::bcs_derive::{Decode, Encode};

/// Serializes `value` into a fresh buffer.
///
/// # Errors
///
/// Fails if some part of `value` has no encoding, such as a tagged union with
/// no active variant.
pub fn marshal<T: Encode + ?Sized>(value: &T) -> EncodeResult<Vec<u8>> {
    match value.to_bytes() {
        Ok(bytes) => {
            tracing::trace!(ty = std::any::type_name::<T>(), len = bytes.len(), "encoded value");
            Ok(bytes)
        }
        Err(err) => {
            tracing::debug!(ty = std::any::type_name::<T>(), %err, "encoding failed");
            Err(err)
        }
    }
}

/// Serializes `value`, for call sites where failure is a programming error.
///
/// # Panics
///
/// Panics if [`marshal`] fails.
#[must_use]
pub fn must_marshal<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
    marshal(value).unwrap_or_else(|err| {
        panic!(
            "<{} as Encode>::to_bytes encountered error: {}",
            std::any::type_name::<T>(),
            err
        )
    })
}

/// Decodes a value of type `T` from `bytes`.
///
/// Trailing bytes are rejected only with the `check_complete_parse` feature;
/// see [`Decode::try_decode`].
pub fn from_bytes<T: Decode>(bytes: &[u8]) -> DecodeResult<T> {
    let ret = T::try_decode(bytes);
    if let Err(err) = &ret {
        tracing::debug!(ty = std::any::type_name::<T>(), len = bytes.len(), %err, "decoding failed");
    }
    ret
}

/// Decodes a value from the front of `bytes` into `dest`, returning the number
/// of bytes consumed.
///
/// The value is built separately and only moved into `dest` once decoding has
/// succeeded; on error `dest` is left exactly as it was.
pub fn unmarshal<T: Decode>(bytes: &[u8], dest: &mut T) -> DecodeResult<usize> {
    let mut p = SliceParser::new(bytes);
    match T::parse(&mut p) {
        Ok(value) => {
            *dest = value;
            tracing::trace!(ty = std::any::type_name::<T>(), consumed = p.offset(), "decoded value");
            Ok(p.offset())
        }
        Err(err) => {
            tracing::debug!(ty = std::any::type_name::<T>(), %err, "decoding failed");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unmarshal_reports_consumed() {
        let mut dest = 0u16;
        assert_eq!(unmarshal(&[0x2c, 0x01, 0xaa], &mut dest), Ok(2));
        assert_eq!(dest, 300);
    }

    #[test]
    fn unmarshal_leaves_dest_on_error() {
        let mut dest = (1u8, String::from("kept"));
        let err = unmarshal(&[0x07, 0x05, b'a'], &mut dest).unwrap_err();
        assert!(matches!(err, DecodeError::Parse(ParseError::Truncated { .. })));
        assert_eq!(dest, (1, String::from("kept")));
    }

    #[test]
    #[should_panic(expected = "no active variant")]
    fn must_marshal_panics() {
        struct Empty;

        impl Encode for Empty {
            fn write_to<U: Target>(&self, _: &mut U) -> EncodeResult<usize> {
                Err(adt::no_active_variant::<Self>())
            }
        }

        let _ = must_marshal(&Empty);
    }
}
