//! Core of the binary-conversion API
//!
//! This module contains definitions for the high-level transcoding traits
//! `Encode` and `Decode`, which are motivationally equivalent to the
//! `Serialize` and `Deserialize` traits defined in `serde`, but fixed to a
//! single canonical format with no schema on the wire.
//!
//! Implementations are structurally inductive: a record encodes its fields in
//! declaration order, a tagged union encodes its variant index followed by the
//! variant payload, and so on down to the leaf primitives defined in
//! [`prim`](crate::prim) and [`seq`](crate::seq). The derive macros re-exported
//! at the crate root generate these implementations for user-defined types.
//!
//! A hand-written implementation of either trait is the override mechanism:
//! whatever it writes or reads is used verbatim, with no further structural
//! processing.
//!
//! An additional submodule, [`target`], offers an abstraction along the lines of
//! [`std::io::Write`], namely the [`target::Target`] trait. This is the dual to
//! [`crate::parse::Parser`], acting as the generic bound for serialization in
//! the [`Encode::write_to`] method.

use crate::parse::{ParseResult, Parser, SliceParser};

use self::error::{DecodeResult, EncodeResult};
use self::target::{ByteCounter, Target};

pub mod error;
pub mod target;

/// Sums the byte counts of encoding each operand into a single target,
/// short-circuiting on the first error.
#[macro_export]
macro_rules! write_all_to {
    ($($x:expr),* $(,)? => $tgt:expr) => {
        {
            let mut __n = 0usize;
            $( __n += $crate::Encode::write_to($x, $tgt)?; )*
            Ok(__n + $crate::conv::target::Target::resolve_zero($tgt))
        }
    };
}

/// Trait for types that support serialization into the canonical binary form
///
/// Implementing [`Encode`] requires only [`write_to`](Encode::write_to); the
/// remaining methods have default implementations that may be overridden when
/// a more efficient equivalent exists.
pub trait Encode {
    /// Whether `Self` is the single-byte element type.
    ///
    /// Byte sequences take a bulk fast path, and fixed-size arrays of bytes
    /// carry a length prefix that arrays of any other element type do not.
    const IS_BYTE: bool = false;

    /// Appends the serialized bytes of this value to a generic buffer,
    /// returning the exact number of bytes written
    ///
    /// # Errors
    ///
    /// Fails only when the value has no encoding, such as a tagged union with
    /// no active variant. Bytes already appended to `buf` on failure are
    /// meaningless and should be discarded.
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize>;

    /// Encodes every element of `items` in order, with no length prefix.
    fn write_many<U: Target>(items: &[Self], buf: &mut U) -> EncodeResult<usize>
    where
        Self: Sized,
    {
        let mut n = 0;
        for item in items {
            n += item.write_to(buf)?;
        }
        Ok(n)
    }

    /// Creates a new buffer and fills it with the serialized bytes of this value.
    fn encode<U: Target>(&self) -> EncodeResult<U> {
        let mut buf: U = U::create();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Creates a [`Vec<u8>`] and fills it with the serialized bytes of this value.
    fn to_bytes(&self) -> EncodeResult<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(buf)
    }

    /// Computes, without allocation, the number of bytes in the serialized
    /// form of `self`.
    fn enc_len(&self) -> EncodeResult<usize> {
        self.write_to(&mut ByteCounter::create())
    }
}

/// Trait providing methods for deserializing canonical bytes into values of a
/// certain type
///
/// It is almost always expected that a type implementing `Decode` will also
/// implement [`Encode`], and that the two are exact mirrors of one another.
///
/// # Example
///
/// A typical hand-written implementation of `Decode`:
///
/// ```
/// use bcs_model::parse::{ParseResult, Parser};
/// use bcs_model::Decode;
///
/// #[derive(Debug, PartialEq)]
/// pub struct Coin {
///     is_locked: bool,
///     value: u64,
/// }
///
/// impl Decode for Coin {
///     fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
///         Ok(Self {
///             is_locked: bool::parse(p)?,
///             value: u64::parse(p)?,
///         })
///     }
/// }
///
/// let bytes = [0x01, 0x2a, 0, 0, 0, 0, 0, 0, 0];
/// assert_eq!(Coin::try_decode(&bytes).unwrap(), Coin { is_locked: true, value: 42 });
/// ```
pub trait Decode {
    /// Mirror of [`Encode::IS_BYTE`].
    const IS_BYTE: bool = false;

    /// Attempt to consume and interpret a value of type `Self` from an existing
    /// `Parser` object over a binary buffer.
    ///
    /// # Errors
    ///
    /// In most cases, the errors returned by this method will be propagated from
    /// calls made to [`Parser`] methods in the implementation logic.
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self>
    where
        Self: Sized;

    /// Decodes `n` consecutive values of type `Self`.
    fn parse_many<P: Parser>(p: &mut P, n: usize) -> ParseResult<Vec<Self>>
    where
        Self: Sized,
    {
        // the length prefix is untrusted, so never reserve beyond the input
        let mut ret = Vec::with_capacity(n.min(p.remainder()));
        for _ in 0..n {
            ret.push(Self::parse(p)?);
        }
        Ok(ret)
    }

    /// Attempt to decode a value of the `Self` type from the front of `input`.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by [`parse`](Decode::parse). In addition,
    /// if the feature-flag `check_complete_parse` is enabled, returns
    /// [`DecodeError::NonEmpty`](error::DecodeError::NonEmpty) when `input`
    /// holds bytes past the end of the value.
    fn try_decode(input: &[u8]) -> DecodeResult<Self>
    where
        Self: Sized,
    {
        let mut p = SliceParser::new(input);
        let ret = Self::parse(&mut p)?;
        cfg_if::cfg_if! {
            if #[cfg(feature = "check_complete_parse")] {
                let residual = p.remainder();
                if residual != 0 {
                    return Err(error::DecodeError::NonEmpty { residual });
                }
            }
        }
        Ok(ret)
    }
}
