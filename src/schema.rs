//! Optional and nullable slots
//!
//! There are two ways a value can be absent in the canonical format:
//!
//! * explicitly, as an *optional* value: a presence byte (`0x00` absent,
//!   `0x01` present), followed by the payload only when present. This is the
//!   encoding of [`Option<T>`], and of any field tagged `#[bcs = "optional"]`.
//! * implicitly, through a nullable indirection [`Ptr<T>`] that is not tagged
//!   optional: an absent pointer is written as the zero value
//!   (`T::default()`) of its pointee, and always decodes as present.
//!
//! The [`Optional`] trait abstracts over the slot types that can carry the
//! `optional` field tag and that can hold a variant of a struct-shaped tagged
//! union (see [`adt`](crate::adt)).

use crate::conv::error::EncodeResult;
use crate::conv::{target::Target, Decode, Encode};
use crate::parse::{ParseResult, Parser};

/// A storage slot that is either empty or holds a single `Inner` value.
pub trait Optional: Sized {
    type Inner;

    /// Returns the held value, if any.
    fn present(&self) -> Option<&Self::Inner>;

    /// Builds a slot from an optional value.
    fn from_present(value: Option<Self::Inner>) -> Self;

    #[inline]
    fn is_present(&self) -> bool {
        self.present().is_some()
    }
}

impl<T> Optional for Option<T> {
    type Inner = T;

    #[inline]
    fn present(&self) -> Option<&T> {
        self.as_ref()
    }

    #[inline]
    fn from_present(value: Option<T>) -> Self {
        value
    }
}

/// Writes `slot` as a presence byte followed by its value, if present.
pub fn write_optional<O, U>(slot: &O, buf: &mut U) -> EncodeResult<usize>
where
    O: Optional,
    O::Inner: Encode,
    U: Target,
{
    match slot.present() {
        Some(value) => Ok(buf.push_one(0x01) + value.write_to(buf)? + buf.resolve_zero()),
        None => Ok(buf.push_one(0x00) + buf.resolve_zero()),
    }
}

/// Reads a presence byte and, if it is set, the value that follows it.
///
/// Storage for the value is only allocated once the presence byte is known
/// to be `0x01`.
pub fn read_optional<O, P>(p: &mut P) -> ParseResult<O>
where
    O: Optional,
    O::Inner: Decode,
    P: Parser,
{
    if p.take_presence()? {
        Ok(O::from_present(Some(O::Inner::parse(p)?)))
    } else {
        Ok(O::from_present(None))
    }
}

impl<T: Encode> Encode for Option<T> {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        write_optional(self, buf)
    }
}

impl<T: Decode> Decode for Option<T> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        read_optional(p)
    }
}

/// Nullable indirection to a heap-allocated `T`.
///
/// Unless the field holding it is tagged optional, a `Ptr<T>` has no presence
/// byte on the wire: `Ptr::null()` is written exactly like `T::default()`, and
/// decoding always yields a non-null pointer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ptr<T>(Option<Box<T>>);

impl<T> Ptr<T> {
    #[must_use]
    pub fn new(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    #[must_use]
    pub const fn null() -> Self {
        Self(None)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    #[must_use]
    pub fn as_ref(&self) -> Option<&T> {
        self.0.as_deref()
    }

    #[must_use]
    pub fn into_inner(self) -> Option<T> {
        self.0.map(|value| *value)
    }
}

impl<T> Default for Ptr<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T> From<T> for Ptr<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> Optional for Ptr<T> {
    type Inner = T;

    #[inline]
    fn present(&self) -> Option<&T> {
        self.0.as_deref()
    }

    #[inline]
    fn from_present(value: Option<T>) -> Self {
        Self(value.map(Box::new))
    }
}

impl<T: Encode + Default> Encode for Ptr<T> {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        match self.0.as_deref() {
            Some(value) => value.write_to(buf),
            None => T::default().write_to(buf),
        }
    }
}

impl<T: Decode> Decode for Ptr<T> {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        Ok(Self::new(T::parse(p)?))
    }
}
