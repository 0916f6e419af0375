//! Tagged unions
//!
//! A tagged union is written as the ULEB128 index of its active variant,
//! followed by that variant's payload. Variants are numbered by declaration
//! order, starting at zero; a variant with no payload writes nothing after
//! its index.
//!
//! Two type shapes are recognized as tagged unions, both through
//! `#[derive(Encode, Decode)]`:
//!
//! * a Rust `enum`, where exactly one variant exists at a time;
//! * a struct marked `#[bcs = "enum"]`, whose fields are [`Optional`] slots
//!   and stand for the variants. The active variant is the first present slot
//!   in declaration order; if several are present the lowest index wins, and
//!   if none is present encoding fails with
//!   [`EncodeError::NoActiveVariant`]. On decode only the slot named by the
//!   index is filled. A slot of type `Option<()>` is a variant with no
//!   payload.
//!
//! Both shapes implement [`TaggedUnion`].
//!
//! [`Optional`]: crate::schema::Optional

use crate::conv::error::{EncodeError, EncodeResult};
use crate::conv::target::Target;
use crate::uleb128;

/// Marker for types written as a variant index followed by a payload.
pub trait TaggedUnion {
    /// Variant names, in wire-index order.
    const VARIANTS: &'static [&'static str];

    /// Index of the variant that will be written, or `None` if no variant is
    /// active.
    fn active_variant(&self) -> Option<usize>;

    /// Name of the active variant.
    fn active_variant_name(&self) -> Option<&'static str> {
        self.active_variant().and_then(|ix| Self::VARIANTS.get(ix).copied())
    }
}

/// Writes a variant index.
#[inline]
pub fn write_variant_index<U: Target>(buf: &mut U, index: usize) -> usize {
    uleb128::write(buf, index as u64)
}

/// Error for a tagged union of type `T` with no active variant.
#[must_use]
pub fn no_active_variant<T: ?Sized>() -> EncodeError {
    EncodeError::NoActiveVariant {
        type_name: std::any::type_name::<T>(),
    }
}

/// Resolves the active variant of `value`, failing if there is none.
pub fn require_active<T: TaggedUnion + ?Sized>(value: &T) -> EncodeResult<usize> {
    value.active_variant().ok_or_else(no_active_variant::<T>)
}

#[cfg(test)]
mod test {
    use super::*;

    struct Either {
        left: Option<u8>,
        right: Option<u8>,
    }

    impl TaggedUnion for Either {
        const VARIANTS: &'static [&'static str] = &["left", "right"];

        fn active_variant(&self) -> Option<usize> {
            [self.left.is_some(), self.right.is_some()]
                .iter()
                .position(|present| *present)
        }
    }

    #[test]
    fn active_variant_resolution() {
        let both = Either { left: Some(1), right: Some(2) };
        assert_eq!(require_active(&both), Ok(0));
        assert_eq!(both.active_variant_name(), Some("left"));

        let neither = Either { left: None, right: None };
        assert!(matches!(
            require_active(&neither),
            Err(EncodeError::NoActiveVariant { type_name }) if type_name.ends_with("Either")
        ));
    }

    #[test]
    fn index_is_uleb128() {
        let mut buf = Vec::new();
        assert_eq!(write_variant_index(&mut buf, 200), 2);
        assert_eq!(buf, [0xc8, 0x01]);
    }
}
