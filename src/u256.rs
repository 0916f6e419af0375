use std::fmt::{self, Display};
use std::ops::Deref;

use num_bigint::BigUint;

use crate::conv::error::EncodeResult;
use crate::conv::{target::Target, Decode, Encode};
use crate::error::WidthError;
use crate::parse::{ParseResult, Parser};

/// 256-bit unsigned integer, serialized as 32 little-endian bytes.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Default)]
#[repr(transparent)]
pub struct U256(BigUint);

impl U256 {
    pub const BYTES: usize = 32;

    /// # Errors
    ///
    /// Returns [`WidthError::TooWide`] if `value` needs more than 256 bits.
    pub fn new(value: BigUint) -> Result<Self, WidthError> {
        let bits = value.bits() as usize;
        if bits > 8 * Self::BYTES {
            Err(WidthError::TooWide {
                limit: Self::BYTES,
                actual: (bits + 7) / 8,
            })
        } else {
            Ok(Self(value))
        }
    }

    #[must_use]
    pub fn into_inner(self) -> BigUint {
        self.0
    }

    #[must_use]
    pub const fn as_inner(&self) -> &BigUint {
        &self.0
    }

    #[must_use]
    pub fn to_le_bytes(&self) -> [u8; 32] {
        let mut ret = [0u8; 32];
        let bytes = self.0.to_bytes_le();
        ret[..bytes.len()].copy_from_slice(&bytes);
        ret
    }

    #[must_use]
    pub fn from_le_bytes(bytes: [u8; 32]) -> Self {
        Self(BigUint::from_bytes_le(&bytes))
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256({})", self.0)
    }
}

impl Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl Deref for U256 {
    type Target = BigUint;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

macro_rules! impl_from_prim {
    ($($src:ty),+) => {
        $(
            impl From<$src> for U256 {
                fn from(value: $src) -> Self {
                    Self(BigUint::from(value))
                }
            }
        )+
    };
}

impl_from_prim!(u8, u16, u32, u64, u128);

impl TryFrom<BigUint> for U256 {
    type Error = WidthError;

    fn try_from(value: BigUint) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<U256> for BigUint {
    fn from(value: U256) -> Self {
        value.0
    }
}

impl Encode for U256 {
    fn write_to<U: Target>(&self, buf: &mut U) -> EncodeResult<usize> {
        Ok(buf.push_many(self.to_le_bytes()) + buf.resolve_zero())
    }
}

impl Decode for U256 {
    fn parse<P: Parser>(p: &mut P) -> ParseResult<Self> {
        p.consume_arr::<32>().map(Self::from_le_bytes)
    }
}
