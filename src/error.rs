//! Errors raised while constructing codec values from non-canonical sources
//!
//! These are distinct from [`ParseError`](crate::ParseError), which covers
//! failures while reading the canonical format itself.

use thiserror::Error;

/// Failure of a value to satisfy a constraint on its byte-width.
#[derive(Clone, PartialEq, PartialOrd, Eq, Ord, Debug, Error)]
pub enum WidthError {
    /// Restriction on maximum byte-width exceeded
    #[error("{actual}-byte value exceeded limit of {limit} bytes")]
    TooWide { limit: usize, actual: usize },
    /// Requirement of precise byte-width not satisfied
    #[error("{actual}-byte value violated requirement of {exact} bytes")]
    WrongWidth { exact: usize, actual: usize },
}

/// Error type representing all possible conditions for invalidity
/// encountered when attempting to parse a string as a series
/// of hex-encoded bytes.
#[derive(Clone, PartialEq, Eq, Ord, PartialOrd, Debug, Error)]
pub enum HexConvError {
    /// Error case for strings containing non-hex characters,
    /// i.e. anything not in `[0-9a-fA-F]`.
    #[error("hex-conversion failed on non-hex character in `{0}`")]
    NonHex(String),
}

/// Failure to parse an [`Address`](crate::Address) from its textual form.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum AddressParseError {
    #[error(transparent)]
    Hex(#[from] HexConvError),
    #[error(transparent)]
    Width(#[from] WidthError),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            WidthError::TooWide { limit: 32, actual: 33 }.to_string(),
            "33-byte value exceeded limit of 32 bytes"
        );
        assert_eq!(
            AddressParseError::from(HexConvError::NonHex("0xzz".into())).to_string(),
            "hex-conversion failed on non-hex character in `0xzz`"
        );
    }
}
