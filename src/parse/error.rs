//! Error types used to report failure in low-level parsing
//!
//! This module defines the primary type [`ParseError`] and the alias
//! [`ParseResult<T>`]. Every variant that can be attributed to a position
//! in the input carries the byte `offset` at which the failing read began.

use std::str::Utf8Error;

use thiserror::Error;

/// Enumeration type over all errors that may be encountered when calling
/// methods on [`Parser`](crate::parse::Parser) types, or when interpreting
/// the bytes they return as values of a particular shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input was exhausted before a value or length could be fully read.
    #[error("input truncated at byte {offset}: expected {expected} bytes, found {actual}")]
    Truncated {
        offset: usize,
        expected: usize,
        actual: usize,
    },
    /// A ULEB128 value did not fit into the integer width it was read as,
    /// or ran past the maximal encoding length of a 64-bit value.
    #[error("ULEB128 value at byte {offset} overflows a {width}-bit integer")]
    Uleb128Overflow { offset: usize, width: u32 },
    /// A ULEB128 value was encoded with a redundant trailing zero group.
    #[error("non-canonical ULEB128 encoding at byte {offset}")]
    NonCanonicalUleb128 { offset: usize },
    /// A decoded variant index has no corresponding variant.
    #[error("invalid variant index {index} for `{type_name}` at byte {offset} ({count} variants declared)")]
    InvalidVariant {
        type_name: &'static str,
        index: u64,
        count: usize,
        offset: usize,
    },
    /// A boolean byte was neither `0x00` nor `0x01`.
    #[error("expected boolean (0x00 | 0x01) at byte {offset}, got {byte:#04x}")]
    InvalidBoolean { byte: u8, offset: usize },
    /// An option presence byte was neither `0x00` nor `0x01`.
    #[error("expected option tag (0x00 | 0x01) at byte {offset}, got {byte:#04x}")]
    InvalidOptionTag { byte: u8, offset: usize },
    /// A length read from the input did not match the length fixed by the type.
    #[error("length mismatch at byte {offset}: expected {expected}, found {actual}")]
    LengthMismatch {
        expected: usize,
        actual: usize,
        offset: usize,
    },
    /// The payload of a string was not valid UTF-8.
    #[error("invalid UTF-8 in string at byte {offset}: {source}")]
    InvalidUtf8 {
        offset: usize,
        #[source]
        source: Utf8Error,
    },
    /// Failure reported by a hand-written [`Decode`](crate::Decode) implementation.
    #[error("{0}")]
    Custom(String),
}

impl ParseError {
    /// Constructs a [`ParseError::Custom`] from any displayable message.
    pub fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }

    /// Returns the byte offset associated with this error, if any.
    pub fn offset(&self) -> Option<usize> {
        match *self {
            ParseError::Truncated { offset, .. }
            | ParseError::Uleb128Overflow { offset, .. }
            | ParseError::NonCanonicalUleb128 { offset }
            | ParseError::InvalidVariant { offset, .. }
            | ParseError::InvalidBoolean { offset, .. }
            | ParseError::InvalidOptionTag { offset, .. }
            | ParseError::LengthMismatch { offset, .. }
            | ParseError::InvalidUtf8 { offset, .. } => Some(offset),
            ParseError::Custom(_) => None,
        }
    }
}

/// Type alias for Result with an error type of [`ParseError`]
pub type ParseResult<T> = std::result::Result<T, ParseError>;
