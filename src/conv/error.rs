use thiserror::Error;

use crate::parse::error::ParseError;

/// Failure while serializing a value.
///
/// Sinks are infallible, so every variant originates in the value itself.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// A tagged union had none of its variant slots present.
    #[error("no active variant in `{type_name}`: one variant slot must be present")]
    NoActiveVariant { type_name: &'static str },
    /// Failure reported by a hand-written [`Encode`](crate::Encode) implementation.
    #[error("{0}")]
    Custom(String),
}

impl EncodeError {
    /// Constructs an [`EncodeError::Custom`] from any displayable message.
    pub fn custom<T: std::fmt::Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

/// Failure while decoding a complete value from an input buffer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("parser encountered error: {0}")]
    Parse(#[from] ParseError),
    /// Bytes were left over after the value was decoded (`check_complete_parse`).
    #[error("{residual} bytes left unconsumed after decoding")]
    NonEmpty { residual: usize },
    #[error("base64 conversion encountered error: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
