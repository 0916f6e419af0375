//! Base64 transport helpers
//!
//! Canonical byte buffers travel through JSON and other text contexts as
//! standard-alphabet, padded base64. These helpers are conveniences for
//! moving buffers in and out of such contexts; base64 is not part of the
//! canonical format itself.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::conv::error::{DecodeResult, EncodeResult};
use crate::conv::{Decode, Encode};

/// Decodes a standard-alphabet base64 string.
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    STANDARD.decode(s)
}

/// Encodes bytes as a standard-alphabet base64 string.
#[must_use]
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Serializes `value` and returns its canonical bytes in base64.
pub fn encode_base64<T: Encode + ?Sized>(value: &T) -> EncodeResult<String> {
    value.to_bytes().map(|bytes| to_base64(&bytes))
}

/// Decodes a value from the base64 form of its canonical bytes.
pub fn decode_base64<T: Decode>(s: &str) -> DecodeResult<T> {
    let bytes = from_base64(s)?;
    T::try_decode(&bytes)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::DecodeError;

    #[test]
    fn standard_alphabet() {
        assert_eq!(to_base64(&[0xfb, 0xff]), "+/8=");
        assert_eq!(from_base64("+/8="), Ok(vec![0xfb, 0xff]));
    }

    #[test]
    fn value_through_base64() {
        let s = encode_base64(&Some(300u16)).unwrap();
        assert_eq!(s, "ASwB");
        assert_eq!(decode_base64::<Option<u16>>(&s), Ok(Some(300)));
    }

    #[test]
    fn invalid_base64() {
        assert!(matches!(
            decode_base64::<u8>("not base64!"),
            Err(DecodeError::Base64(_))
        ));
    }
}
