//! Serialized Metadata
//!
//! Decoder for the PHP `serialize()` text format found inside WordPress
//! `postmeta` values (attachment dimensions, collections, ...). Only the
//! subset WordPress emits for these fields is understood: arrays, strings
//! and integers.

pub mod decoder;
pub mod normalize;
pub mod value;

pub use decoder::{decode, DecodeError, MAX_DEPTH};
pub use normalize::normalize;
pub use value::SerializedValue;

/// Whether `text` starts like a serialized token (`^[A-Za-z]:\d+:`).
///
/// Plain strings that merely contain a colon do not match.
pub fn looks_serialized(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() < 4 || !bytes[0].is_ascii_alphabetic() || bytes[1] != b':' {
        return false;
    }
    let digits = bytes[2..].iter().take_while(|b| b.is_ascii_digit()).count();
    digits > 0 && bytes.get(2 + digits) == Some(&b':')
}

/// Decode `text` as written, falling back to its normalized form when that
/// fails. Well-formed input is never normalized, so string contents keep
/// their exact bytes.
pub fn decode_normalized(text: &str) -> Result<SerializedValue, DecodeError> {
    decode(text).or_else(|_| decode(&normalize(text)))
}
