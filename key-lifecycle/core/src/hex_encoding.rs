//! Conversions between hexadecimal text and raw bytes.
//!
//! The canonical form of hex-encoded material in this system is lowercase, even-length, and without
//! a `0x` prefix.  All key material is stored in canonical form, and all signatures are rendered in it.
//! Decoding is lenient: an optional `0x` prefix is accepted, upper- and lowercase digits are accepted,
//! and an odd number of digits is interpreted as if a single leading `0` were present.

use crate::{Error, Result};

pub const HEX_PREFIX: &str = "0x";

/// Decode hex text into bytes.  See the module documentation for what inputs are accepted.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>> {
    let digits = s.strip_prefix(HEX_PREFIX).unwrap_or(s);
    let decode_r = if digits.len() % 2 == 1 {
        let mut padded = String::with_capacity(digits.len() + 1);
        padded.push('0');
        padded.push_str(digits);
        hex::decode(padded.as_str())
    } else {
        hex::decode(digits)
    };
    // NOTE: The input itself is deliberately left out of the error message, since it may be a private key.
    decode_r.map_err(|e| {
        Error::EncodingError(
            format!(
                "malformed hex string of length {} (with padding applied if the length was odd): {}",
                s.len(),
                e
            )
            .into(),
        )
    })
}

/// Encode bytes as canonical hex.
pub fn bytes_to_hex(b: &[u8]) -> String {
    hex::encode(b)
}

/// Encode bytes as lowercase hex with a `0x` prefix.
pub fn bytes_to_prefixed_hex(b: &[u8]) -> String {
    let mut prefixed = String::with_capacity(HEX_PREFIX.len() + 2 * b.len());
    prefixed.push_str(HEX_PREFIX);
    prefixed.push_str(&hex::encode(b));
    prefixed
}

/// Canonical hex of the UTF-8 bytes of the given string.
pub fn string_to_hex(s: &str) -> String {
    bytes_to_hex(s.as_bytes())
}

/// Convert any accepted hex input form into canonical form.
pub fn normalize_hex(s: &str) -> Result<String> {
    Ok(bytes_to_hex(&hex_to_bytes(s)?))
}

pub fn is_canonical_hex(s: &str) -> bool {
    s.len() % 2 == 0
        && s.bytes()
            .all(|c| c.is_ascii_digit() || (b'a'..=b'f').contains(&c))
}

/// Messages beginning with `0x` are hex-encoded byte strings; anything else is signed as its UTF-8 bytes.
pub fn message_to_bytes(message: &str) -> Result<Vec<u8>> {
    if message.starts_with(HEX_PREFIX) {
        hex_to_bytes(message)
    } else {
        Ok(message.as_bytes().to_vec())
    }
}
