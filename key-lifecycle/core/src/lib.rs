mod error;
pub mod hex_encoding;
mod key_pair;
mod key_status;
pub mod signing;

pub use crate::{
    error::Error,
    hex_encoding::{
        bytes_to_hex, bytes_to_prefixed_hex, hex_to_bytes, is_canonical_hex, message_to_bytes,
        normalize_hex, string_to_hex, HEX_PREFIX,
    },
    key_pair::KeyPair,
    key_status::KeyStatus,
    signing::{
        public_key_of, sign, sign_async, sign_hex, sign_hex_async, verify, verify_async,
        verify_hex, verify_hex_async, PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
    },
};

pub type Result<T> = std::result::Result<T, Error>;

/// This function returns the current time in UTC with millisecond precision, which is the precision
/// at which key record timestamps are stored.
pub fn now_utc_milliseconds() -> time::OffsetDateTime {
    let now = time::OffsetDateTime::now_utc();
    let truncated_nanos = now.unix_timestamp_nanos() / 1_000_000 * 1_000_000;
    // Truncation toward zero of a valid timestamp is itself a valid timestamp.
    time::OffsetDateTime::from_unix_timestamp_nanos(truncated_nanos).unwrap_or(now)
}

/// Number of milliseconds since the Unix epoch for the given time (truncating sub-millisecond precision).
pub fn unix_timestamp_milliseconds(t: time::OffsetDateTime) -> i64 {
    (t.unix_timestamp_nanos() / 1_000_000) as i64
}

/// Inverse of unix_timestamp_milliseconds.
pub fn offset_date_time_from_unix_milliseconds(milliseconds: i64) -> Result<time::OffsetDateTime> {
    time::OffsetDateTime::from_unix_timestamp_nanos(milliseconds as i128 * 1_000_000).map_err(|e| {
        Error::Malformed(format!("timestamp {} ms is out of range: {}", milliseconds, e).into())
    })
}
