use crate::{Error, Result};
use key_lifecycle_core::{is_canonical_hex, normalize_hex, KeyStatus};

/// A stored key pair together with its lifecycle status.  Serializes to the persisted record shape:
/// `{ id, publicKey, privateKey, timestamp, status }`.
#[derive(Clone, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRecord {
    /// Assigned by the storage backend on insert, and None before then.  Ids are never reused.
    #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
    pub key_id_o: Option<i64>,
    /// Canonical hex of the raw public key bytes.
    pub public_key: String,
    /// Canonical hex of the raw private key bytes.
    pub private_key: String,
    /// Creation time, in milliseconds since the Unix epoch.  Never changes after creation.
    pub timestamp: i64,
    pub status: KeyStatus,
}

impl KeyRecord {
    /// Create a not-yet-persisted record timestamped now, normalizing both keys to canonical hex.
    pub fn new(public_key: &str, private_key: &str, status: KeyStatus) -> Result<Self> {
        Ok(Self {
            key_id_o: None,
            public_key: normalize_hex(public_key)?,
            private_key: normalize_hex(private_key)?,
            timestamp: key_lifecycle_core::unix_timestamp_milliseconds(
                key_lifecycle_core::now_utc_milliseconds(),
            ),
            status,
        })
    }
    /// Returns the id, or Error::Malformed if the record has not been persisted.
    pub fn key_id(&self) -> Result<i64> {
        self.key_id_o.ok_or_else(|| {
            Error::Malformed("key record has no id; it has not been stored yet".into())
        })
    }
    pub fn created_at(&self) -> Result<time::OffsetDateTime> {
        Ok(key_lifecycle_core::offset_date_time_from_unix_milliseconds(
            self.timestamp,
        )?)
    }
    /// Checks the invariants that a record read back from storage must satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.key_id_o.is_none() {
            return Err(Error::RecordCorruption(
                "stored key record has no id".into(),
            ));
        }
        if !is_canonical_hex(&self.public_key) {
            return Err(Error::RecordCorruption(
                format!(
                    "public key of key record {:?} is not canonical hex",
                    self.key_id_o
                )
                .into(),
            ));
        }
        if !is_canonical_hex(&self.private_key) {
            return Err(Error::RecordCorruption(
                format!(
                    "private key of key record {:?} is not canonical hex",
                    self.key_id_o
                )
                .into(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for KeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRecord")
            .field("key_id_o", &self.key_id_o)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("timestamp", &self.timestamp)
            .field("status", &self.status)
            .finish()
    }
}
