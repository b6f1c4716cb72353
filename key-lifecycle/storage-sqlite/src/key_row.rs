use key_lifecycle_core::KeyStatus;
use key_lifecycle_store::{Error, KeyRecord};

/// A row of the `keys` table, exactly as stored.
#[derive(sqlx::FromRow)]
pub struct KeyRow {
    pub id: i64,
    pub public_key: String,
    pub private_key: String,
    pub timestamp: i64,
    pub status: String,
}

impl TryFrom<KeyRow> for KeyRecord {
    type Error = Error;
    fn try_from(key_row: KeyRow) -> Result<Self, Self::Error> {
        let status = key_row.status.parse::<KeyStatus>().map_err(|e| {
            Error::RecordCorruption(
                format!("key record with id {} has invalid status: {}", key_row.id, e).into(),
            )
        })?;
        Ok(KeyRecord {
            key_id_o: Some(key_row.id),
            public_key: key_row.public_key,
            private_key: key_row.private_key,
            timestamp: key_row.timestamp,
            status,
        })
    }
}
