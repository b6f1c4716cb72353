use crate::{Error, KeyRecord, KeyRecordFilter, KeyStorage, Result};
use key_lifecycle_core::{KeyPair, KeyStatus};
use std::sync::Arc;

/// Transactional CRUD over key records, plus the key lifecycle boundary operations.  Each operation
/// runs in its own transaction, which is committed on success and rolled back (by drop) on failure.
#[derive(Clone)]
pub struct KeyStore {
    key_storage_a: Arc<dyn KeyStorage>,
}

impl KeyStore {
    /// Create a new KeyStore using the given KeyStorage implementation.
    pub fn new(key_storage_a: Arc<dyn KeyStorage>) -> Self {
        Self { key_storage_a }
    }
    /// Store a new key record, returning its assigned id.  Both keys may be given in any accepted hex
    /// form, and are stored in canonical form.
    pub async fn put(&self, public_key: &str, private_key: &str, status: KeyStatus) -> Result<i64> {
        let key_record = KeyRecord::new(public_key, private_key, status)?;
        let mut transaction_b = self.key_storage_a.begin_transaction().await?;
        let key_id = self
            .key_storage_a
            .add_key_record(Some(transaction_b.as_mut()), key_record)
            .await?;
        transaction_b.commit().await?;
        tracing::debug!(key_id, %status, "stored key record");
        Ok(key_id)
    }
    /// All key records, in ascending id order.
    pub async fn get_all(&self) -> Result<Vec<KeyRecord>> {
        self.get_all_with_filter(&KeyRecordFilter::default()).await
    }
    pub async fn get_all_with_filter(
        &self,
        key_record_filter: &KeyRecordFilter,
    ) -> Result<Vec<KeyRecord>> {
        let mut transaction_b = self.key_storage_a.begin_transaction().await?;
        let key_record_v = self
            .key_storage_a
            .get_key_records(Some(transaction_b.as_mut()), key_record_filter)
            .await?;
        transaction_b.commit().await?;
        for key_record in key_record_v.iter() {
            key_record.validate()?;
        }
        Ok(key_record_v)
    }
    /// The most recently inserted key record (i.e. greatest id), if any.
    pub async fn get_latest(&self) -> Result<Option<KeyRecord>> {
        let mut transaction_b = self.key_storage_a.begin_transaction().await?;
        let key_record_o = self
            .key_storage_a
            .get_latest_key_record(Some(transaction_b.as_mut()))
            .await?;
        transaction_b.commit().await?;
        if let Some(key_record) = key_record_o.as_ref() {
            key_record.validate()?;
        }
        Ok(key_record_o)
    }
    pub async fn get_by_id(&self, key_id: i64) -> Result<Option<KeyRecord>> {
        let mut transaction_b = self.key_storage_a.begin_transaction().await?;
        let key_record_o = self
            .key_storage_a
            .get_key_record(Some(transaction_b.as_mut()), key_id)
            .await?;
        transaction_b.commit().await?;
        if let Some(key_record) = key_record_o.as_ref() {
            key_record.validate()?;
        }
        Ok(key_record_o)
    }
    /// Irreversibly delete the key record.  Returns Error::NotFound if there is no such record.
    pub async fn delete_by_id(&self, key_id: i64) -> Result<()> {
        let mut transaction_b = self.key_storage_a.begin_transaction().await?;
        self.key_storage_a
            .delete_key_record(Some(transaction_b.as_mut()), key_id)
            .await?;
        transaction_b.commit().await?;
        tracing::debug!(key_id, "deleted key record");
        Ok(())
    }
    /// Replace the status of the key record, leaving everything else unchanged.  The existence check
    /// and the write are a single conditional write within one transaction, so the transaction never
    /// holds a read lock that has to be upgraded.  Returns Error::NotFound if there is no such record.
    pub async fn update_status(&self, key_id: i64, status: KeyStatus) -> Result<()> {
        let mut transaction_b = self.key_storage_a.begin_transaction().await?;
        self.key_storage_a
            .update_key_record_status(Some(transaction_b.as_mut()), key_id, status)
            .await?;
        transaction_b.commit().await?;
        tracing::debug!(key_id, %status, "updated key status");
        Ok(())
    }

    //
    // Boundary operations
    //

    /// Generate a fresh key pair and store it with status Active, returning the new record's id.
    pub async fn generate_and_store(&self) -> Result<i64> {
        let (public_key, private_key) = KeyPair::generate().into_parts();
        let key_id = self.put(&public_key, &private_key, KeyStatus::Active).await?;
        tracing::info!(key_id, %public_key, "generated key");
        Ok(key_id)
    }
    pub async fn list_keys(&self) -> Result<Vec<KeyRecord>> {
        self.get_all().await
    }
    pub async fn delete_key(&self, key_id: i64) -> Result<()> {
        self.delete_by_id(key_id).await
    }
    pub async fn set_status(&self, key_id: i64, status: KeyStatus) -> Result<()> {
        self.update_status(key_id, status).await
    }
    /// Load the key record and sign the message with it.  Refuses unless the key's status is Active.
    pub async fn sign_with_key_id(&self, key_id: i64, message: &str) -> Result<String> {
        let key_record = self
            .get_by_id(key_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("key record with id {}", key_id).into()))?;
        crate::sign_with_key_record_async(message, &key_record).await
    }
}
