use crate::{KeyRecord, KeyRecordFilter, Result};
use key_lifecycle_core::KeyStatus;

/// Trait which defines the storage interface for a KeyStore.  Each method runs within the given
/// transaction if one is supplied, and otherwise directly against the backend.
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait KeyStorage: Send + storage_traits::StorageDynT + Sync {
    /// Insert the record, returning its newly assigned id.  The record must not already have an id.
    async fn add_key_record(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_record: KeyRecord,
    ) -> Result<i64>;
    /// Returns the matching records in ascending id order.
    async fn get_key_records(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_record_filter: &KeyRecordFilter,
    ) -> Result<Vec<KeyRecord>>;
    /// Returns the record with the greatest id, which is the one most recently inserted.
    async fn get_latest_key_record(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
    ) -> Result<Option<KeyRecord>>;
    async fn get_key_record(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_id: i64,
    ) -> Result<Option<KeyRecord>>;
    /// Returns Error::NotFound if there is no such record.
    async fn delete_key_record(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_id: i64,
    ) -> Result<()>;
    /// Replaces only the status of the record.  Returns Error::NotFound if there is no such record.
    async fn update_key_record_status(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_id: i64,
        status: KeyStatus,
    ) -> Result<()>;
}
