use crate::db::{RowId, SigilT, Table};
use key_lifecycle_core::KeyStatus;
use key_lifecycle_store::{Error, KeyRecord, KeyRecordFilter, Result};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Sigil representing the keys table.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
struct Keys;

impl SigilT for Keys {}

/// Corresponds to `keys` table in sqlite impl.
#[derive(Clone, Debug)]
struct KeyRow {
    public_key: String,
    private_key: String,
    timestamp: i64,
    status: KeyStatus,
}

impl KeyRow {
    fn into_key_record(self, row_id: RowId<Keys>) -> KeyRecord {
        KeyRecord {
            key_id_o: Some(*row_id),
            public_key: self.public_key,
            private_key: self.private_key,
            timestamp: self.timestamp,
            status: self.status,
        }
    }
}

type KeysTable = Table<Keys, KeyRow>;

#[derive(Clone, Debug)]
struct KeyStorageMockState {
    keys_table: KeysTable,
}

impl KeyStorageMockState {
    fn new() -> Self {
        Self {
            keys_table: KeysTable::new(),
        }
    }
    fn add_key_record(&mut self, key_record: KeyRecord) -> Result<i64> {
        if let Some(key_id) = key_record.key_id_o {
            return Err(Error::Malformed(
                format!("key record to be added already has id {}", key_id).into(),
            ));
        }
        let row_id = self.keys_table.insert(KeyRow {
            public_key: key_record.public_key,
            private_key: key_record.private_key,
            timestamp: key_record.timestamp,
            status: key_record.status,
        });
        Ok(*row_id)
    }
    fn get_key_records(&self, key_record_filter: &KeyRecordFilter) -> Vec<KeyRecord> {
        self.keys_table
            .row_iter()
            .map(|(&row_id, key_row)| key_row.clone().into_key_record(row_id))
            .filter(|key_record| key_record_filter.matches(key_record))
            .collect()
    }
    fn get_latest_key_record(&self) -> Option<KeyRecord> {
        self.keys_table
            .select_last()
            .map(|(row_id, key_row)| key_row.clone().into_key_record(row_id))
    }
    fn get_key_record(&self, key_id: i64) -> Option<KeyRecord> {
        let row_id = RowId::from(key_id);
        self.keys_table
            .select_by_row_id(row_id)
            .map(|key_row| key_row.clone().into_key_record(row_id))
    }
    fn delete_key_record(&mut self, key_id: i64) -> Result<()> {
        self.keys_table.remove(RowId::from(key_id))?;
        Ok(())
    }
    fn update_key_record_status(&mut self, key_id: i64, status: KeyStatus) -> Result<()> {
        self.keys_table
            .update(RowId::from(key_id), |key_row| key_row.status = status)?;
        Ok(())
    }
}

/// In-memory KeyStorage with real transaction semantics.  A transaction holds the exclusive lock on
/// the state for its whole lifetime and works on a copy of it, which replaces the state on commit and
/// is discarded otherwise.  Thus transactions are fully serialized.
///
/// Calling a KeyStorage method with no transaction while the same task holds a transaction from this
/// KeyStorageMock will deadlock.
#[derive(Clone)]
pub struct KeyStorageMock {
    state_la: Arc<tokio::sync::Mutex<KeyStorageMockState>>,
    unavailable_a: Arc<AtomicBool>,
}

impl KeyStorageMock {
    pub fn new() -> Self {
        Self {
            state_la: Arc::new(tokio::sync::Mutex::new(KeyStorageMockState::new())),
            unavailable_a: Arc::new(AtomicBool::new(false)),
        }
    }
    /// While set, beginning a transaction (or calling a method without one) fails as if the backend
    /// could not be opened.  Transactions that are already in progress are unaffected.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable_a.store(unavailable, Ordering::SeqCst);
    }
    fn ensure_available(&self) -> storage_traits::Result<()> {
        if self.unavailable_a.load(Ordering::SeqCst) {
            Err(storage_traits::Error::OpenFailed(
                "KeyStorageMock is set to be unavailable".into(),
            ))
        } else {
            Ok(())
        }
    }
    /// Runs f against the transaction's working state if a transaction is given, and otherwise against
    /// a copy of the committed state which is kept only if f succeeds.
    async fn with_state<R: Send>(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        f: impl FnOnce(&mut KeyStorageMockState) -> Result<R> + Send,
    ) -> Result<R> {
        match transaction_o {
            Some(transaction) => {
                let key_storage_mock_transaction = transaction
                    .as_any_mut()
                    .downcast_mut::<KeyStorageMockTransaction>()
                    .ok_or_else(|| {
                        Error::TransactionError(
                            "transaction does not belong to a KeyStorageMock".into(),
                        )
                    })?;
                let working_state = key_storage_mock_transaction
                    .working_state_o
                    .as_mut()
                    .ok_or_else(|| {
                        Error::TransactionError("transaction has already finished".into())
                    })?;
                f(working_state)
            }
            None => {
                self.ensure_available()?;
                let mut state_g = self.state_la.lock().await;
                let mut working_state = (*state_g).clone();
                let r = f(&mut working_state)?;
                *state_g = working_state;
                Ok(r)
            }
        }
    }
}

impl Default for KeyStorageMock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyStorageMock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStorageMock")
            .field("unavailable", &self.unavailable_a.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl storage_traits::StorageDynT for KeyStorageMock {
    async fn begin_transaction(
        &self,
    ) -> storage_traits::Result<Box<dyn storage_traits::TransactionDynT>> {
        self.ensure_available()?;
        let state_g = self.state_la.clone().lock_owned().await;
        let working_state = (*state_g).clone();
        Ok(Box::new(KeyStorageMockTransaction {
            state_g,
            working_state_o: Some(working_state),
        }))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl key_lifecycle_store::KeyStorage for KeyStorageMock {
    async fn add_key_record(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_record: KeyRecord,
    ) -> Result<i64> {
        let key_id = self
            .with_state(transaction_o, |state| state.add_key_record(key_record))
            .await?;
        tracing::trace!(key_id, "KeyStorageMock added key record");
        Ok(key_id)
    }
    async fn get_key_records(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_record_filter: &KeyRecordFilter,
    ) -> Result<Vec<KeyRecord>> {
        self.with_state(transaction_o, |state| {
            Ok(state.get_key_records(key_record_filter))
        })
        .await
    }
    async fn get_latest_key_record(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
    ) -> Result<Option<KeyRecord>> {
        self.with_state(transaction_o, |state| Ok(state.get_latest_key_record()))
            .await
    }
    async fn get_key_record(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_id: i64,
    ) -> Result<Option<KeyRecord>> {
        self.with_state(transaction_o, |state| Ok(state.get_key_record(key_id)))
            .await
    }
    async fn delete_key_record(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_id: i64,
    ) -> Result<()> {
        self.with_state(transaction_o, |state| state.delete_key_record(key_id))
            .await
    }
    async fn update_key_record_status(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_id: i64,
        status: KeyStatus,
    ) -> Result<()> {
        self.with_state(transaction_o, |state| {
            state.update_key_record_status(key_id, status)
        })
        .await
    }
}

struct KeyStorageMockTransaction {
    state_g: tokio::sync::OwnedMutexGuard<KeyStorageMockState>,
    /// None once the transaction has been committed or rolled back.
    working_state_o: Option<KeyStorageMockState>,
}

impl std::ops::Drop for KeyStorageMockTransaction {
    fn drop(&mut self) {
        // Discarding the working state is the rollback; the lock is released along with state_g.
        if self.working_state_o.take().is_some() {
            tracing::trace!("KeyStorageMock transaction dropped without commit; rolled back");
        }
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl storage_traits::TransactionDynT for KeyStorageMockTransaction {
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
    async fn commit(self: Box<Self>) -> storage_traits::Result<()> {
        let mut transaction = self;
        let working_state = transaction.working_state_o.take().ok_or_else(|| {
            storage_traits::Error::TransactionFailed("transaction has already finished".into())
        })?;
        *transaction.state_g = working_state;
        Ok(())
    }
    async fn rollback(self: Box<Self>) -> storage_traits::Result<()> {
        let mut transaction = self;
        transaction.working_state_o = None;
        Ok(())
    }
}
