use crate::KeyRow;
use key_lifecycle_core::KeyStatus;
use key_lifecycle_store::{Error, KeyRecord, KeyRecordFilter, KeyStorage, Result};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct KeyStorageSQLite {
    sqlite_pool: SqlitePool,
}

impl KeyStorageSQLite {
    /// Connect to the SQLite database at the given URL (e.g. "sqlite:///path/to/keys.db?mode=rwc")
    /// and bring its schema up to date.
    pub async fn open(database_url: &str) -> Result<Self> {
        let sqlite_pool = SqlitePool::connect(database_url).await.map_err(|err| {
            Error::StorageOpenError(
                format!(
                    "Failed to open SQLite database {:?}; error was: {}",
                    database_url, err
                )
                .into(),
            )
        })?;
        Self::open_and_run_migrations(sqlite_pool).await
    }
    pub async fn open_and_run_migrations(sqlite_pool: SqlitePool) -> Result<Self> {
        sqlx::migrate!().run(&sqlite_pool).await.map_err(|err| {
            Error::StorageOpenError(
                format!(
                    "Failed to run SQLite database migrations; error was: {}",
                    err
                )
                .into(),
            )
        })?;
        tracing::debug!("KeyStorageSQLite migrations are up to date");
        Ok(Self { sqlite_pool })
    }
}

fn sqlite_transaction(
    transaction: &mut dyn storage_traits::TransactionDynT,
) -> Result<&mut sqlx::Transaction<'static, sqlx::Sqlite>> {
    transaction
        .as_any_mut()
        .downcast_mut::<sqlx::Transaction<'static, sqlx::Sqlite>>()
        .ok_or_else(|| {
            Error::TransactionError("transaction does not belong to a KeyStorageSQLite".into())
        })
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl storage_traits::StorageDynT for KeyStorageSQLite {
    async fn begin_transaction(
        &self,
    ) -> storage_traits::Result<Box<dyn storage_traits::TransactionDynT>> {
        Ok(Box::new(self.sqlite_pool.begin().await?))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
impl KeyStorage for KeyStorageSQLite {
    async fn add_key_record(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_record: KeyRecord,
    ) -> Result<i64> {
        if let Some(key_id) = key_record.key_id_o {
            return Err(Error::Malformed(
                format!("key record to be added already has id {}", key_id).into(),
            ));
        }
        let query = sqlx::query_scalar::<_, i64>(
            r#"
                INSERT INTO keys(public_key, private_key, timestamp, status)
                VALUES ($1, $2, $3, $4)
                RETURNING id
            "#,
        )
        .bind(key_record.public_key.as_str())
        .bind(key_record.private_key.as_str())
        .bind(key_record.timestamp)
        .bind(key_record.status.as_str());
        let key_id = if let Some(transaction) = transaction_o {
            query
                .fetch_one(sqlite_transaction(transaction)?.as_mut())
                .await?
        } else {
            query.fetch_one(&self.sqlite_pool).await?
        };
        tracing::trace!(key_id, "KeyStorageSQLite added key record");
        Ok(key_id)
    }
    async fn get_key_records(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_record_filter: &KeyRecordFilter,
    ) -> Result<Vec<KeyRecord>> {
        let status_o = key_record_filter.status_o.map(|status| status.as_str());
        let query = sqlx::query_as::<_, KeyRow>(
            r#"
                SELECT id, public_key, private_key, timestamp, status
                FROM keys
                WHERE $1 IS NULL OR status = $1
                ORDER BY id ASC
            "#,
        )
        .bind(status_o);
        let key_row_v = if let Some(transaction) = transaction_o {
            query
                .fetch_all(sqlite_transaction(transaction)?.as_mut())
                .await?
        } else {
            query.fetch_all(&self.sqlite_pool).await?
        };
        key_row_v.into_iter().map(KeyRecord::try_from).collect()
    }
    async fn get_latest_key_record(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
    ) -> Result<Option<KeyRecord>> {
        let query = sqlx::query_as::<_, KeyRow>(
            r#"
                SELECT id, public_key, private_key, timestamp, status
                FROM keys
                ORDER BY id DESC
                LIMIT 1
            "#,
        );
        let key_row_o = if let Some(transaction) = transaction_o {
            query
                .fetch_optional(sqlite_transaction(transaction)?.as_mut())
                .await?
        } else {
            query.fetch_optional(&self.sqlite_pool).await?
        };
        key_row_o.map(KeyRecord::try_from).transpose()
    }
    async fn get_key_record(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_id: i64,
    ) -> Result<Option<KeyRecord>> {
        let query = sqlx::query_as::<_, KeyRow>(
            r#"
                SELECT id, public_key, private_key, timestamp, status
                FROM keys
                WHERE id = $1
            "#,
        )
        .bind(key_id);
        let key_row_o = if let Some(transaction) = transaction_o {
            query
                .fetch_optional(sqlite_transaction(transaction)?.as_mut())
                .await?
        } else {
            query.fetch_optional(&self.sqlite_pool).await?
        };
        key_row_o.map(KeyRecord::try_from).transpose()
    }
    async fn delete_key_record(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_id: i64,
    ) -> Result<()> {
        let query = sqlx::query("DELETE FROM keys WHERE id = $1").bind(key_id);
        let query_result = if let Some(transaction) = transaction_o {
            query
                .execute(sqlite_transaction(transaction)?.as_mut())
                .await?
        } else {
            query.execute(&self.sqlite_pool).await?
        };
        if query_result.rows_affected() == 0 {
            return Err(Error::NotFound(
                format!("key record with id {}", key_id).into(),
            ));
        }
        Ok(())
    }
    async fn update_key_record_status(
        &self,
        transaction_o: Option<&mut dyn storage_traits::TransactionDynT>,
        key_id: i64,
        status: KeyStatus,
    ) -> Result<()> {
        let query = sqlx::query("UPDATE keys SET status = $1 WHERE id = $2")
            .bind(status.as_str())
            .bind(key_id);
        let query_result = if let Some(transaction) = transaction_o {
            query
                .execute(sqlite_transaction(transaction)?.as_mut())
                .await?
        } else {
            query.execute(&self.sqlite_pool).await?
        };
        if query_result.rows_affected() == 0 {
            return Err(Error::NotFound(
                format!("key record with id {}", key_id).into(),
            ));
        }
        Ok(())
    }
}
