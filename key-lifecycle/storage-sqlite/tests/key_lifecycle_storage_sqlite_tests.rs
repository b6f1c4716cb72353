use key_lifecycle_core::KeyStatus;
use key_lifecycle_storage_sqlite::KeyStorageSQLite;
use key_lifecycle_store::{
    verify_signature_hex, Error, ErrorKind, KeyRecordFilter, KeyStore,
};
use std::sync::Arc;

#[ctor::ctor]
fn overall_init() {
    test_util::ctor_overall_init();
}

/// Each test uses its own database file under tests/, deleted at the start of the test.
async fn fresh_database(name: &str) -> (String, sqlx::SqlitePool) {
    let path = format!("tests/{}.db", name);
    for suffix in ["", "-wal", "-shm"] {
        test_util::remove_file_if_exists(&format!("{}{}", path, suffix)).expect("pass");
    }
    let database_url = test_util::sqlite_url_for_path(&path);
    let sqlite_pool = sqlx::SqlitePool::connect(&database_url)
        .await
        .expect("pass");
    (database_url, sqlite_pool)
}

async fn fresh_key_store(name: &str) -> (sqlx::SqlitePool, KeyStore) {
    let (_database_url, sqlite_pool) = fresh_database(name).await;
    let key_storage_sqlite = KeyStorageSQLite::open_and_run_migrations(sqlite_pool.clone())
        .await
        .expect("pass");
    (sqlite_pool, KeyStore::new(Arc::new(key_storage_sqlite)))
}

#[tokio::test]
async fn test_key_lifecycle_scenario_sqlite() {
    let (_sqlite_pool, key_store) = fresh_key_store("test_key_lifecycle_scenario_sqlite").await;

    let key_id = key_store
        .put(&"aa".repeat(32), &"bb".repeat(32), KeyStatus::Active)
        .await
        .expect("pass");
    assert_eq!(key_id, 1);
    let key_record_v = key_store.list_keys().await.expect("pass");
    assert_eq!(key_record_v.len(), 1);
    assert_eq!(key_record_v[0].key_id_o, Some(1));
    assert_eq!(key_record_v[0].status, KeyStatus::Active);

    key_store
        .set_status(1, KeyStatus::Revoked)
        .await
        .expect("pass");
    let error = key_store
        .sign_with_key_id(1, "hello")
        .await
        .expect_err("pass");
    assert_eq!(error.kind(), ErrorKind::SigningRefused);

    key_store.delete_key(1).await.expect("pass");
    assert!(key_store.get_by_id(1).await.expect("pass").is_none());
}

#[tokio::test]
async fn test_put_get_all_get_latest_sqlite() {
    let (_sqlite_pool, key_store) = fresh_key_store("test_put_get_all_get_latest_sqlite").await;
    assert!(key_store.get_all().await.expect("pass").is_empty());
    assert!(key_store.get_latest().await.expect("pass").is_none());

    for _ in 0..4 {
        let key_id = key_store.generate_and_store().await.expect("pass");
        let key_record_v = key_store.get_all().await.expect("pass");
        let last = key_record_v.last().expect("pass");
        assert_eq!(last.key_id_o, Some(key_id));
        assert_eq!(
            key_store.get_latest().await.expect("pass").as_ref(),
            Some(last)
        );
        assert_eq!(
            key_store.get_by_id(key_id).await.expect("pass").as_ref(),
            Some(last)
        );
    }

    key_store
        .set_status(3, KeyStatus::Expired)
        .await
        .expect("pass");
    let expired_v = key_store
        .get_all_with_filter(&KeyRecordFilter::with_status(KeyStatus::Expired))
        .await
        .expect("pass");
    assert_eq!(expired_v.len(), 1);
    assert_eq!(expired_v[0].key_id_o, Some(3));
    let active_v = key_store
        .get_all_with_filter(&KeyRecordFilter::with_status(KeyStatus::Active))
        .await
        .expect("pass");
    assert_eq!(active_v.len(), 3);
}

#[tokio::test]
async fn test_missing_ids_are_not_found_sqlite() {
    let (_sqlite_pool, key_store) = fresh_key_store("test_missing_ids_are_not_found_sqlite").await;
    key_store.generate_and_store().await.expect("pass");
    let before = key_store.get_all().await.expect("pass");

    assert!(matches!(
        key_store.delete_key(99).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        key_store.set_status(99, KeyStatus::Archived).await,
        Err(Error::NotFound(_))
    ));
    assert_eq!(key_store.get_all().await.expect("pass"), before);
}

#[tokio::test]
async fn test_ids_are_never_reused_sqlite() {
    let (_sqlite_pool, key_store) = fresh_key_store("test_ids_are_never_reused_sqlite").await;
    let key_id_1 = key_store.generate_and_store().await.expect("pass");
    let key_id_2 = key_store.generate_and_store().await.expect("pass");
    key_store.delete_key(key_id_2).await.expect("pass");
    let key_id_3 = key_store.generate_and_store().await.expect("pass");
    assert!(key_id_1 < key_id_2);
    assert!(key_id_2 < key_id_3);
}

#[tokio::test]
async fn test_persistence_across_reopen_sqlite() {
    let (database_url, sqlite_pool) = fresh_database("test_persistence_across_reopen_sqlite").await;
    sqlite_pool.close().await;

    let signature_hex;
    let public_key;
    {
        let key_store = KeyStore::new(Arc::new(
            KeyStorageSQLite::open(&database_url).await.expect("pass"),
        ));
        let key_id = key_store.generate_and_store().await.expect("pass");
        signature_hex = key_store
            .sign_with_key_id(key_id, "hello")
            .await
            .expect("pass");
        public_key = key_store
            .get_by_id(key_id)
            .await
            .expect("pass")
            .expect("pass")
            .public_key;
    }

    // Running the migrations again on an existing database is a no-op.
    let key_store = KeyStore::new(Arc::new(
        KeyStorageSQLite::open(&database_url).await.expect("pass"),
    ));
    let key_record = key_store.get_latest().await.expect("pass").expect("pass");
    assert_eq!(key_record.public_key, public_key);
    assert_eq!(
        key_store
            .sign_with_key_id(key_record.key_id().expect("pass"), "hello")
            .await
            .expect("pass"),
        signature_hex
    );
    assert!(verify_signature_hex(&signature_hex, "hello", &public_key).expect("pass"));
}

#[tokio::test]
async fn test_corrupt_records_are_detected_sqlite() {
    let (sqlite_pool, key_store) = fresh_key_store("test_corrupt_records_are_detected_sqlite").await;

    // The schema itself refuses undefined statuses.
    let insert_r = sqlx::query(
        "INSERT INTO keys(public_key, private_key, timestamp, status) VALUES ('aa', 'bb', 0, 'Deleted')",
    )
    .execute(&sqlite_pool)
    .await;
    assert!(insert_r.is_err());

    // Key material that isn't canonical hex can only have been written by something other than KeyStore.
    sqlx::query(
        "INSERT INTO keys(public_key, private_key, timestamp, status) VALUES ('AA', 'bb', 0, 'Active')",
    )
    .execute(&sqlite_pool)
    .await
    .expect("pass");
    let error = key_store.get_all().await.expect_err("pass");
    assert!(matches!(error, Error::RecordCorruption(_)));
    assert_eq!(error.kind(), ErrorKind::Corruption);
}

#[tokio::test]
async fn test_unopenable_database_sqlite() {
    let error = match KeyStorageSQLite::open(
        "sqlite:///nonexistent-directory-for-key-lifecycle-tests/keys.db?mode=rwc",
    )
    .await
    {
        Ok(_) => panic!("opening a database in a nonexistent directory should fail"),
        Err(error) => error,
    };
    assert!(matches!(error, Error::StorageOpenError(_)));
    assert_eq!(error.kind(), ErrorKind::StorageUnavailable);
}

#[tokio::test]
async fn test_cantopen_database_error_is_storage_unavailable_sqlite() {
    // This is how a pool reports a connection it can't open, whether at startup or later on.
    let error = match sqlx::SqlitePool::connect(
        "sqlite:///nonexistent-directory-for-key-lifecycle-tests/keys.db?mode=rwc",
    )
    .await
    {
        Ok(_) => panic!("opening a database in a nonexistent directory should fail"),
        Err(error) => error,
    };
    let storage_error = storage_traits::Error::from(error);
    assert!(storage_error.is_open_failure());
    assert_eq!(
        Error::from(storage_error).kind(),
        ErrorKind::StorageUnavailable
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_set_status_sqlite() {
    let (_sqlite_pool, key_store) = fresh_key_store("test_concurrent_set_status_sqlite").await;
    let key_id = key_store.generate_and_store().await.expect("pass");
    let original = key_store
        .get_by_id(key_id)
        .await
        .expect("pass")
        .expect("pass");

    let join_handle_v = (0..32)
        .map(|i| {
            let key_store = key_store.clone();
            let status = KeyStatus::VARIANTS[i % KeyStatus::VARIANTS.len()];
            tokio::spawn(async move { key_store.set_status(key_id, status).await })
        })
        .collect::<Vec<_>>();
    for join_handle in join_handle_v {
        join_handle.await.expect("pass").expect("pass");
    }

    let key_record_v = key_store.list_keys().await.expect("pass");
    assert_eq!(key_record_v.len(), 1);
    let key_record = &key_record_v[0];
    assert_eq!(key_record.key_id_o, original.key_id_o);
    assert_eq!(key_record.public_key, original.public_key);
    assert_eq!(key_record.private_key, original.private_key);
    assert_eq!(key_record.timestamp, original.timestamp);
    assert!(KeyStatus::VARIANTS.contains(&key_record.status));
}
