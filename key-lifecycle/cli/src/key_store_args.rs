use crate::Result;
use key_lifecycle_storage_sqlite::KeyStorageSQLite;
use key_lifecycle_store::KeyStore;
use std::sync::Arc;

/// Args common to CLI commands that operate on the key store.
#[derive(clap::Args)]
pub struct KeyStoreArgs {
    /// Specify the URL to the key database.  The URL must start with "sqlite://".  A leading "~" in
    /// the path is expanded, and the database (and its parent directory) is created if necessary.
    #[arg(
        env = "KEY_LIFECYCLE_DB_URL",
        short = 'u',
        long,
        value_name = "URL",
        default_value = "sqlite://~/.key-lifecycle/key-store.db?mode=rwc"
    )]
    pub db_url: String,
}

impl KeyStoreArgs {
    pub async fn open_key_store(&self) -> Result<KeyStore> {
        tracing::debug!("KeyStoreArgs::open_key_store; db_url: {}", self.db_url);
        let Some(db_path_and_query_str) = self.db_url.as_str().strip_prefix("sqlite://") else {
            anyhow::bail!(
                "Unsupported key database URL {:?}; only \"sqlite://\" URLs are supported",
                self.db_url
            );
        };
        let (db_path_str, query_o) = match db_path_and_query_str.split_once('?') {
            Some((db_path_str, query)) => (db_path_str, Some(query)),
            None => (db_path_and_query_str, None),
        };
        // Apply tilde expansion to the path.
        let db_path = expanduser::expanduser(db_path_str)?;
        tracing::debug!("Tilde-expanded key DB path: {}", db_path.display());
        if !db_path.exists() {
            if let Some(db_path_parent) = db_path.parent() {
                if !db_path_parent.as_os_str().is_empty() {
                    tracing::debug!(
                        "Ensuring key DB parent directory exists: {}",
                        db_path_parent.display()
                    );
                    std::fs::create_dir_all(db_path_parent)?;
                }
            }
        }
        let database_url = match query_o {
            Some(query) => format!("sqlite://{}?{}", db_path.display(), query),
            None => format!("sqlite://{}", db_path.display()),
        };
        tracing::debug!("Connecting to key DB at {}", database_url);
        let key_storage_sqlite = KeyStorageSQLite::open(&database_url).await?;
        Ok(KeyStore::new(Arc::new(key_storage_sqlite)))
    }
}
