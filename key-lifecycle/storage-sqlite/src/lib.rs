mod key_row;
mod key_storage_sqlite;

pub use crate::{key_row::KeyRow, key_storage_sqlite::KeyStorageSQLite};
