use std::borrow::Cow;

/// Distinguishes a backend that could not be reached at all from a transaction that was begun
/// (or attempted) and then failed.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage could not be opened: {0}")]
    OpenFailed(Cow<'static, str>),
    #[error("Transaction failed: {0}")]
    TransactionFailed(Cow<'static, str>),
}

impl Error {
    pub fn is_open_failure(&self) -> bool {
        matches!(self, Self::OpenFailed(_))
    }
}

#[cfg(feature = "sqlx-sqlite")]
impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        let is_open_failure = match &e {
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => true,
            sqlx::Error::Database(database_error) => {
                sqlite_primary_result_code(&**database_error)
                    .is_some_and(|code| SQLITE_OPEN_FAILURE_CODES.contains(&code))
            }
            _ => false,
        };
        if is_open_failure {
            Self::OpenFailed(Cow::Owned(e.to_string()))
        } else {
            Self::TransactionFailed(Cow::Owned(e.to_string()))
        }
    }
}

/// SQLITE_IOERR, SQLITE_CANTOPEN, SQLITE_NOTADB.  These can also show up well after startup, e.g.
/// when the pool opens a new connection.
#[cfg(feature = "sqlx-sqlite")]
const SQLITE_OPEN_FAILURE_CODES: &[i32] = &[10, 14, 26];

/// SQLite reports extended result codes, whose low byte is the primary result code.
#[cfg(feature = "sqlx-sqlite")]
fn sqlite_primary_result_code(database_error: &dyn sqlx::error::DatabaseError) -> Option<i32> {
    let code = database_error.code()?.parse::<i32>().ok()?;
    Some(code & 0xff)
}
