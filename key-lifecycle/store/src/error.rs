use std::borrow::Cow;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] key_lifecycle_core::Error),
    #[error("Malformed: {0}")]
    Malformed(Cow<'static, str>),
    #[error("Not found: {0}")]
    NotFound(Cow<'static, str>),
    #[error("Record corruption detected: {0}")]
    RecordCorruption(Cow<'static, str>),
    #[error("Storage could not be opened: {0}")]
    StorageOpenError(Cow<'static, str>),
    #[error("Transaction error: {0}")]
    TransactionError(Cow<'static, str>),
}

/// Coarse classification of an Error, for callers (e.g. a UI) that render a distinct message per kind.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    Corruption,
    InvalidInput,
    InvalidKeyFormat,
    NotFound,
    Signing,
    SigningRefused,
    StorageUnavailable,
    Transaction,
    Verification,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Core(core_error) => match core_error {
                key_lifecycle_core::Error::EncodingError(_) => ErrorKind::InvalidKeyFormat,
                key_lifecycle_core::Error::Malformed(_) => ErrorKind::Corruption,
                key_lifecycle_core::Error::SigningError(_) => ErrorKind::Signing,
                key_lifecycle_core::Error::SigningRefused(_) => ErrorKind::SigningRefused,
                key_lifecycle_core::Error::Unrecognized(_) => ErrorKind::InvalidInput,
                key_lifecycle_core::Error::VerificationError(_) => ErrorKind::Verification,
            },
            Self::Malformed(_) => ErrorKind::InvalidInput,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::RecordCorruption(_) => ErrorKind::Corruption,
            Self::StorageOpenError(_) => ErrorKind::StorageUnavailable,
            Self::TransactionError(_) => ErrorKind::Transaction,
        }
    }
}

impl From<storage_traits::Error> for Error {
    fn from(err: storage_traits::Error) -> Self {
        match err {
            storage_traits::Error::OpenFailed(message) => Self::StorageOpenError(message),
            storage_traits::Error::TransactionFailed(message) => Self::TransactionError(message),
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        storage_traits::Error::from(err).into()
    }
}
