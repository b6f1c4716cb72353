mod error;
mod key_record;
mod key_record_filter;
mod key_signing;
mod key_storage;
mod key_store;

pub use crate::{
    error::{Error, ErrorKind},
    key_record::KeyRecord,
    key_record_filter::KeyRecordFilter,
    key_signing::{
        sign_with_key_record, sign_with_key_record_async, verify_signature_hex,
        verify_signature_hex_async,
    },
    key_storage::KeyStorage,
    key_store::KeyStore,
};
pub type Result<T> = std::result::Result<T, Error>;
