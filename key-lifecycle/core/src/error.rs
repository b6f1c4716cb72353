use crate::KeyStatus;
use std::borrow::Cow;

#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("Encoding error: {0}")]
    EncodingError(Cow<'static, str>),
    #[error("Malformed: {0}")]
    Malformed(Cow<'static, str>),
    #[error("Signing error: {0}")]
    SigningError(Cow<'static, str>),
    #[error("Signing refused: key status is {0}, and only Active keys may sign")]
    SigningRefused(KeyStatus),
    #[error("Unrecognized: {0}")]
    Unrecognized(Cow<'static, str>),
    #[error("Verification error: {0}")]
    VerificationError(Cow<'static, str>),
}
