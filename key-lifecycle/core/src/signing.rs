//! Ed25519 signing and verification over raw byte buffers.  Nothing here knows about key status;
//! the signing-requires-Active rule is checked by the callers that hold a key record.

use crate::{bytes_to_hex, hex_to_bytes, message_to_bytes, Error, Result};
use ed25519_dalek::{Signer, Verifier};

pub const PRIVATE_KEY_LENGTH: usize = ed25519_dalek::SECRET_KEY_LENGTH;
pub const PUBLIC_KEY_LENGTH: usize = ed25519_dalek::PUBLIC_KEY_LENGTH;
pub const SIGNATURE_LENGTH: usize = ed25519_dalek::SIGNATURE_LENGTH;

fn signing_key_from_bytes(private_key: &[u8]) -> Result<ed25519_dalek::SigningKey> {
    let secret_key = <ed25519_dalek::SecretKey>::try_from(private_key).map_err(|_| {
        Error::SigningError(
            format!(
                "private key must be exactly {} bytes, but it was {} bytes",
                PRIVATE_KEY_LENGTH,
                private_key.len()
            )
            .into(),
        )
    })?;
    Ok(ed25519_dalek::SigningKey::from_bytes(&secret_key))
}

/// Deterministically sign the message.  The private key must be exactly 32 bytes.
pub fn sign(message: &[u8], private_key: &[u8]) -> Result<[u8; SIGNATURE_LENGTH]> {
    let signing_key = signing_key_from_bytes(private_key)?;
    Ok(signing_key.sign(message).to_bytes())
}

/// Returns Ok(false) for any correctly sized signature and public key that don't verify, including
/// a public key that isn't a valid curve point.  Wrongly sized inputs produce Error::VerificationError.
pub fn verify(signature: &[u8], message: &[u8], public_key: &[u8]) -> Result<bool> {
    let signature_bytes = <[u8; SIGNATURE_LENGTH]>::try_from(signature).map_err(|_| {
        Error::VerificationError(
            format!(
                "signature must be exactly {} bytes, but it was {} bytes",
                SIGNATURE_LENGTH,
                signature.len()
            )
            .into(),
        )
    })?;
    let public_key_bytes = <[u8; PUBLIC_KEY_LENGTH]>::try_from(public_key).map_err(|_| {
        Error::VerificationError(
            format!(
                "public key must be exactly {} bytes, but it was {} bytes",
                PUBLIC_KEY_LENGTH,
                public_key.len()
            )
            .into(),
        )
    })?;
    let verifying_key = match ed25519_dalek::VerifyingKey::from_bytes(&public_key_bytes) {
        Ok(verifying_key) => verifying_key,
        Err(e) => {
            tracing::debug!("public key is not a valid curve point: {}", e);
            return Ok(false);
        }
    };
    let signature = ed25519_dalek::Signature::from_bytes(&signature_bytes);
    Ok(verifying_key.verify(message, &signature).is_ok())
}

/// Derive the public key belonging to the given 32-byte private key.
pub fn public_key_of(private_key: &[u8]) -> Result<[u8; PUBLIC_KEY_LENGTH]> {
    let signing_key = signing_key_from_bytes(private_key)?;
    Ok(signing_key.verifying_key().to_bytes())
}

/// Same as sign, but runs on the blocking thread pool.
pub async fn sign_async(message: &[u8], private_key: &[u8]) -> Result<[u8; SIGNATURE_LENGTH]> {
    let message = message.to_vec();
    let private_key = private_key.to_vec();
    tokio::task::spawn_blocking(move || sign(&message, &private_key))
        .await
        .map_err(|e| Error::SigningError(format!("signing task failed: {}", e).into()))?
}

/// Same as verify, but runs on the blocking thread pool.
pub async fn verify_async(signature: &[u8], message: &[u8], public_key: &[u8]) -> Result<bool> {
    let signature = signature.to_vec();
    let message = message.to_vec();
    let public_key = public_key.to_vec();
    tokio::task::spawn_blocking(move || verify(&signature, &message, &public_key))
        .await
        .map_err(|e| Error::VerificationError(format!("verification task failed: {}", e).into()))?
}

/// Sign a message given as text (see message_to_bytes) with a hex-encoded private key, returning the
/// signature as canonical hex.
pub fn sign_hex(message: &str, private_key_hex: &str) -> Result<String> {
    let message_bytes = message_to_bytes(message)?;
    let private_key_bytes = hex_to_bytes(private_key_hex)?;
    let signature = sign(&message_bytes, &private_key_bytes)?;
    Ok(bytes_to_hex(&signature))
}

pub fn verify_hex(signature_hex: &str, message: &str, public_key_hex: &str) -> Result<bool> {
    let signature_bytes = hex_to_bytes(signature_hex)?;
    let message_bytes = message_to_bytes(message)?;
    let public_key_bytes = hex_to_bytes(public_key_hex)?;
    verify(&signature_bytes, &message_bytes, &public_key_bytes)
}

pub async fn sign_hex_async(message: &str, private_key_hex: &str) -> Result<String> {
    let message_bytes = message_to_bytes(message)?;
    let private_key_bytes = hex_to_bytes(private_key_hex)?;
    let signature = sign_async(&message_bytes, &private_key_bytes).await?;
    Ok(bytes_to_hex(&signature))
}

pub async fn verify_hex_async(
    signature_hex: &str,
    message: &str,
    public_key_hex: &str,
) -> Result<bool> {
    let signature_bytes = hex_to_bytes(signature_hex)?;
    let message_bytes = message_to_bytes(message)?;
    let public_key_bytes = hex_to_bytes(public_key_hex)?;
    verify_async(&signature_bytes, &message_bytes, &public_key_bytes).await
}
