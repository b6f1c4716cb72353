//! Signing and verification at the key record boundary.  This is where the signing-requires-Active
//! rule is enforced, before any cryptographic operation runs.

use crate::{KeyRecord, Result};

/// Sign the message (see key_lifecycle_core::message_to_bytes) with the record's private key,
/// returning the signature as canonical hex.  Refuses unless the record's status is Active.
pub fn sign_with_key_record(message: &str, key_record: &KeyRecord) -> Result<String> {
    key_record.status.ensure_signing_permitted()?;
    let signature_hex = key_lifecycle_core::sign_hex(message, &key_record.private_key)?;
    tracing::debug!(key_id_o = ?key_record.key_id_o, "signed message");
    Ok(signature_hex)
}

pub async fn sign_with_key_record_async(message: &str, key_record: &KeyRecord) -> Result<String> {
    key_record.status.ensure_signing_permitted()?;
    let signature_hex =
        key_lifecycle_core::sign_hex_async(message, &key_record.private_key).await?;
    tracing::debug!(key_id_o = ?key_record.key_id_o, "signed message");
    Ok(signature_hex)
}

/// Returns Ok(false) for a well-formed signature that doesn't verify.
pub fn verify_signature_hex(
    signature_hex: &str,
    message: &str,
    public_key_hex: &str,
) -> Result<bool> {
    Ok(key_lifecycle_core::verify_hex(
        signature_hex,
        message,
        public_key_hex,
    )?)
}

pub async fn verify_signature_hex_async(
    signature_hex: &str,
    message: &str,
    public_key_hex: &str,
) -> Result<bool> {
    Ok(key_lifecycle_core::verify_hex_async(signature_hex, message, public_key_hex).await?)
}
