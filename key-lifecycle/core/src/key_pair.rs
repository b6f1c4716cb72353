use crate::{bytes_to_hex, hex_to_bytes, Result};

/// A freshly generated (or reconstructed) Ed25519 key pair, with both halves in canonical hex.
#[derive(Clone)]
pub struct KeyPair {
    public_key: String,
    private_key: String,
}

impl KeyPair {
    /// Draw a new 32-byte private key from the OS RNG and derive its public key.
    pub fn generate() -> Self {
        let signing_key = ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng);
        Self::from_signing_key(&signing_key)
    }
    /// Reconstruct the key pair belonging to the given private key (in any accepted hex form).
    pub fn from_private_key_hex(private_key_hex: &str) -> Result<Self> {
        let private_key_bytes = hex_to_bytes(private_key_hex)?;
        let public_key_bytes = crate::public_key_of(&private_key_bytes)?;
        Ok(Self {
            public_key: bytes_to_hex(&public_key_bytes),
            private_key: bytes_to_hex(&private_key_bytes),
        })
    }
    fn from_signing_key(signing_key: &ed25519_dalek::SigningKey) -> Self {
        Self {
            public_key: bytes_to_hex(signing_key.verifying_key().as_bytes()),
            private_key: bytes_to_hex(signing_key.as_bytes()),
        }
    }
    pub fn public_key(&self) -> &str {
        &self.public_key
    }
    pub fn private_key(&self) -> &str {
        &self.private_key
    }
    /// Returns (public_key, private_key).
    pub fn into_parts(self) -> (String, String) {
        (self.public_key, self.private_key)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
