//! Keypair management for bearer tokens.

use crate::error::AuthError;
use biscuit_auth::{Algorithm, KeyPair as BiscuitKeyPair, PrivateKey, PublicKey};
use folio_core::TokenConfig;
use rand::RngCore;
use std::path::Path;

/// An Ed25519 keypair for signing and verifying tokens.
///
/// Held for the lifetime of the process and never mutated.
pub struct KeyPair {
    inner: BiscuitKeyPair,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key_hex())
            .finish_non_exhaustive()
    }
}

impl KeyPair {
    /// Generate a new random keypair.
    pub fn generate() -> Result<Self, AuthError> {
        let mut rng = rand::rng();
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);

        let private_key = PrivateKey::from_bytes(&bytes, Algorithm::Ed25519)
            .map_err(|e| AuthError::KeyGenerationFailed(e.to_string()))?;
        let inner = BiscuitKeyPair::from(&private_key);

        Ok(Self { inner })
    }

    /// Create a keypair from an existing private key.
    pub fn from_private_key(private_key: PrivateKey) -> Self {
        let inner = BiscuitKeyPair::from(&private_key);
        Self { inner }
    }

    /// Load a keypair from a hex-encoded private key string.
    pub fn from_private_key_hex(hex: &str) -> Result<Self, AuthError> {
        let private_key = PrivateKey::from_bytes_hex(hex, Algorithm::Ed25519)
            .map_err(|e| AuthError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self::from_private_key(private_key))
    }

    /// Load a keypair from a private key file.
    pub fn load_from_file(private_key_path: &Path) -> Result<Self, AuthError> {
        let hex = std::fs::read_to_string(private_key_path)?;
        Self::from_private_key_hex(hex.trim())
    }

    /// Resolve the signing key from configuration, generating an ephemeral
    /// one when none is configured.
    ///
    /// Tokens signed with an ephemeral key stop validating after a restart.
    pub fn load_or_generate(config: &TokenConfig) -> Result<Self, AuthError> {
        match config.resolve_private_key()? {
            Some(hex) => {
                let keypair = Self::from_private_key_hex(&hex)?;
                tracing::info!(public_key = %keypair.public_key_hex(), "Loaded token signing key");
                Ok(keypair)
            }
            None => {
                let keypair = Self::generate()?;
                tracing::warn!(
                    public_key = %keypair.public_key_hex(),
                    "No token signing key configured; generated an ephemeral key"
                );
                Ok(keypair)
            }
        }
    }

    /// Get the inner biscuit keypair.
    pub fn inner(&self) -> &BiscuitKeyPair {
        &self.inner
    }

    /// Get the public key.
    pub fn public_key(&self) -> PublicKey {
        self.inner.public()
    }

    /// Get the private key as hex string.
    pub fn private_key_hex(&self) -> String {
        self.inner.private().to_bytes_hex()
    }

    /// Get the public key as hex string.
    pub fn public_key_hex(&self) -> String {
        self.inner.public().to_bytes_hex()
    }

    /// Save the keypair to files.
    pub fn save_to_files(
        &self,
        private_key_path: &Path,
        public_key_path: &Path,
    ) -> Result<(), AuthError> {
        std::fs::write(private_key_path, self.private_key_hex())?;
        std::fs::write(public_key_path, self.public_key_hex())?;
        Ok(())
    }
}
