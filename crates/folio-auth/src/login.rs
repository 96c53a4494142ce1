//! Credential checking for the login handshake.

use crate::error::AuthError;
use crate::password::{hash_password, verify_password};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Plaintext behind [`DECOY_DIGEST`]. The decoy path rejects even on a match.
const DECOY_PASSWORD: &str = "folio-decoy-credential";

/// Digest verified when no credential exists, so unknown usernames cost the
/// same Argon2 work as wrong passwords.
static DECOY_DIGEST: LazyLock<Option<String>> =
    LazyLock::new(|| match hash_password(DECOY_PASSWORD) {
        Ok(digest) => Some(digest),
        Err(e) => {
            tracing::error!(error = %e, "Failed to prepare decoy password digest");
            None
        }
    });

/// A stored administrator credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    /// Case-sensitive login name.
    pub username: String,

    /// Argon2 PHC string.
    #[serde(rename = "hashedPassword")]
    pub password_hash: String,
}

/// Check a login attempt against the credential stored for `username`.
///
/// `credential` is whatever the caller found for that username (if anything).
/// Unknown users and wrong passwords produce the same error.
pub fn authenticate(
    credential: Option<&Credential>,
    username: &str,
    password: &str,
) -> Result<String, AuthError> {
    let Some(credential) = credential.filter(|c| c.username == username) else {
        if let Some(digest) = DECOY_DIGEST.as_deref() {
            verify_password(password, digest);
        }
        tracing::debug!(username, "Login rejected: unknown user");
        return Err(AuthError::InvalidCredentials);
    };

    if !verify_password(password, &credential.password_hash) {
        tracing::debug!(username, "Login rejected: password mismatch");
        return Err(AuthError::InvalidCredentials);
    }

    Ok(credential.username.clone())
}
