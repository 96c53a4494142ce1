//! Password hashing and verification.
//!
//! Passwords are hashed with Argon2id using a fresh random salt per call and
//! stored as PHC strings (`$argon2id$v=19$...`), which embed the salt and the
//! cost parameters alongside the digest.

use crate::error::AuthError;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hash a plaintext password into a PHC string.
pub fn hash_password(plaintext: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::HashingFailed(e.to_string()))
}

/// Check a plaintext password against a stored PHC string.
///
/// A digest that does not parse is treated as a mismatch.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    let parsed = match PasswordHash::new(digest) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash is malformed");
            return false;
        }
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let first = hash_password("admin").unwrap();
        let second = hash_password("admin").unwrap();

        assert_ne!(first, second);
        assert!(verify_password("admin", &first));
        assert!(verify_password("admin", &second));
    }

    #[test]
    fn test_case_and_whitespace_matter() {
        let hash = hash_password("Secret").unwrap();
        assert!(!verify_password("secret", &hash));
        assert!(!verify_password("Secret ", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn test_empty_password_round_trips() {
        let hash = hash_password("").unwrap();
        assert!(verify_password("", &hash));
        assert!(!verify_password(" ", &hash));
    }

    #[test]
    fn test_malformed_digest_is_false() {
        assert!(!verify_password("admin", ""));
        assert!(!verify_password("admin", "not-a-phc-string"));
        assert!(!verify_password("admin", "$argon2id$v=19$m=19456,t=2,p=1$garbage"));
        assert!(!verify_password("admin", "admin"));
    }
}
