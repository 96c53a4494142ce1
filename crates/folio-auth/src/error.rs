//! Error types for the auth crate.

use thiserror::Error;

/// Errors that can occur while authenticating a caller.
///
/// The first four variants are rejections of the caller; everything else is an
/// operational failure on the server side.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No bearer token was presented.
    #[error("missing bearer token")]
    MissingToken,

    /// Token could not be parsed or its signature did not verify.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Signature verified but the token is past its expiry.
    #[error("token has expired at {expired_at}")]
    ExpiredToken { expired_at: String },

    /// Failed to hash a password.
    #[error("failed to hash password: {0}")]
    HashingFailed(String),

    /// Failed to generate keypair.
    #[error("failed to generate keypair: {0}")]
    KeyGenerationFailed(String),

    /// Failed to parse private key.
    #[error("failed to parse private key: {0}")]
    InvalidPrivateKey(String),

    /// Failed to create token.
    #[error("failed to create token: {0}")]
    TokenCreationFailed(String),

    /// IO error (reading/writing keys).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AuthError {
    /// Whether this error rejects the caller rather than signalling a server fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::MissingToken
                | AuthError::InvalidToken(_)
                | AuthError::ExpiredToken { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_classification() {
        assert!(AuthError::InvalidCredentials.is_rejection());
        assert!(AuthError::MissingToken.is_rejection());
        assert!(AuthError::InvalidToken("bad".into()).is_rejection());
        assert!(
            AuthError::ExpiredToken {
                expired_at: "now".into()
            }
            .is_rejection()
        );
        assert!(!AuthError::HashingFailed("oom".into()).is_rejection());
        assert!(!AuthError::TokenCreationFailed("x".into()).is_rejection());
    }
}
