//! Claims carried by a bearer token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The payload of a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username the token was issued to.
    pub subject: String,

    /// When the token was minted.
    pub issued_at: DateTime<Utc>,

    /// First instant at which the token is no longer accepted.
    pub expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// A token is live strictly before its expiry.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at.timestamp()
    }
}
