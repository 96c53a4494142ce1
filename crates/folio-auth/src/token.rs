//! Token issuance and validation.
//!
//! Tokens are Biscuits signed with the server's Ed25519 key. The authority
//! block carries three facts and one check:
//!
//! ```text
//! user("admin");
//! issued_at(1700000000);
//! expires_at(1700001800);
//! check if time($time), $time < 1700001800;
//! ```
//!
//! Validation supplies `time(now)` from the caller, so expiry is decided by
//! the injected clock rather than the system clock.

use crate::claims::TokenClaims;
use crate::clock::{Clock, SystemClock};
use crate::error::AuthError;
use crate::keys::KeyPair;
use biscuit_auth::builder::AuthorizerBuilder;
use biscuit_auth::macros::{check, fact};
use biscuit_auth::{Authorizer, AuthorizerLimits, Biscuit};
use chrono::{DateTime, Duration, Utc};
use folio_core::TokenConfig;
use std::sync::Arc;

/// Wall-clock budget for one Datalog evaluation.
///
/// The library default of one millisecond is routinely exceeded on a
/// contended runtime, which would reject a valid token.
const AUTHORIZER_MAX_TIME: std::time::Duration = std::time::Duration::from_millis(250);

/// Fixed parameters of the token authority.
#[derive(Debug, Clone, Copy)]
pub struct TokenSettings {
    /// How long an issued token remains valid.
    pub lifetime: Duration,
}

impl TokenSettings {
    pub fn new(lifetime: Duration) -> Self {
        Self { lifetime }
    }

    /// Settings for a lifetime given in whole minutes.
    ///
    /// Zero, and anything too large for a `chrono::Duration`, is refused.
    pub fn from_minutes(minutes: u64) -> Result<Self, AuthError> {
        let lifetime = i64::try_from(minutes)
            .ok()
            .and_then(Duration::try_minutes)
            .filter(|d| *d > Duration::zero())
            .ok_or_else(|| {
                AuthError::TokenCreationFailed(format!(
                    "token lifetime of {minutes} minutes is out of range"
                ))
            })?;
        Ok(Self::new(lifetime))
    }

    /// Build settings from the `token` configuration section.
    pub fn from_config(config: &TokenConfig) -> Result<Self, AuthError> {
        Self::from_minutes(config.lifetime_minutes)
    }
}

/// A freshly minted token together with its claims.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Base64-encoded signed token.
    pub token: String,
    pub claims: TokenClaims,
}

/// Issues and validates bearer tokens.
///
/// Cheap to clone; the key is shared and never mutated after construction.
#[derive(Clone)]
pub struct TokenAuthority {
    keypair: Arc<KeyPair>,
    settings: TokenSettings,
    clock: Arc<dyn Clock>,
}

impl TokenAuthority {
    /// Create an authority backed by the wall clock.
    pub fn new(keypair: KeyPair, settings: TokenSettings) -> Self {
        Self::with_clock(keypair, settings, Arc::new(SystemClock))
    }

    /// Create an authority with an explicit time source.
    pub fn with_clock(keypair: KeyPair, settings: TokenSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            keypair: Arc::new(keypair),
            settings,
            clock,
        }
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Issue a token for `subject` at the clock's current time.
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, AuthError> {
        self.issue_at(subject, self.clock.now())
    }

    /// Issue a token for `subject` as of `now`.
    pub fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        if subject.is_empty() {
            return Err(AuthError::TokenCreationFailed(
                "subject must not be empty".to_string(),
            ));
        }

        let issued_at = now.timestamp();
        let expires_at = issued_at
            .checked_add(self.settings.lifetime.num_seconds())
            .ok_or_else(|| {
                AuthError::TokenCreationFailed("time overflow computing expiry".to_string())
            })?;

        let biscuit = Biscuit::builder()
            .fact(fact!("user({subject})", subject = subject.to_string()))
            .and_then(|b| b.fact(fact!("issued_at({issued_at})", issued_at = issued_at)))
            .and_then(|b| b.fact(fact!("expires_at({expires_at})", expires_at = expires_at)))
            .and_then(|b| {
                b.check(check!(
                    "check if time($time), $time < {expires_at}",
                    expires_at = expires_at
                ))
            })
            .map_err(|e| AuthError::TokenCreationFailed(e.to_string()))?
            .build(self.keypair.inner())
            .map_err(|e| AuthError::TokenCreationFailed(e.to_string()))?;

        let token = biscuit
            .to_base64()
            .map_err(|e| AuthError::TokenCreationFailed(e.to_string()))?;

        let claims = TokenClaims {
            subject: subject.to_string(),
            issued_at: timestamp(issued_at)?,
            expires_at: timestamp(expires_at)?,
        };

        tracing::debug!(subject, expires_at = %claims.expires_at, "Issued bearer token");

        Ok(IssuedToken { token, claims })
    }

    /// Validate a presented token at the clock's current time.
    pub fn validate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        self.validate_at(token, self.clock.now())
    }

    /// Validate a presented token as of `now`.
    ///
    /// Succeeds only if the signature verifies against this authority's key
    /// and `now` is strictly before the embedded expiry.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidToken("empty token".to_string()));
        }

        let biscuit = Biscuit::from_base64(token, self.keypair.public_key())
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let now_ts = now.timestamp();
        let mut authorizer = AuthorizerBuilder::new()
            .code(format!(
                r#"
                time({now_ts});
                allow if user($u);
                "#
            ))
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .set_limits(AuthorizerLimits {
                max_time: AUTHORIZER_MAX_TIME,
                ..Default::default()
            })
            .build(&biscuit)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let subject = query_first_string(&mut authorizer, "data($u) <- user($u)")?
            .ok_or_else(|| AuthError::InvalidToken("missing claim: user".to_string()))?;
        let issued_at = query_first_i64(&mut authorizer, "data($t) <- issued_at($t)")?
            .ok_or_else(|| AuthError::InvalidToken("missing claim: issued_at".to_string()))?;
        let expires_at = query_first_i64(&mut authorizer, "data($t) <- expires_at($t)")?
            .ok_or_else(|| AuthError::InvalidToken("missing claim: expires_at".to_string()))?;

        let claims = TokenClaims {
            subject,
            issued_at: timestamp(issued_at).map_err(|e| AuthError::InvalidToken(e.to_string()))?,
            expires_at: timestamp(expires_at)
                .map_err(|e| AuthError::InvalidToken(e.to_string()))?,
        };

        if claims.is_expired_at(now) {
            return Err(AuthError::ExpiredToken {
                expired_at: claims.expires_at.to_rfc3339(),
            });
        }

        authorizer
            .authorize()
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(claims)
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, AuthError> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| AuthError::TokenCreationFailed(format!("timestamp {secs} out of range")))
}

fn query_first_string(
    authorizer: &mut Authorizer,
    rule: &str,
) -> Result<Option<String>, AuthError> {
    let res: Vec<(String,)> = authorizer
        .query(rule)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    Ok(res.into_iter().next().map(|t| t.0))
}

fn query_first_i64(authorizer: &mut Authorizer, rule: &str) -> Result<Option<i64>, AuthError> {
    let res: Vec<(i64,)> = authorizer
        .query(rule)
        .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
    Ok(res.into_iter().next().map(|t| t.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use biscuit_auth::builder::BlockBuilder;

    const T0: i64 = 1_700_000_000;

    fn authority() -> TokenAuthority {
        TokenAuthority::with_clock(
            KeyPair::generate().unwrap(),
            TokenSettings::new(Duration::minutes(30)),
            Arc::new(FixedClock::at_timestamp(T0)),
        )
    }

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_issue_and_validate() {
        let authority = authority();
        let issued = authority.issue("admin").unwrap();

        assert_eq!(issued.claims.subject, "admin");
        assert_eq!(issued.claims.issued_at, at(T0));
        assert_eq!(issued.claims.expires_at, at(T0 + 30 * 60));

        let claims = authority.validate(&issued.token).unwrap();
        assert_eq!(claims, issued.claims);
    }

    #[test]
    fn test_expiry_boundary() {
        let authority = authority();
        let issued = authority.issue_at("admin", at(T0)).unwrap();
        let expires_at = issued.claims.expires_at.timestamp();

        let claims = authority
            .validate_at(&issued.token, at(expires_at - 1))
            .unwrap();
        assert_eq!(claims.subject, "admin");

        let at_expiry = authority.validate_at(&issued.token, at(expires_at));
        assert!(matches!(at_expiry, Err(AuthError::ExpiredToken { .. })));

        let after = authority.validate_at(&issued.token, at(expires_at + 1));
        assert!(matches!(after, Err(AuthError::ExpiredToken { .. })));
    }

    #[test]
    fn test_token_from_another_key_is_rejected() {
        let ours = authority();
        let theirs = authority();

        let forged = theirs.issue("admin").unwrap();
        let result = ours.validate(&forged.token);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let authority = authority();
        let issued = authority.issue("admin").unwrap();

        let mut bytes = issued.token.into_bytes();
        let mid = bytes.len() / 2;
        bytes[mid] = if bytes[mid] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(authority.validate(&tampered).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let authority = authority();
        for input in ["", "   ", "invalid_token_here", "a.b.c", "%%%%", "AAAA"] {
            let err = authority.validate(input).unwrap_err();
            assert!(
                matches!(err, AuthError::InvalidToken(_)),
                "{input:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_subject_is_not_interpreted() {
        let authority = authority();
        let subject = r#"ad"min"); user("root"#;
        let issued = authority.issue(subject).unwrap();

        let claims = authority.validate(&issued.token).unwrap();
        assert_eq!(claims.subject, subject);
    }

    #[test]
    fn test_empty_subject_is_refused() {
        let authority = authority();
        assert!(matches!(
            authority.issue(""),
            Err(AuthError::TokenCreationFailed(_))
        ));
    }

    #[test]
    fn test_settings_from_config() {
        let config = TokenConfig {
            lifetime_minutes: 45,
            ..Default::default()
        };
        let settings = TokenSettings::from_config(&config).unwrap();
        assert_eq!(settings.lifetime, Duration::minutes(45));

        let zero = TokenConfig {
            lifetime_minutes: 0,
            ..Default::default()
        };
        assert!(TokenSettings::from_config(&zero).is_err());
    }

    #[test]
    fn test_settings_from_minutes_range() {
        assert_eq!(
            TokenSettings::from_minutes(1).unwrap().lifetime,
            Duration::minutes(1)
        );
        assert!(matches!(
            TokenSettings::from_minutes(0),
            Err(AuthError::TokenCreationFailed(_))
        ));
        assert!(TokenSettings::from_minutes(u64::MAX).is_err());
    }

    #[test]
    fn test_concurrent_validation_never_rejects_a_good_token() {
        let authority = authority();
        let issued = authority.issue("admin").unwrap();

        let threads = std::thread::available_parallelism()
            .map(|n| n.get() * 2)
            .unwrap_or(8)
            .max(8);
        let failures: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    s.spawn(|| {
                        (0..200)
                            .filter(|_| authority.validate(&issued.token).is_err())
                            .count()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(failures, 0);
    }

    #[test]
    fn test_appended_block_cannot_change_subject() {
        let authority = authority();
        let issued = authority.issue("admin").unwrap();

        let attenuated = Biscuit::from_base64(&issued.token, authority.keypair.public_key())
            .unwrap()
            .append(
                BlockBuilder::new()
                    .fact(fact!("user({u})", u = "root"))
                    .unwrap(),
            )
            .unwrap()
            .to_base64()
            .unwrap();

        let claims = authority.validate(&attenuated).unwrap();
        assert_eq!(claims.subject, "admin");
    }

    #[test]
    fn test_appended_check_still_applies() {
        let authority = authority();
        let issued = authority.issue("admin").unwrap();

        let restricted = Biscuit::from_base64(&issued.token, authority.keypair.public_key())
            .unwrap()
            .append(
                BlockBuilder::new()
                    .check(check!("check if time($t), $t < {cutoff}", cutoff = T0))
                    .unwrap(),
            )
            .unwrap()
            .to_base64()
            .unwrap();

        assert!(matches!(
            authority.validate(&restricted),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
