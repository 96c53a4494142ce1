//! # folio-auth
//!
//! Identity and access primitives for the folio content API.
//!
//! This crate provides:
//! - Argon2id password hashing and verification ([`password`])
//! - Ed25519 keypair management for token signing ([`keys`])
//! - A stateless token authority that issues and validates time-bounded
//!   bearer tokens ([`token`])
//! - Credential checking for the login handshake ([`login`])
//!
//! ## Token Lifecycle
//!
//! | Step | Performed By | Input | Output |
//! |------|--------------|-------|--------|
//! | Login | [`login::authenticate`] | username + password | verified username |
//! | Issue | [`TokenAuthority::issue`] | verified username | signed Biscuit (base64) |
//! | Validate | [`TokenAuthority::validate`] | presented token | [`TokenClaims`] |
//!
//! Validity depends only on the signature and the embedded expiry; nothing
//! is persisted server-side and there is no revocation list.

pub mod claims;
pub mod clock;
pub mod error;
pub mod keys;
pub mod login;
pub mod password;
pub mod token;

pub use claims::TokenClaims;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::AuthError;
pub use keys::KeyPair;
pub use login::{Credential, authenticate};
pub use password::{hash_password, verify_password};
pub use token::{IssuedToken, TokenAuthority, TokenSettings};
