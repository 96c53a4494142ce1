//! Token management commands.
//!
//! `folio token issue` - Issue a bearer token for a subject.
//! `folio token verify` - Check a token's signature and expiry.

use anyhow::Context;
use folio_auth::{IssuedToken, KeyPair, TokenAuthority, TokenClaims, TokenSettings};
use std::fs;
use std::path::Path;

/// Resolve a private key from either a file path or a hex-encoded string.
///
/// The key string can be:
/// - A path to a file containing a hex-encoded private key
/// - A hex-encoded private key directly (e.g. from `FOLIO_TOKEN_PRIVATE_KEY`)
fn resolve_private_key(key: Option<String>) -> anyhow::Result<KeyPair> {
    let key_str = key.context(
        "Private key not provided. Either pass --key <path|hex> or set FOLIO_TOKEN_PRIVATE_KEY",
    )?;

    let path = Path::new(&key_str);
    if path.exists() {
        return KeyPair::load_from_file(path)
            .with_context(|| format!("Failed to load private key from file: {}", path.display()));
    }

    KeyPair::from_private_key_hex(key_str.trim())
        .context("Failed to parse private key. Expected hex-encoded Ed25519 private key")
}

fn authority(key: Option<String>, lifetime_minutes: u64) -> anyhow::Result<TokenAuthority> {
    let keypair = resolve_private_key(key)?;
    let settings = TokenSettings::from_minutes(lifetime_minutes)
        .with_context(|| format!("Invalid token lifetime: {lifetime_minutes} minutes"))?;
    Ok(TokenAuthority::new(keypair, settings))
}

fn issue_token(
    key: Option<String>,
    subject: &str,
    lifetime_minutes: u64,
) -> anyhow::Result<IssuedToken> {
    let authority = authority(key, lifetime_minutes)?;
    authority
        .issue(subject)
        .with_context(|| format!("Failed to issue token for '{subject}'"))
}

fn verify_token(key: Option<String>, token: &str) -> anyhow::Result<TokenClaims> {
    // Lifetime only matters when issuing.
    let authority = authority(key, 1)?;

    let token_str = if Path::new(token).exists() {
        fs::read_to_string(token)?.trim().to_string()
    } else {
        token.to_string()
    };

    authority
        .validate(&token_str)
        .context("Token verification failed")
}

/// Issue a token and print it to stdout.
pub fn issue(key: Option<String>, subject: String, lifetime_minutes: u64) -> anyhow::Result<()> {
    let issued = issue_token(key, &subject, lifetime_minutes)?;
    eprintln!("✔ Issued token for '{}'", issued.claims.subject);
    eprintln!("  Expires: {}", issued.claims.expires_at.to_rfc3339());
    println!("{}", issued.token);
    Ok(())
}

/// Verify a token (or a file containing one) and print its claims.
pub fn verify(key: Option<String>, token: String) -> anyhow::Result<()> {
    let claims = verify_token(key, &token)?;
    println!("✔ Token is valid");
    println!();
    println!("Token Details:");
    println!("  Subject: {}", claims.subject);
    println!("  Issued:  {}", claims.issued_at.to_rfc3339());
    println!("  Expires: {}", claims.expires_at.to_rfc3339());
    Ok(())
}
