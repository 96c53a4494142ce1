//! `folio password hash` - Produce an Argon2 digest for a stored credential.

use anyhow::Context;
use folio_auth::hash_password;

fn digest(password: &str) -> anyhow::Result<String> {
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }
    hash_password(password).context("Failed to hash password")
}

pub fn hash(password: String) -> anyhow::Result<()> {
    println!("{}", digest(&password)?);
    Ok(())
}
