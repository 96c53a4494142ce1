//! Bearer token configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for token signing and lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Environment variable containing the private key (hex-encoded).
    #[serde(default = "default_private_key_env")]
    pub private_key_env: Option<String>,

    /// Path to the private key file.
    #[serde(default)]
    pub private_key_file: Option<PathBuf>,

    /// How long an issued token stays valid, in minutes.
    #[serde(default = "default_lifetime_minutes")]
    pub lifetime_minutes: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            private_key_env: default_private_key_env(),
            private_key_file: None,
            lifetime_minutes: default_lifetime_minutes(),
        }
    }
}

impl TokenConfig {
    /// Resolve the private key from environment or file.
    ///
    /// A configured file that cannot be read is an error, not a fallback to
    /// an ephemeral key.
    pub fn resolve_private_key(&self) -> Result<Option<String>, std::io::Error> {
        // Try environment variable first
        if let Some(env_var) = &self.private_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.trim().is_empty()
        {
            return Ok(Some(key.trim().to_string()));
        }

        if let Some(path) = &self.private_key_file {
            let key = std::fs::read_to_string(path).map_err(|e| {
                std::io::Error::new(
                    e.kind(),
                    format!("cannot read token key file {}: {e}", path.display()),
                )
            })?;
            return Ok(Some(key.trim().to_string()));
        }

        Ok(None)
    }
}

fn default_private_key_env() -> Option<String> {
    Some("FOLIO_TOKEN_PRIVATE_KEY".to_string())
}

fn default_lifetime_minutes() -> u64 {
    30
}
