//! Configuration types for the folio content API.
//!
//! # Configuration File
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8001
//! auth:
//!   admin_username: admin
//!   admin_password_env: FOLIO_ADMIN_PASSWORD
//! token:
//!   private_key_env: FOLIO_TOKEN_PRIVATE_KEY
//!   lifetime_minutes: 30
//! ```

pub mod auth;
pub mod server;
pub mod token;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use auth::AdminAccountConfig;
pub use server::ServerConfig;
pub use token::TokenConfig;

/// Complete folio configuration loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FolioConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// The bootstrapped administrative account.
    #[serde(default)]
    pub auth: AdminAccountConfig,

    /// Bearer token signing key and lifetime.
    #[serde(default)]
    pub token: TokenConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FolioConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the server unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.admin_username.trim().is_empty() {
            return Err(ConfigError::Config(
                "auth.admin_username must not be empty".to_string(),
            ));
        }
        if self.token.lifetime_minutes == 0 {
            return Err(ConfigError::Config(
                "token.lifetime_minutes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
