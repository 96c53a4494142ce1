//! Administrative account configuration.

use serde::{Deserialize, Serialize};

/// Password used when neither the environment nor the config provides one.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// The single administrative account created at first startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAccountConfig {
    /// Login name of the administrator.
    #[serde(default = "default_admin_username")]
    pub admin_username: String,

    /// Plaintext bootstrap password. Prefer `admin_password_env`.
    #[serde(default)]
    pub admin_password: Option<String>,

    /// Environment variable containing the bootstrap password.
    #[serde(default = "default_admin_password_env")]
    pub admin_password_env: Option<String>,
}

impl Default for AdminAccountConfig {
    fn default() -> Self {
        Self {
            admin_username: default_admin_username(),
            admin_password: None,
            admin_password_env: default_admin_password_env(),
        }
    }
}

impl AdminAccountConfig {
    /// Get the bootstrap password, checking `admin_password_env` first.
    ///
    /// Falls back to [`DEFAULT_ADMIN_PASSWORD`]; the second element reports
    /// whether that fallback was used.
    pub fn resolve_password(&self) -> (String, bool) {
        if let Some(env_var) = &self.admin_password_env
            && let Ok(password) = std::env::var(env_var)
        {
            return (password, false);
        }
        match &self.admin_password {
            Some(password) => (password.clone(), false),
            None => (DEFAULT_ADMIN_PASSWORD.to_string(), true),
        }
    }
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password_env() -> Option<String> {
    Some("FOLIO_ADMIN_PASSWORD".to_string())
}
