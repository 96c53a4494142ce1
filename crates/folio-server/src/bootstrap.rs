//! First-run provisioning of the administrator account.

use folio_auth::{Credential, hash_password};
use folio_core::AdminAccountConfig;
use folio_store::{DocumentStore, Filter, collections::ADMIN_USERS};
use serde_json::Value;

/// On startup, create the configured admin account if it does not exist yet.
///
/// Password source (highest precedence first):
/// - env var named by `auth.admin_password_env` (default `FOLIO_ADMIN_PASSWORD`)
/// - `auth.admin_password` in the config file
/// - the built-in default, with a warning
///
/// Returns whether a credential was created.
pub async fn bootstrap_admin(
    store: &dyn DocumentStore,
    config: &AdminAccountConfig,
) -> anyhow::Result<bool> {
    let username = config.admin_username.clone();
    let existing = store
        .find_one(ADMIN_USERS, &Filter::eq("username", username.as_str()))
        .await?;
    if existing.is_some() {
        tracing::debug!(username = %username, "Admin account already present");
        return Ok(false);
    }

    let (password, used_default) = config.resolve_password();
    if password.trim().is_empty() {
        anyhow::bail!(
            "admin password is empty (set {} or auth.admin_password)",
            config
                .admin_password_env
                .as_deref()
                .unwrap_or("auth.admin_password_env")
        );
    }

    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password)).await??;

    let credential = Credential {
        username: username.clone(),
        password_hash,
    };
    let mut doc = serde_json::to_value(&credential)?;
    if let Value::Object(fields) = &mut doc {
        fields.insert(
            "id".to_string(),
            Value::String(uuid::Uuid::new_v4().to_string()),
        );
    }
    store.insert_one(ADMIN_USERS, doc).await?;

    if used_default {
        tracing::warn!(
            username = %username,
            "Bootstrapped admin account with the built-in default password; change it before exposing the server"
        );
    } else {
        tracing::info!(username = %username, "Bootstrapped admin account");
    }
    Ok(true)
}
