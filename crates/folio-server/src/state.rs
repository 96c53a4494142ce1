//! Application state shared by all handlers.

use crate::bootstrap::bootstrap_admin;
use folio_auth::{KeyPair, TokenAuthority, TokenSettings};
use folio_core::FolioConfig;
use folio_store::{DocumentStore, MemoryStore};
use std::sync::Arc;

/// Shared application state.
///
/// Cloned into every handler; all members are reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FolioConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub tokens: TokenAuthority,
}

impl AppState {
    pub fn new(config: FolioConfig, store: Arc<dyn DocumentStore>, tokens: TokenAuthority) -> Self {
        Self {
            config: Arc::new(config),
            store,
            tokens,
        }
    }

    /// Build state from configuration: load the signing key, open an
    /// in-memory store and seed the admin credential.
    pub async fn init(config: FolioConfig) -> anyhow::Result<Self> {
        let keypair = KeyPair::load_or_generate(&config.token)?;
        let settings = TokenSettings::from_config(&config.token)?;
        let tokens = TokenAuthority::new(keypair, settings);

        let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
        bootstrap_admin(store.as_ref(), &config.auth).await?;

        Ok(Self::new(config, store, tokens))
    }
}
