//! Serve command for starting the content API.
//!
//! `folio serve` - Start the HTTP server.

use anyhow::Context;
use folio_core::FolioConfig;
use folio_server::{AppState, FolioServer};
use std::path::{Path, PathBuf};

fn load_config(
    path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<FolioConfig> {
    let mut config = match path {
        Some(path) => FolioConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            tracing::info!("No config file given; using defaults");
            FolioConfig::default()
        }
    };

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    Ok(config)
}

/// Start the server and block until it stops.
pub async fn run(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let config = load_config(config_path.as_deref(), host, port)?;
    let state = AppState::init(config)
        .await
        .context("Failed to initialise application state")?;
    FolioServer::new(state).run().await
}
