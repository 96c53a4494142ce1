//! # folio-core
//!
//! Configuration types shared by the folio crates.
//!
//! A deployment is described by a single YAML file (conventionally
//! `folio.yaml`) that is deserialized into [`FolioConfig`]. Every section is
//! optional and falls back to development-friendly defaults.

pub mod config;

pub use config::{AdminAccountConfig, ConfigError, FolioConfig, ServerConfig, TokenConfig};
