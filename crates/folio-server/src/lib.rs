//! # folio-server
//!
//! HTTP surface of the folio content API, built on axum.
//!
//! Public routes serve company content and accept contact messages. Every
//! route under `/api/admin/` other than `login` sits behind
//! [`middleware::require_admin`], which turns a bearer token into an
//! [`AdminPrincipal`] or answers `401` before any handler runs.

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use middleware::AdminPrincipal;
pub use routes::router;
pub use server::FolioServer;
pub use state::AppState;
