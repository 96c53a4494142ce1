pub mod auth;

pub use auth::{AdminPrincipal, require_admin};
