//! CLI command implementations for folio.

pub mod keys;
pub mod password;
pub mod serve;
pub mod token;
