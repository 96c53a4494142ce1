//! Error types for the store crate.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document or change set is not a JSON object.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// A writer panicked while holding the collection lock.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),
}
