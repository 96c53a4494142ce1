//! # folio-store
//!
//! Keyed document storage for the folio content API.
//!
//! Documents are schemaless JSON objects grouped into named collections.
//! Callers address them through their own string `id` field; whatever the
//! backend uses internally never leaves the store.
//!
//! ## Collections
//!
//! | Collection | Contents |
//! |------------|----------|
//! | `admin_users` | administrator credentials |
//! | `company_info` | the single company profile document |
//! | `services` | service offerings |
//! | `projects` | portfolio projects |
//! | `contact_messages` | inbound contact-form messages |

pub mod error;
pub mod filter;
pub mod store;

pub use error::StoreError;
pub use filter::Filter;
pub use store::{Document, DocumentStore, MemoryStore};

/// Well-known collection names.
pub mod collections {
    pub const ADMIN_USERS: &str = "admin_users";
    pub const COMPANY_INFO: &str = "company_info";
    pub const SERVICES: &str = "services";
    pub const PROJECTS: &str = "projects";
    pub const CONTACT_MESSAGES: &str = "contact_messages";
}
