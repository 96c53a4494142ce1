//! Equality filters over top-level document fields.

use serde_json::{Map, Value};

/// Matches documents whose fields equal every listed value.
///
/// An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    fields: Map<String, Value>,
}

impl Filter {
    /// Match every document.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match the document whose caller-visible `id` equals `id`.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self::all().and("id", Value::String(id.into()))
    }

    /// Match documents where `field == value`.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    /// Add another equality condition.
    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Check a document against this filter.
    pub fn matches(&self, doc: &Map<String, Value>) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}
