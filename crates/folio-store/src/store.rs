//! Document store contract and the in-memory backend.

use crate::error::StoreError;
use crate::filter::Filter;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::RwLock;

/// A stored document: always a JSON object.
pub type Document = Value;

/// Trait for document storage backends.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// First document in `collection` matching `filter`.
    async fn find_one(&self, collection: &str, filter: &Filter)
    -> Result<Option<Document>, StoreError>;

    /// All documents in `collection` matching `filter`, in insertion order.
    async fn find_many(&self, collection: &str, filter: &Filter)
    -> Result<Vec<Document>, StoreError>;

    /// Append a document to `collection`.
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), StoreError>;

    /// Merge `changes` into the first matching document. Returns the matched count.
    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        changes: Document,
    ) -> Result<u64, StoreError>;

    /// Remove the first matching document. Returns the deleted count.
    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// Number of documents in `collection` matching `filter`.
    async fn count(&self, collection: &str, filter: &Filter) -> Result<usize, StoreError> {
        Ok(self.find_many(collection, filter).await?.len())
    }
}

/// In-process store backed by a map of collections.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Map<String, Value>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn into_object(doc: Document, what: &str) -> Result<Map<String, Value>, StoreError> {
    match doc {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::InvalidDocument(format!(
            "{what} must be a JSON object, got {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::LockPoisoned(e.to_string())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections.get(collection).and_then(|docs| {
            docs.iter()
                .find(|d| filter.matches(d))
                .map(|d| Value::Object(d.clone()))
        }))
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|d| filter.matches(d))
                    .map(|d| Value::Object(d.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<(), StoreError> {
        let doc = into_object(doc, "document")?;
        let mut collections = self.collections.write().map_err(poisoned)?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(doc);
        tracing::trace!(collection, "Inserted document");
        Ok(())
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: &Filter,
        changes: Document,
    ) -> Result<u64, StoreError> {
        let changes = into_object(changes, "change set")?;
        let mut collections = self.collections.write().map_err(poisoned)?;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| filter.matches(d)))
        else {
            return Ok(0);
        };
        for (field, value) in changes {
            doc.insert(field, value);
        }
        tracing::trace!(collection, "Updated document");
        Ok(1)
    }

    async fn delete_one(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().map_err(poisoned)?;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        match docs.iter().position(|d| filter.matches(d)) {
            Some(index) => {
                docs.remove(index);
                tracing::trace!(collection, "Deleted document");
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_and_find() {
        let store = MemoryStore::new();
        store
            .insert_one("services", json!({"id": "1", "category": "infra"}))
            .await
            .unwrap();
        store
            .insert_one("services", json!({"id": "2", "category": "consulting"}))
            .await
            .unwrap();

        let found = store
            .find_one("services", &Filter::by_id("2"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found["category"], "consulting");

        let all = store.find_many("services", &Filter::all()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["id"], "1");
        assert_eq!(store.count("services", &Filter::all()).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = MemoryStore::new();
        assert!(store.find_one("nope", &Filter::all()).await.unwrap().is_none());
        assert!(store.find_many("nope", &Filter::all()).await.unwrap().is_empty());
        assert_eq!(store.delete_one("nope", &Filter::all()).await.unwrap(), 0);
        assert_eq!(
            store
                .update_one("nope", &Filter::all(), json!({"a": 1}))
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryStore::new();
        store
            .insert_one("projects", json!({"id": "p1", "title": "Old", "year": "2023"}))
            .await
            .unwrap();

        let matched = store
            .update_one("projects", &Filter::by_id("p1"), json!({"title": "New"}))
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let doc = store
            .find_one("projects", &Filter::by_id("p1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(doc, json!({"id": "p1", "title": "New", "year": "2023"}));

        let missing = store
            .update_one("projects", &Filter::by_id("p2"), json!({"title": "X"}))
            .await
            .unwrap();
        assert_eq!(missing, 0);
    }

    #[tokio::test]
    async fn test_delete_removes_first_match_only() {
        let store = MemoryStore::new();
        for id in ["a", "b", "a"] {
            store
                .insert_one("contact_messages", json!({"id": id}))
                .await
                .unwrap();
        }

        let deleted = store
            .delete_one("contact_messages", &Filter::by_id("a"))
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(
            store
                .count("contact_messages", &Filter::by_id("a"))
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_non_object_documents_are_rejected() {
        let store = MemoryStore::new();
        let err = store.insert_one("services", json!([1, 2])).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument(_)));

        store.insert_one("services", json!({"id": "1"})).await.unwrap();
        let err = store
            .update_one("services", &Filter::by_id("1"), json!("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidDocument(_)));
    }
}
