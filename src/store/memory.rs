//! In-memory document store for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Document, DocumentStore, Fields, StoreError};

/// A document store that keeps every collection in process memory.
///
/// Documents are returned in insertion order. Nothing is persisted.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document under a caller-chosen key, replacing any document
    /// that already uses it.
    #[cfg(test)]
    pub async fn put(&self, collection: &str, id: impl Into<String>, fields: Fields) {
        let id = id.into();
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.to_string()).or_default();

        match documents.iter_mut().find(|doc| doc.id == id) {
            Some(existing) => existing.fields = fields,
            None => documents.push(Document { id, fields }),
        }
    }

    /// Number of documents in `collection`.
    #[cfg(test)]
    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError> {
        let document = Document {
            id: Uuid::new_v4().simple().to_string(),
            fields,
        };

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(document.clone());

        Ok(document)
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(collection)
            .map(|documents| {
                documents
                    .iter()
                    .filter(|doc| doc.fields.get(field) == Some(value))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
