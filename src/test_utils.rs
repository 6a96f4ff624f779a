//! Helpers shared by unit tests.

use async_trait::async_trait;
use serde_json::Value;

use crate::store::{Document, DocumentStore, Fields, StoreError};

/// Build a field map from a JSON object literal.
pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(fields) => fields,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A store whose backend answers every operation with an error status.
pub struct FailingStore;

fn outage() -> StoreError {
    StoreError::Backend {
        status: 503,
        message: "backend unreachable".to_string(),
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    fn backend(&self) -> &'static str {
        "failing"
    }

    async fn list(&self, _collection: &str) -> Result<Vec<Document>, StoreError> {
        Err(outage())
    }

    async fn insert(&self, _collection: &str, _fields: Fields) -> Result<Document, StoreError> {
        Err(outage())
    }

    async fn find_by_field(
        &self,
        _collection: &str,
        _field: &str,
        _value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        Err(outage())
    }
}

/// A real `reqwest` transport failure, produced without touching the network.
pub async fn transport_error() -> StoreError {
    let error = reqwest::Client::new()
        .get("not a url")
        .send()
        .await
        .expect_err("a relative URL cannot be sent");
    StoreError::Transport(error)
}

/// A store whose backend cannot be reached at all.
pub struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    fn backend(&self) -> &'static str {
        "unreachable"
    }

    async fn list(&self, _collection: &str) -> Result<Vec<Document>, StoreError> {
        Err(transport_error().await)
    }

    async fn insert(&self, _collection: &str, _fields: Fields) -> Result<Document, StoreError> {
        Err(transport_error().await)
    }

    async fn find_by_field(
        &self,
        _collection: &str,
        _field: &str,
        _value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        Err(transport_error().await)
    }
}
