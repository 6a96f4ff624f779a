//! Document store abstraction.
//!
//! Handlers and services never talk to a concrete backend. They receive a
//! [`SharedStore`] and work with schemaless [`Document`]s, so the Firestore
//! client can be swapped for the in-memory store in tests and local runs.

pub mod firestore;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

pub use firestore::{FirestoreStore, ServiceAccount};
pub use memory::InMemoryStore;

/// Collection holding registered users.
pub const USERS: &str = "users";

/// Collection holding transactions.
pub const TRANSACTIONS: &str = "transactions";

/// Field set of a stored document.
pub type Fields = Map<String, Value>;

/// A store implementation shared by every request.
pub type SharedStore = Arc<dyn DocumentStore>;

/// A document read from (or written to) a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Storage key, unique within its collection
    pub id: String,

    /// Stored fields, excluding the key
    pub fields: Fields,
}

/// Errors raised by document store backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// The backend answered with a body we could not understand.
    #[error("could not decode store response: {0}")]
    Decode(String),

    /// An access token could not be obtained.
    #[error("authentication with the store failed: {0}")]
    Auth(String),

    /// The service account credential is unusable.
    #[error("invalid service account credential: {0}")]
    Credentials(String),
}

/// Collection-oriented persistence used by the services.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Human readable backend name, used in logs and health output.
    fn backend(&self) -> &'static str;

    /// Return every document of `collection` in backend order.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Insert a new document and let the backend pick its key.
    async fn insert(&self, collection: &str, fields: Fields) -> Result<Document, StoreError>;

    /// Return the documents of `collection` whose `field` equals `value`.
    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError>;
}

/// Build the Firestore-backed store from a base64 encoded service account.
///
/// Returns `None` (after logging why) when the credential is missing or
/// unusable. Callers treat that as "store not configured".
pub fn connect(service_account_key: Option<&str>) -> Option<SharedStore> {
    let Some(encoded) = service_account_key else {
        tracing::warn!(
            "Document store not initialized: FIREBASE_SERVICE_ACCOUNT_KEY_BASE64 is missing or empty"
        );
        return None;
    };

    let account = match ServiceAccount::from_base64(encoded) {
        Ok(account) => account,
        Err(e) => {
            tracing::warn!(error = %e, "Document store not initialized: could not parse service account");
            return None;
        }
    };

    match FirestoreStore::new(account) {
        Ok(store) => {
            tracing::info!(project_id = %store.project_id(), "Firestore document store initialized");
            Some(Arc::new(store))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Document store not initialized");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::connect;

    #[test]
    fn connect_without_credentials_leaves_store_unconfigured() {
        assert!(connect(None).is_none());
    }

    #[test]
    fn connect_with_garbage_credentials_leaves_store_unconfigured() {
        assert!(connect(Some("%%% not base64 %%%")).is_none());
    }
}
