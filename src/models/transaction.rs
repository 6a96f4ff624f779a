//! Transaction records.
//!
//! Transactions are written by other clients of the document store, so their
//! shape is open-ended. This service only reads them back and tags each one
//! with its document key.

use serde::Serialize;

use crate::store::{Document, Fields};

/// A transaction as returned by `GET /api/transactions`.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": "abc123",
///   "amount": -42.5,
///   "category": "Groceries",
///   "date": "2025-06-01"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    /// Document key in the `transactions` collection
    pub id: String,

    /// Every stored field except one named `id`
    #[serde(flatten)]
    pub fields: Fields,
}

/// The document key always wins over a stored field that is also called `id`.
impl From<Document> for TransactionRecord {
    fn from(document: Document) -> Self {
        let mut fields = document.fields;
        fields.remove("id");

        Self {
            id: document.id,
            fields,
        }
    }
}
