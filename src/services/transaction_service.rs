//! Transaction query service.
//!
//! Reads the whole `transactions` collection. No sort, filter or pagination is
//! applied; records come back in whatever order the store returns them.

use crate::{
    error::AppError,
    models::transaction::TransactionRecord,
    store::{DocumentStore, TRANSACTIONS},
};

/// List every transaction, each tagged with its document key as `id`.
///
/// An empty collection yields an empty list.
///
/// # Errors
///
/// - `Storage`: The store read failed
pub async fn list_transactions(
    store: &dyn DocumentStore,
) -> Result<Vec<TransactionRecord>, AppError> {
    let documents = store.list(TRANSACTIONS).await?;

    tracing::debug!(count = documents.len(), backend = store.backend(), "Fetched transactions");

    Ok(documents.into_iter().map(TransactionRecord::from).collect())
}
