//! Transaction HTTP handlers.
//!
//! - GET /api/transactions - List every stored transaction

use axum::{Json, extract::State};

use crate::{
    error::AppError, models::transaction::TransactionRecord, services::transaction_service,
    state::AppState,
};

/// List all transactions.
///
/// # Response
///
/// - **Success (200 OK)**: Array of transactions (may be empty)
/// - **Error (503)**: Document store not configured or unreachable
/// - **Error (500)**: Store read failed
///
/// ```json
/// [
///   { "id": "abc123", "amount": -42.5, "category": "Groceries" }
/// ]
/// ```
pub async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransactionRecord>>, AppError> {
    let store = state.store()?;

    let transactions = transaction_service::list_transactions(store.as_ref()).await?;

    Ok(Json(transactions))
}
