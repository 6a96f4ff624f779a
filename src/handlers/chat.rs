//! AI chat HTTP handler.

use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::{
    error::AppError,
    models::chat::{ChatRequest, ChatResponse},
    services::chat_service,
    state::AppState,
};

/// Answer a prompt.
///
/// # Endpoint
///
/// `POST /api/ai/chat`
///
/// # Request Body
///
/// ```json
/// { "prompt": "How much did I spend on groceries?" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{ "text": "..." }`
/// - **Error (400)**: Prompt missing or body is not JSON
/// - **Error (500)**: Chat provider failed
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload?;

    let response = chat_service::chat(state.chat(), request).await?;

    Ok(Json(response))
}
