//! Authentication HTTP handlers.
//!
//! - POST /auth/register (also mounted at /api/auth/register) - Create a user

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::AppError, models::user::RegisterRequest, services::auth_service, state::AppState,
};

/// Register a new user.
///
/// # Request Body
///
/// ```json
/// {
///   "email": "jane@example.com",
///   "firstName": "Jane",
///   "lastName": "Doe",
///   "password": "s3cret!"
/// }
/// ```
///
/// # Response
///
/// - **Success (201 Created)**: The stored user, without password
/// - **Error (400)**: Validation failed
/// - **Error (409)**: Email already registered
/// - **Error (503)**: Document store not configured or unreachable
/// - **Error (500)**: Store or hashing failure
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // A bad payload is a 400 whether or not the store is configured
    let Json(request) = payload?;
    let new_user = request.validate()?;
    let store = state.store()?;

    let user = auth_service::register(store.as_ref(), new_user, state.password_cost()).await?;

    Ok((StatusCode::CREATED, Json(user)))
}
