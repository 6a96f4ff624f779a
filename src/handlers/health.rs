//! Liveness and health check endpoints for service monitoring.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,

    /// Document store backend, or "unconfigured"
    pub store: String,

    /// Current server timestamp
    pub timestamp: DateTime<Utc>,
}

/// Liveness check.
///
/// # Endpoint
///
/// `GET /`
pub async fn root() -> &'static str {
    "Backend API is running!"
}

/// Health check handler.
///
/// Reports which document store is in use without touching it, so an
/// unconfigured store still answers 200.
///
/// # Response (200 OK)
///
/// ```json
/// {
///   "status": "healthy",
///   "store": "firestore",
///   "timestamp": "2025-12-21T19:00:00Z"
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state
        .store()
        .map(|store| store.backend())
        .unwrap_or("unconfigured");

    Json(HealthResponse {
        status: "healthy".to_string(),
        store: store.to_string(),
        timestamp: Utc::now(),
    })
}
