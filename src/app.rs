//! HTTP router assembly.

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, state::AppState};

/// Build the application router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/transactions",
            get(handlers::transactions::list_transactions),
        )
        .route("/api/categories", get(handlers::categories::list_categories))
        .route("/api/ai/chat", post(handlers::chat::chat))
        // Both paths were in use by clients
        .route("/auth/register", post(handlers::auth::register))
        .route("/api/auth/register", post(handlers::auth::register))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
