//! Money Wiz API - Main Application Entry Point
//!
//! This is a REST API server for a personal-finance application. It registers
//! users, lists stored transactions, serves the default category tree and
//! answers a mocked AI chat endpoint.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: Cloud Firestore over its REST API, behind a `DocumentStore` trait
//! - **Passwords**: bcrypt with a per-user salt
//! - **Format**: JSON requests/responses
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Decode the service account and create the document store (optional)
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

mod app;
mod config;
mod error;
mod handlers;
mod models;
mod services;
mod state;
mod store;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    // Without a credential the server still runs; store-backed routes answer 503
    let store: Option<store::SharedStore> = if config.use_memory_store {
        tracing::warn!("Using the in-memory document store; data is lost on restart");
        Some(Arc::new(store::InMemoryStore::new()))
    } else {
        store::connect(config.service_account_key())
    };

    if config.gemini_api_key.is_none() {
        tracing::info!("GEMINI_API_KEY not set; chat answers come from the mock provider");
    }

    let state = AppState::with_store(store, config.bcrypt_cost);
    let app = app::build_router(state);

    // Bind to network address and start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Backend server running on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
