//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, shared state)
//! 2. Delegates to a service, passing the injected collaborators
//! 3. Returns HTTP response (JSON, status code)

/// User registration
pub mod auth;
/// Default category tree
pub mod categories;
/// Mocked AI chat
pub mod chat;
/// Liveness and health checks
pub mod health;
/// Transaction listing
pub mod transactions;
