//! Data models for stored documents and API request/response types.

/// Default spending categories
pub mod category;
/// AI chat request/response bodies
pub mod chat;
/// Password validation and hashing
pub mod password;
/// Transaction records
pub mod transaction;
/// Registered users
pub mod user;
