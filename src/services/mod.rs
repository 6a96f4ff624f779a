//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! They receive their collaborators (document store, chat provider) as
//! arguments instead of reaching for global clients.

pub mod auth_service;
pub mod chat_service;
pub mod transaction_service;
