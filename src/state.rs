//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::{
    error::AppError,
    services::chat_service::{ChatProvider, MockChatProvider},
    store::SharedStore,
};

/// Everything a handler may need, cloned cheaply per request.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no store credential was configured at startup
    store: Option<SharedStore>,
    chat: Arc<dyn ChatProvider>,
    password_cost: u32,
}

impl AppState {
    pub fn new(store: Option<SharedStore>, chat: Arc<dyn ChatProvider>, password_cost: u32) -> Self {
        Self {
            store,
            chat,
            password_cost,
        }
    }

    /// State with the given store and the mock chat provider.
    pub fn with_store(store: Option<SharedStore>, password_cost: u32) -> Self {
        Self::new(store, Arc::new(MockChatProvider), password_cost)
    }

    /// The configured document store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::StorageUnavailable` if the store was never initialized.
    pub fn store(&self) -> Result<&SharedStore, AppError> {
        self.store.as_ref().ok_or(AppError::StorageUnavailable)
    }

    pub fn chat(&self) -> &dyn ChatProvider {
        self.chat.as_ref()
    }

    pub fn password_cost(&self) -> u32 {
        self.password_cost
    }
}
