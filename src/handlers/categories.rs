//! Category HTTP handlers.

use axum::Json;

use crate::models::category::{Category, DEFAULT_CATEGORIES};

/// List the default category tree.
///
/// # Endpoint
///
/// `GET /api/categories`
pub async fn list_categories() -> Json<&'static [Category]> {
    Json(DEFAULT_CATEGORIES)
}
