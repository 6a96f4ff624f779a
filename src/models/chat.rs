//! AI chat request and response bodies.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/ai/chat`.
///
/// `prompt` is optional at the serde level so a missing prompt is answered
/// with the same 400 as an empty one.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: Option<String>,
}

/// Response body for `POST /api/ai/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
}
