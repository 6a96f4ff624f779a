//! AI chat service.
//!
//! The generative-AI integration sits behind [`ChatProvider`]. The only
//! provider shipped is [`MockChatProvider`], which answers locally without
//! any network traffic.

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::chat::{ChatRequest, ChatResponse},
};

/// Errors raised by chat providers.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider could not produce an answer.
    ///
    /// The mock provider never fails; network-backed providers raise this.
    #[cfg_attr(not(test), allow(dead_code))]
    #[error("chat provider unavailable: {0}")]
    Unavailable(String),
}

/// Something that can answer a prompt with text.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn chat(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Canned provider used until a real model is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockChatProvider;

#[async_trait]
impl ChatProvider for MockChatProvider {
    async fn chat(&self, prompt: &str) -> Result<String, ProviderError> {
        Ok(format!(
            "AI response for: \"{prompt}\". This is where Gemini's insights would go!"
        ))
    }
}

/// Answer a chat request.
///
/// # Errors
///
/// - `Validation`: `prompt` is missing or empty
/// - `Provider`: The provider failed
pub async fn chat(
    provider: &dyn ChatProvider,
    request: ChatRequest,
) -> Result<ChatResponse, AppError> {
    let prompt = request
        .prompt
        .filter(|prompt| !prompt.is_empty())
        .ok_or_else(|| AppError::Validation("Prompt is required.".to_string()))?;

    let text = provider.chat(&prompt).await?;

    Ok(ChatResponse { text })
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::{ChatProvider, MockChatProvider, ProviderError, chat};
    use crate::{error::AppError, models::chat::ChatRequest};

    struct BrokenProvider;

    #[async_trait]
    impl ChatProvider for BrokenProvider {
        async fn chat(&self, _prompt: &str) -> Result<String, ProviderError> {
            Err(ProviderError::Unavailable("quota exceeded".to_string()))
        }
    }

    fn prompt(text: Option<&str>) -> ChatRequest {
        ChatRequest {
            prompt: text.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn mock_echoes_prompt() {
        let response = chat(&MockChatProvider, prompt(Some("hello"))).await.unwrap();

        assert_eq!(
            response.text,
            "AI response for: \"hello\". This is where Gemini's insights would go!"
        );
    }

    #[tokio::test]
    async fn missing_or_empty_prompt_is_rejected() {
        for request in [prompt(None), prompt(Some(""))] {
            let result = chat(&MockChatProvider, request).await;
            assert!(matches!(result, Err(AppError::Validation(m)) if m == "Prompt is required."));
        }
    }

    #[tokio::test]
    async fn provider_failure_is_provider_error() {
        let result = chat(&BrokenProvider, prompt(Some("hi"))).await;

        assert!(matches!(result, Err(AppError::Provider(_))));
    }
}
