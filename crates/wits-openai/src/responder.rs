//! Chat-completion adapter for the [`AiResponder`] port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use wits_core::{AiResponder, GenerationSnapshot, ResponderError, ResponderReply, TokenUsage};

use crate::client::OpenAiClient;
use crate::dto::{ChatMessage, ChatRequest};
use crate::error::OpenAiResult;
use crate::prompts;

/// Model used by [`ChatResponder::ping`].
const PING_MODEL: &str = "gpt-4o-mini";

/// Writes debate turns with the chat completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatResponder {
    client: Arc<OpenAiClient>,
}

impl ChatResponder {
    pub const fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }

    /// Send a minimal completion to check credentials and connectivity.
    pub async fn ping(&self) -> OpenAiResult<()> {
        info!("Testing OpenAI API connection");
        let messages = [ChatMessage::user("Hello")];
        let request = ChatRequest {
            model: PING_MODEL,
            messages: &messages,
            temperature: None,
            max_tokens: 5,
        };
        self.client.chat(&request).await?;
        info!("API connection test successful");
        Ok(())
    }
}

#[async_trait]
impl AiResponder for ChatResponder {
    async fn generate(
        &self,
        snapshot: &GenerationSnapshot,
    ) -> Result<ResponderReply, ResponderError> {
        let config = &snapshot.config;
        let messages = prompts::messages(snapshot);
        let request = ChatRequest {
            model: &config.model,
            messages: &messages,
            temperature: Some(config.temperature),
            max_tokens: self.client.config().max_response_tokens(),
        };

        let response = self.client.chat(&request).await?;
        let usage = response.usage.map_or_else(
            || TokenUsage::zero(config.model.clone()),
            |u| TokenUsage::new(u.prompt_tokens, u.completion_tokens, config.model.clone()),
        );

        let text = response
            .into_content()
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ResponderError::EmptyResponse)?;

        info!(
            debater = %snapshot.role,
            turn = snapshot.turn_index,
            response_length = text.len(),
            "Generated debate response"
        );
        Ok(ResponderReply::new(text, usage))
    }
}

