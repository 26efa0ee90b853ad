//! HTTP client shared by the chat and speech adapters.

use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::OpenAiConfig;
use crate::dto::{ChatRequest, ChatResponse, SpeechRequest};
use crate::error::{OpenAiError, OpenAiResult};
use crate::pricing::{chat_cost, format_cost, speech_cost};

/// Authenticated client for an OpenAI-compatible API.
///
/// Cheap to share behind an `Arc`; both adapters can use one instance.
#[derive(Debug)]
pub struct OpenAiClient {
    http: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> OpenAiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| OpenAiError::Client(e.to_string()))?;

        info!(base_url = %config.base_url, "OpenAI client initialized");
        Ok(Self { http, config })
    }

    /// Build a client from `OPENAI_API_KEY` / `OPENAI_BASE_URL`.
    pub fn from_env() -> OpenAiResult<Self> {
        Self::new(OpenAiConfig::from_env()?)
    }

    pub const fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    pub(crate) async fn chat(&self, request: &ChatRequest<'_>) -> OpenAiResult<ChatResponse> {
        debug!(
            model = request.model,
            messages_count = request.messages.len(),
            "Creating chat completion"
        );

        let result = async {
            let response = self.post("chat/completions", request).await?;
            Ok::<_, OpenAiError>(response.json::<ChatResponse>().await?)
        }
        .await;

        match result {
            Ok(response) => {
                let usage = response.usage.unwrap_or_default();
                let cost = chat_cost(request.model, usage.prompt_tokens, usage.completion_tokens)
                    .map_or_else(|| "unknown".to_string(), format_cost);
                info!(
                    model = request.model,
                    input_tokens = usage.prompt_tokens,
                    output_tokens = usage.completion_tokens,
                    total_tokens = usage.prompt_tokens + usage.completion_tokens,
                    estimated_cost = %cost,
                    "Chat completion successful"
                );
                Ok(response)
            }
            Err(e) => {
                error!(
                    model = request.model,
                    message_count = request.messages.len(),
                    error = %e,
                    "Chat completion failed"
                );
                Err(e)
            }
        }
    }

    pub(crate) async fn speech(&self, request: &SpeechRequest<'_>) -> OpenAiResult<Bytes> {
        let characters = request.input.chars().count();
        debug!(
            model = request.model,
            voice = request.voice,
            text_length = characters,
            "Creating speech"
        );

        let result = async {
            let response = self.post("audio/speech", request).await?;
            Ok::<_, OpenAiError>(response.bytes().await?)
        }
        .await;

        match result {
            Ok(audio) => {
                info!(
                    model = request.model,
                    voice = request.voice,
                    characters,
                    audio_size = audio.len(),
                    estimated_cost = %format_cost(speech_cost(request.model, characters)),
                    "Speech generation successful"
                );
                Ok(audio)
            }
            Err(e) => {
                error!(
                    model = request.model,
                    voice = request.voice,
                    error = %e,
                    "Speech generation failed"
                );
                Err(e)
            }
        }
    }

    /// POST a JSON body; non-success statuses become categorized errors.
    async fn post<T: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &T,
    ) -> OpenAiResult<reqwest::Response> {
        let response = self
            .http
            .post(self.config.endpoint(path))
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(OpenAiError::from_status(status.as_u16(), &body))
    }
}
