//! Public configuration for the OpenAI client.

use std::time::Duration;

use wits_core::Settings;
use wits_core::settings::{DEFAULT_MAX_RESPONSE_TOKENS, DEFAULT_TTS_MODEL};

use crate::error::OpenAiError;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for the OpenAI-compatible client.
///
/// # Example
///
/// ```
/// use wits_openai::OpenAiConfig;
/// use std::time::Duration;
///
/// let config = OpenAiConfig::new("sk-test")
///     .with_base_url("http://localhost:8080/v1")
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.base_url(), "http://localhost:8080/v1");
/// ```
#[derive(Clone)]
pub struct OpenAiConfig {
    pub(crate) base_url: String,
    pub(crate) api_key: String,
    pub(crate) timeout: Duration,
    pub(crate) user_agent: String,
    /// Model used by the speech endpoint.
    pub(crate) speech_model: String,
    /// `max_tokens` sent with every chat completion.
    pub(crate) max_response_tokens: u32,
}

impl OpenAiConfig {
    /// Create a configuration with default settings and the given key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(60),
            user_agent: concat!("wits-openai/", env!("CARGO_PKG_VERSION")).to_string(),
            speech_model: DEFAULT_TTS_MODEL.to_string(),
            max_response_tokens: DEFAULT_MAX_RESPONSE_TOKENS,
        }
    }

    /// Read `OPENAI_API_KEY` (required) and `OPENAI_BASE_URL` (optional).
    pub fn from_env() -> Result<Self, OpenAiError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), resolving variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, OpenAiError> {
        let api_key = lookup("OPENAI_API_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(OpenAiError::MissingApiKey)?;

        if !api_key.starts_with("sk-") {
            return Err(OpenAiError::InvalidApiKey);
        }

        let mut config = Self::new(api_key);
        if let Some(base_url) = lookup("OPENAI_BASE_URL").filter(|url| !url.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }
        Ok(config)
    }

    /// Set the API root. A trailing slash is ignored.
    ///
    /// Defaults to `https://api.openai.com/v1`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the per-request timeout.
    ///
    /// Defaults to 60 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the speech model. Defaults to `tts-1`.
    #[must_use]
    pub fn with_speech_model(mut self, model: impl Into<String>) -> Self {
        self.speech_model = model.into();
        self
    }

    /// Set `max_tokens` for chat completions. Defaults to 500.
    #[must_use]
    pub const fn with_max_response_tokens(mut self, tokens: u32) -> Self {
        self.max_response_tokens = tokens;
        self
    }

    /// Take the speech model and response budget from application settings.
    #[must_use]
    pub fn with_settings(self, settings: &Settings) -> Self {
        self.with_speech_model(settings.tts_model.clone())
            .with_max_response_tokens(settings.max_response_tokens)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn speech_model(&self) -> &str {
        &self.speech_model
    }

    pub const fn max_response_tokens(&self) -> u32 {
        self.max_response_tokens
    }

    /// Full URL for an endpoint path such as `chat/completions`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

// The key never appears in logs or debug output.
impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("speech_model", &self.speech_model)
            .field("max_response_tokens", &self.max_response_tokens)
            .finish()
    }
}
