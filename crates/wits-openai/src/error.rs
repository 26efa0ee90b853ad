//! Error types for OpenAI operations.
//!
//! These errors are internal to `wits-openai` and are mapped to the core port
//! errors at the boundary.

use serde::Deserialize;
use thiserror::Error;
use wits_core::{ResponderError, SynthesisError};

/// Result type alias for OpenAI operations.
pub type OpenAiResult<T> = Result<T, OpenAiError>;

/// Errors related to OpenAI API operations.
#[derive(Debug, Error)]
pub enum OpenAiError {
    /// `OPENAI_API_KEY` is not set.
    #[error("OpenAI API key not found in environment variables")]
    MissingApiKey,

    /// The key does not look like an OpenAI key.
    #[error("Invalid OpenAI API key format")]
    InvalidApiKey,

    /// The API rejected the credentials (401/403).
    #[error("OpenAI API authentication failed (status {status}): {message}")]
    Authentication { status: u16, message: String },

    /// Quota or rate limit exceeded (429).
    #[error("OpenAI API quota/rate limit exceeded: {message}")]
    RateLimited { message: String },

    /// Any other non-success status.
    #[error("OpenAI API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// The request never got a response.
    #[error("OpenAI API connection failed: {0}")]
    Connection(String),

    /// The response body could not be understood.
    #[error("Invalid response from OpenAI API: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be built.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl OpenAiError {
    /// Categorize a non-success response by status code.
    ///
    /// `body` is searched for the API's `{"error": {"message": ...}}`
    /// envelope; otherwise it is used as-is.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorEnvelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| body.trim().to_string());

        match status {
            401 | 403 => Self::Authentication { status, message },
            429 => Self::RateLimited { message },
            _ => Self::Api { status, message },
        }
    }

    /// Short message for display to the user.
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "OpenAI API key is missing",
            Self::InvalidApiKey => "OpenAI API key appears to be invalid",
            Self::Authentication { .. } => "Invalid or missing OpenAI API key",
            Self::RateLimited { .. } => "OpenAI API usage limit reached",
            Self::Connection(_) | Self::Client(_) => "Failed to connect to OpenAI API",
            Self::Api { .. } | Self::InvalidResponse(_) => "OpenAI API error occurred",
        }
    }

    /// Things the user can try.
    pub const fn suggestions(&self) -> &'static [&'static str] {
        match self {
            Self::MissingApiKey => &[
                "Create a .env file in your project root",
                "Add OPENAI_API_KEY=your_api_key_here to the .env file",
                "Get your API key from https://platform.openai.com/api-keys",
            ],
            Self::InvalidApiKey => &[
                "API keys should start with 'sk-'",
                "Check for extra spaces or characters in your .env file",
                "Get a new API key from https://platform.openai.com/api-keys",
            ],
            Self::Authentication { .. } => &[
                "Check that your .env file exists and contains OPENAI_API_KEY",
                "Verify your API key is valid at https://platform.openai.com/api-keys",
                "Make sure there are no extra spaces in your API key",
            ],
            Self::RateLimited { .. } => &[
                "Check your OpenAI account usage at https://platform.openai.com/usage",
                "Wait a few minutes and try again",
                "Consider upgrading your OpenAI plan for higher limits",
            ],
            Self::Connection(_) | Self::Client(_) => &[
                "Check your internet connection",
                "Try again in a few moments",
                "Check if OpenAI services are operational at https://status.openai.com",
            ],
            Self::Api { .. } | Self::InvalidResponse(_) => &["Try again in a few moments"],
        }
    }
}

impl From<reqwest::Error> for OpenAiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }
}

/// Port-level category shared by the responder and synthesizer errors.
enum PortCategory {
    Authentication,
    RateLimited,
    Connection,
    Failed,
}

impl OpenAiError {
    const fn port_category(&self) -> PortCategory {
        match self {
            Self::MissingApiKey | Self::InvalidApiKey | Self::Authentication { .. } => {
                PortCategory::Authentication
            }
            Self::RateLimited { .. } => PortCategory::RateLimited,
            Self::Connection(_) | Self::Client(_) => PortCategory::Connection,
            Self::Api { .. } | Self::InvalidResponse(_) => PortCategory::Failed,
        }
    }
}

impl From<OpenAiError> for ResponderError {
    fn from(err: OpenAiError) -> Self {
        let message = err.to_string();
        match err.port_category() {
            PortCategory::Authentication => Self::Authentication(message),
            PortCategory::RateLimited => Self::RateLimited(message),
            PortCategory::Connection => Self::Connection(message),
            PortCategory::Failed => Self::Failed(message),
        }
    }
}

impl From<OpenAiError> for SynthesisError {
    fn from(err: OpenAiError) -> Self {
        let message = err.to_string();
        match err.port_category() {
            PortCategory::Authentication => Self::Authentication(message),
            PortCategory::RateLimited => Self::RateLimited(message),
            PortCategory::Connection => Self::Connection(message),
            PortCategory::Failed => Self::Failed(message),
        }
    }
}
