//! Text generation port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{GenerationSnapshot, TokenUsage};

/// Text produced for one turn, with the tokens it cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderReply {
    pub text: String,
    pub usage: TokenUsage,
}

impl ResponderReply {
    pub fn new(text: impl Into<String>, usage: TokenUsage) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }
}

/// Errors returned by [`AiResponder::generate`].
#[derive(Debug, Error)]
pub enum ResponderError {
    /// Credentials were rejected.
    #[error("Responder authentication failed: {0}")]
    Authentication(String),

    /// Usage or rate limit reached.
    #[error("Responder rate limited: {0}")]
    RateLimited(String),

    /// The service could not be reached.
    #[error("Responder connection failed: {0}")]
    Connection(String),

    /// The service answered without any content.
    #[error("Responder returned an empty response")]
    EmptyResponse,

    /// Any other failure.
    #[error("Responder failed: {0}")]
    Failed(String),
}

/// Produces the text of a turn from the applied transcript.
#[async_trait]
pub trait AiResponder: Send + Sync {
    /// Write the turn described by `snapshot`.
    async fn generate(&self, snapshot: &GenerationSnapshot)
    -> Result<ResponderReply, ResponderError>;
}
