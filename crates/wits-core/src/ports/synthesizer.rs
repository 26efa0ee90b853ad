//! Speech synthesis port.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Errors returned by [`AudioSynthesizer::synthesize`].
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Synthesizer authentication failed: {0}")]
    Authentication(String),

    #[error("Synthesizer rate limited: {0}")]
    RateLimited(String),

    #[error("Synthesizer connection failed: {0}")]
    Connection(String),

    /// The voice identifier is not known to the backend.
    #[error("Unknown voice '{0}'")]
    UnknownVoice(String),

    #[error("Speech synthesis failed: {0}")]
    Failed(String),
}

/// Turns text into encoded audio.
#[async_trait]
pub trait AudioSynthesizer: Send + Sync {
    /// Synthesize `text` with `voice` at `speed` (1.0 = normal).
    ///
    /// Returns the encoded audio (e.g. MP3) as produced by the backend.
    async fn synthesize(&self, text: &str, voice: &str, speed: f32) -> Result<Bytes, SynthesisError>;
}
