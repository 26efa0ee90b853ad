//! Text-to-speech adapter for the [`AudioSynthesizer`] port.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use wits_core::settings::AVAILABLE_VOICES;
use wits_core::{AudioSynthesizer, SynthesisError};

use crate::client::OpenAiClient;
use crate::dto::SpeechRequest;

/// Synthesizes turns with the `audio/speech` endpoint as MP3.
#[derive(Debug, Clone)]
pub struct SpeechSynthesizer {
    client: Arc<OpenAiClient>,
    voices: Vec<String>,
}

impl SpeechSynthesizer {
    /// Synthesizer accepting the standard OpenAI voices.
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self {
            client,
            voices: AVAILABLE_VOICES.iter().map(ToString::to_string).collect(),
        }
    }

    /// Replace the accepted voice list, e.g. for a compatible server with
    /// its own voices.
    #[must_use]
    pub fn with_voices(mut self, voices: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.voices = voices.into_iter().map(Into::into).collect();
        self
    }

    pub fn voices(&self) -> &[String] {
        &self.voices
    }
}

#[async_trait]
impl AudioSynthesizer for SpeechSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str, speed: f32) -> Result<Bytes, SynthesisError> {
        if !self.voices.iter().any(|v| v == voice) {
            return Err(SynthesisError::UnknownVoice(voice.to_string()));
        }

        let request = SpeechRequest {
            model: self.client.config().speech_model(),
            input: text,
            voice,
            speed,
            response_format: "mp3",
        };
        Ok(self.client.speech(&request).await?)
    }
}
