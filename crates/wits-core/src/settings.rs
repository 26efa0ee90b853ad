//! Application settings and validation.
//!
//! These are defaults the presentation layer uses to build a
//! [`SessionConfig`]. They never change a running session.

use serde::{Deserialize, Serialize};

use crate::domain::{
    DEFAULT_TEMPERATURE, DEFAULT_TURNS_PER_SIDE, MAX_SPEECH_SPEED, MAX_TEMPERATURE,
    MAX_TURNS_PER_SIDE, MIN_SPEECH_SPEED, MIN_TEMPERATURE, MIN_TURNS_PER_SIDE, SessionConfig,
};

/// Default chat model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o";
/// Default speech model.
pub const DEFAULT_TTS_MODEL: &str = "tts-1";
/// Default voice when none is chosen.
pub const DEFAULT_TTS_VOICE: &str = "alloy";
/// Upper bound on tokens per generated turn.
pub const DEFAULT_MAX_RESPONSE_TOKENS: u32 = 500;

/// Voices offered by the speech backend.
pub const AVAILABLE_VOICES: &[&str] = &["alloy", "echo", "fable", "onyx", "nova", "shimmer"];
/// Chat models offered in the presentation layer.
pub const AVAILABLE_MODELS: &[&str] = &["gpt-4o", "gpt-4o-mini"];

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub chat_model: String,
    pub tts_model: String,
    pub default_voice: String,
    pub max_response_tokens: u32,
    pub default_temperature: f32,
    pub default_turns_per_side: u32,
    pub default_speech_speed: f32,
    /// Container format of synthesized audio (file extension).
    pub audio_format: String,
    pub available_voices: Vec<String>,
    pub available_models: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
            default_voice: DEFAULT_TTS_VOICE.to_string(),
            max_response_tokens: DEFAULT_MAX_RESPONSE_TOKENS,
            default_temperature: DEFAULT_TEMPERATURE,
            default_turns_per_side: DEFAULT_TURNS_PER_SIDE,
            default_speech_speed: 1.0,
            audio_format: "mp3".to_string(),
            available_voices: AVAILABLE_VOICES.iter().map(ToString::to_string).collect(),
            available_models: AVAILABLE_MODELS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Settings {
    /// Defaults with `DEFAULT_CHAT_MODEL`, `DEFAULT_TTS_MODEL` and
    /// `DEFAULT_TTS_VOICE` environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides resolved through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(model) = non_blank("DEFAULT_CHAT_MODEL") {
            settings.chat_model = model;
        }
        if let Some(model) = non_blank("DEFAULT_TTS_MODEL") {
            settings.tts_model = model;
        }
        if let Some(voice) = non_blank("DEFAULT_TTS_VOICE") {
            settings.default_voice = voice;
        }
        settings
    }

    /// Session configuration seeded with these defaults.
    ///
    /// Debater A speaks with `default_voice`. Debater B keeps its usual voice
    /// unless that would match A, in which case it takes the first other
    /// available voice.
    pub fn session_config(
        &self,
        topic: impl Into<String>,
        position_a: impl Into<String>,
        position_b: impl Into<String>,
    ) -> SessionConfig {
        let config = SessionConfig::new(topic, position_a, position_b)
            .with_turns_per_side(self.default_turns_per_side)
            .with_model(self.chat_model.clone())
            .with_temperature(self.default_temperature)
            .with_speech_speed(self.default_speech_speed);

        let voice_b = if config.voice_b == self.default_voice {
            self.available_voices
                .iter()
                .find(|voice| **voice != self.default_voice)
                .cloned()
                .unwrap_or_else(|| config.voice_b.clone())
        } else {
            config.voice_b.clone()
        };
        config.with_voices(self.default_voice.clone(), voice_b)
    }

    pub fn is_known_voice(&self, voice: &str) -> bool {
        self.available_voices.iter().any(|v| v == voice)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("Chat model cannot be empty")]
    EmptyChatModel,

    #[error("Speech model cannot be empty")]
    EmptyTtsModel,

    #[error("Default voice '{0}' is not one of the available voices")]
    UnknownVoice(String),

    #[error("Max response tokens must be between 1 and 4096, got {0}")]
    InvalidMaxResponseTokens(u32),

    #[error("Default temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("Default turns per side must be between 4 and 20, got {0}")]
    InvalidTurnsPerSide(u32),

    #[error("Default speech speed must be between 0.25 and 4.0, got {0}")]
    InvalidSpeechSpeed(f32),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.chat_model.trim().is_empty() {
        return Err(SettingsError::EmptyChatModel);
    }

    if settings.tts_model.trim().is_empty() {
        return Err(SettingsError::EmptyTtsModel);
    }

    if !settings.is_known_voice(&settings.default_voice) {
        return Err(SettingsError::UnknownVoice(settings.default_voice.clone()));
    }

    if !(1..=4096).contains(&settings.max_response_tokens) {
        return Err(SettingsError::InvalidMaxResponseTokens(
            settings.max_response_tokens,
        ));
    }

    if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&settings.default_temperature) {
        return Err(SettingsError::InvalidTemperature(
            settings.default_temperature,
        ));
    }

    if !(MIN_TURNS_PER_SIDE..=MAX_TURNS_PER_SIDE).contains(&settings.default_turns_per_side) {
        return Err(SettingsError::InvalidTurnsPerSide(
            settings.default_turns_per_side,
        ));
    }

    if !(MIN_SPEECH_SPEED..=MAX_SPEECH_SPEED).contains(&settings.default_speech_speed) {
        return Err(SettingsError::InvalidSpeechSpeed(
            settings.default_speech_speed,
        ));
    }

    Ok(())
}
