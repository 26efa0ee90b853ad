//! Session configuration and its validation.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Minimum number of turns each side takes.
pub const MIN_TURNS_PER_SIDE: u32 = 4;
/// Maximum number of turns each side takes.
pub const MAX_TURNS_PER_SIDE: u32 = 20;
/// Turns per side when none is given.
pub const DEFAULT_TURNS_PER_SIDE: u32 = 8;

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const MIN_SPEECH_SPEED: f32 = 0.25;
pub const MAX_SPEECH_SPEED: f32 = 4.0;

/// Structure of the exchange.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateFormat {
    /// Opening statements, alternating rebuttals, closing arguments.
    #[default]
    Classic,
}

/// Configuration for one debate session.
///
/// Immutable once a session starts: the ledger and the generator share it
/// behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// The debate topic.
    pub topic: String,
    /// Position defended by side A.
    pub position_a: String,
    /// Position defended by side B.
    pub position_b: String,
    /// Number of turns each side takes (4-20).
    pub turns_per_side: u32,
    #[serde(default)]
    pub format: DebateFormat,

    /// Chat model identifier passed to the responder.
    pub model: String,
    /// Sampling temperature (0.0-2.0).
    pub temperature: f32,

    /// Voice used to synthesize side A.
    pub voice_a: String,
    /// Voice used to synthesize side B.
    pub voice_b: String,
    /// Speech speed multiplier (0.25-4.0).
    pub speech_speed: f32,
}

impl SessionConfig {
    /// Create a configuration with default model, voice and pacing settings.
    pub fn new(
        topic: impl Into<String>,
        position_a: impl Into<String>,
        position_b: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            position_a: position_a.into(),
            position_b: position_b.into(),
            turns_per_side: DEFAULT_TURNS_PER_SIDE,
            format: DebateFormat::Classic,
            model: "gpt-4o".to_string(),
            temperature: DEFAULT_TEMPERATURE,
            voice_a: "alloy".to_string(),
            voice_b: "echo".to_string(),
            speech_speed: 1.0,
        }
    }

    #[must_use]
    pub const fn with_turns_per_side(mut self, turns: u32) -> Self {
        self.turns_per_side = turns;
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn with_voices(mut self, voice_a: impl Into<String>, voice_b: impl Into<String>) -> Self {
        self.voice_a = voice_a.into();
        self.voice_b = voice_b.into();
        self
    }

    #[must_use]
    pub const fn with_speech_speed(mut self, speed: f32) -> Self {
        self.speech_speed = speed;
        self
    }

    /// Total number of entries a finished ledger holds (both sides).
    #[must_use]
    pub const fn total_turns(&self) -> u32 {
        self.turns_per_side.saturating_mul(2)
    }

    /// Position defended by `role`.
    #[must_use]
    pub fn position_for(&self, role: Role) -> &str {
        match role {
            Role::A => &self.position_a,
            Role::B => &self.position_b,
        }
    }

    /// Position defended by the opponent of `role`.
    #[must_use]
    pub fn opponent_position_for(&self, role: Role) -> &str {
        self.position_for(role.other())
    }

    /// Voice assigned to `role`.
    #[must_use]
    pub fn voice_for(&self, role: Role) -> &str {
        match role {
            Role::A => &self.voice_a,
            Role::B => &self.voice_b,
        }
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topic.trim().is_empty() {
            return Err(ConfigError::EmptyField("topic"));
        }
        if self.position_a.trim().is_empty() {
            return Err(ConfigError::EmptyField("position_a"));
        }
        if self.position_b.trim().is_empty() {
            return Err(ConfigError::EmptyField("position_b"));
        }
        if !(MIN_TURNS_PER_SIDE..=MAX_TURNS_PER_SIDE).contains(&self.turns_per_side) {
            return Err(ConfigError::InvalidTurnsPerSide(self.turns_per_side));
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::EmptyField("model"));
        }
        if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(ConfigError::InvalidTemperature(self.temperature));
        }
        if self.voice_a.trim().is_empty() {
            return Err(ConfigError::EmptyField("voice_a"));
        }
        if self.voice_b.trim().is_empty() {
            return Err(ConfigError::EmptyField("voice_b"));
        }
        if !(MIN_SPEECH_SPEED..=MAX_SPEECH_SPEED).contains(&self.speech_speed) {
            return Err(ConfigError::InvalidSpeechSpeed(self.speech_speed));
        }
        Ok(())
    }
}

/// Session configuration validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Turns per side must be between 4 and 20, got {0}")]
    InvalidTurnsPerSide(u32),

    #[error("Temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("Speech speed must be between 0.25 and 4.0, got {0}")]
    InvalidSpeechSpeed(f32),
}
