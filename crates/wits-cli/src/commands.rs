//! Subcommands and their arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use wits_core::{SessionConfig, Settings};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run a debate and present it turn by turn
    Run(RunArgs),

    /// Validate the API key and test the connection
    Check,

    /// List available voices and models
    Voices,
}

/// Arguments for `wits run`.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// What the debate is about
    #[arg(long)]
    pub topic: String,

    /// Position defended by Debater A
    #[arg(long = "position-a")]
    pub position_a: String,

    /// Position defended by Debater B
    #[arg(long = "position-b")]
    pub position_b: String,

    /// Turns per debater (4-20)
    #[arg(long)]
    pub turns: Option<u32>,

    /// Chat model used by both debaters
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature (0.0-2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Voice for Debater A
    #[arg(long = "voice-a")]
    pub voice_a: Option<String>,

    /// Voice for Debater B
    #[arg(long = "voice-b")]
    pub voice_b: Option<String>,

    /// Speech speed (0.25-4.0)
    #[arg(long)]
    pub speed: Option<f32>,

    /// Number of turns to generate ahead of presentation
    #[arg(long, default_value_t = 3)]
    pub lookahead: usize,

    /// Write each turn's audio into this directory
    #[arg(long = "audio-dir")]
    pub audio_dir: Option<PathBuf>,

    /// Advance as soon as the next turn is ready instead of waiting for Enter
    #[arg(long)]
    pub auto: bool,
}

impl RunArgs {
    /// Session configuration: settings defaults with flags applied on top.
    pub fn session_config(&self, settings: &Settings) -> SessionConfig {
        let mut config = settings.session_config(
            self.topic.clone(),
            self.position_a.clone(),
            self.position_b.clone(),
        );

        if let Some(turns) = self.turns {
            config = config.with_turns_per_side(turns);
        }
        if let Some(model) = &self.model {
            config = config.with_model(model.clone());
        }
        if let Some(temperature) = self.temperature {
            config = config.with_temperature(temperature);
        }
        if let Some(speed) = self.speed {
            config = config.with_speech_speed(speed);
        }

        let voice_a = self.voice_a.clone().unwrap_or_else(|| config.voice_a.clone());
        let voice_b = self.voice_b.clone().unwrap_or_else(|| config.voice_b.clone());
        config.with_voices(voice_a, voice_b)
    }
}
