#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod fallback;
pub mod ports;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    ConfigError, DebateFormat, GeneratedTurn, GenerationSnapshot, LedgerError, Role,
    SessionConfig, TokenTotals, TokenUsage, Transcript, TurnEntry, TurnKind, TurnLedger, classify,
};
pub use fallback::fallback_response;
pub use ports::{AiResponder, AudioSynthesizer, ResponderError, ResponderReply, SynthesisError};
pub use settings::{Settings, SettingsError, validate_settings};
