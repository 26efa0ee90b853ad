//! Runtime error types.

use thiserror::Error;
use wits_core::ConfigError;

/// Errors raised by the background generator.
///
/// Only [`GeneratorError::NoRuntime`] reaches callers; the other variants are
/// logged by the worker, which then backs off and retries.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// `start` was called outside a Tokio runtime.
    #[error("Background generation must be started from within a Tokio runtime")]
    NoRuntime,

    /// A port implementation panicked while producing a turn.
    #[error("Generation of turn {ordinal} panicked: {message}")]
    Panicked { ordinal: u32, message: String },
}

/// Errors raised while setting up a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid session configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),
}
