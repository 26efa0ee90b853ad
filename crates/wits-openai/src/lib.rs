#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

mod client;
mod config;
mod dto;
mod error;
pub mod pricing;
pub mod prompts;
mod responder;
mod speech;

pub use client::OpenAiClient;
pub use config::{DEFAULT_BASE_URL, OpenAiConfig};
pub use dto::ChatMessage;
pub use error::{OpenAiError, OpenAiResult};
pub use responder::ChatResponder;
pub use speech::SpeechSynthesizer;

// Silence unused dev-dependency warnings for deps only the integration tests use
#[cfg(test)]
use axum as _;
#[cfg(test)]
use tokio as _;
#[cfg(test)]
use tokio_test as _;
