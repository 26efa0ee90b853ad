//! Capability ports consumed by the background generator.
//!
//! # Design Rules
//!
//! - Ports carry no transport types; adapters (e.g. `wits-openai`) convert
//!   their own errors into [`ResponderError`] / [`SynthesisError`].
//! - Implementations must be `Send + Sync` so one instance can be shared by
//!   the generator task via `Arc<dyn ...>`.
//! - Every error is treated as transient by the caller. Ports must not retry
//!   forever on their own.

mod responder;
mod synthesizer;

pub use responder::{AiResponder, ResponderError, ResponderReply};
pub use synthesizer::{AudioSynthesizer, SynthesisError};
