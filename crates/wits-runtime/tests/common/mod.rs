//! Stub ports shared by the runtime integration tests.
//!
//! The responder answers `"turn-<ordinal>"` and the synthesizer maps
//! `"turn-<k>"` to `"AUDIO-<k>"`, so every step of the pipeline can be traced
//! back to the ordinal that produced it.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use wits_core::{
    AiResponder, AudioSynthesizer, GeneratedTurn, GenerationSnapshot, ResponderError,
    ResponderReply, SessionConfig, SynthesisError, TokenUsage,
};
use wits_runtime::{DebateSession, GeneratorOptions};

/// One call observed by [`ScriptedResponder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponderCall {
    pub ordinal: u32,
    /// Transcript length the generator handed to the responder.
    pub applied: usize,
}

#[derive(Default)]
pub struct ScriptedResponder {
    fail_on: HashSet<u32>,
    panic_once_on: Option<u32>,
    panicked: AtomicBool,
    hang: Option<Duration>,
    calls: Mutex<Vec<ResponderCall>>,
}

impl ScriptedResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return an error for these ordinals.
    pub fn failing_on(mut self, ordinals: impl IntoIterator<Item = u32>) -> Self {
        self.fail_on.extend(ordinals);
        self
    }

    /// Panic the first time this ordinal is requested.
    pub fn panicking_once_on(mut self, ordinal: u32) -> Self {
        self.panic_once_on = Some(ordinal);
        self
    }

    /// Sleep this long before every answer.
    pub fn hanging_for(mut self, duration: Duration) -> Self {
        self.hang = Some(duration);
        self
    }

    pub fn calls(&self) -> Vec<ResponderCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiResponder for ScriptedResponder {
    async fn generate(
        &self,
        snapshot: &GenerationSnapshot,
    ) -> Result<ResponderReply, ResponderError> {
        self.calls.lock().unwrap().push(ResponderCall {
            ordinal: snapshot.ordinal,
            applied: snapshot.entries.len(),
        });

        if let Some(duration) = self.hang {
            tokio::time::sleep(duration).await;
        }

        if self.panic_once_on == Some(snapshot.ordinal) && !self.panicked.swap(true, Ordering::SeqCst)
        {
            panic!("scripted panic on turn {}", snapshot.ordinal);
        }

        if self.fail_on.contains(&snapshot.ordinal) {
            return Err(ResponderError::Connection("scripted outage".to_string()));
        }

        Ok(ResponderReply::new(
            format!("turn-{}", snapshot.ordinal),
            TokenUsage::new(100, 50, snapshot.config.model.clone()),
        ))
    }
}

/// Maps `"turn-<k>"` to `"AUDIO-<k>"`; anything else becomes `"AUDIO-other"`.
pub struct EchoSynthesizer;

#[async_trait]
impl AudioSynthesizer for EchoSynthesizer {
    async fn synthesize(
        &self,
        text: &str,
        _voice: &str,
        _speed: f32,
    ) -> Result<Bytes, SynthesisError> {
        let audio = text
            .strip_prefix("turn-")
            .map_or_else(|| "AUDIO-other".to_string(), |k| format!("AUDIO-{k}"));
        Ok(Bytes::from(audio))
    }
}

pub fn config(turns_per_side: u32) -> SessionConfig {
    SessionConfig::new("Remote work", "Remote work is better", "Offices are better")
        .with_turns_per_side(turns_per_side)
}

/// Short intervals so tests never wait on production defaults.
pub fn fast_options() -> GeneratorOptions {
    GeneratorOptions::new()
        .with_poll_interval(Duration::from_millis(5))
        .with_error_backoff(Duration::from_millis(10))
        .with_shutdown_timeout(Duration::from_secs(1))
}

/// Advance until the session completes, collecting every presented turn.
pub async fn present_all(session: &mut DebateSession) -> Vec<GeneratedTurn> {
    let mut presented = Vec::new();
    tokio::time::timeout(Duration::from_secs(10), async {
        while !session.is_complete() {
            match session.advance() {
                Some(turn) => presented.push(turn),
                None => tokio::time::sleep(Duration::from_millis(2)).await,
            }
        }
    })
    .await
    .expect("debate should complete");
    presented
}

/// Wait until `condition` holds, failing the test after a few seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(2)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}
