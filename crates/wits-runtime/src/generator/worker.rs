//! The generation worker loop.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use bytes::Bytes;
use futures_util::FutureExt;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use wits_core::{
    AiResponder, AudioSynthesizer, GeneratedTurn, GenerationSnapshot, ResponderError,
    ResponderReply, TokenUsage, Transcript, fallback_response,
};

use super::{GeneratorOptions, GeneratorState, Shared};
use crate::error::GeneratorError;

/// Why the worker loop ended.
#[derive(Debug, Clone, Copy)]
enum StopReason {
    Cancelled,
    DebateComplete,
    AllTurnsGenerated,
}

impl StopReason {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Cancelled => "cancelled",
            Self::DebateComplete => "debate_complete",
            Self::AllTurnsGenerated => "max_turns_reached",
        }
    }
}

/// Outcome of one generation attempt.
enum Produced {
    Enqueued,
    /// Cancellation arrived while the ports were working.
    Discarded,
}

pub(super) struct Worker {
    pub(super) shared: Arc<Shared>,
    pub(super) responder: Arc<dyn AiResponder>,
    pub(super) synthesizer: Arc<dyn AudioSynthesizer>,
    pub(super) transcript: watch::Receiver<Arc<Transcript>>,
    pub(super) options: GeneratorOptions,
    pub(super) cancel: CancellationToken,
}

impl Worker {
    pub(super) async fn run(self) {
        info!("Generation worker started");

        let reason = self.generate_until_done().await;

        self.shared.set_state(GeneratorState::Stopped);
        info!(reason = reason.as_str(), "Generation worker finished");
    }

    async fn generate_until_done(&self) -> StopReason {
        let total_turns = self.transcript.borrow().config.total_turns();

        loop {
            if self.cancel.is_cancelled() {
                return StopReason::Cancelled;
            }
            if self.transcript.borrow().complete {
                return StopReason::DebateComplete;
            }

            if self.shared.queue.len() >= self.options.lookahead_depth() {
                if !self.pause(self.options.poll_interval()).await {
                    return StopReason::Cancelled;
                }
                continue;
            }

            let ordinal = self.shared.next_ordinal();
            if ordinal > total_turns {
                return StopReason::AllTurnsGenerated;
            }

            match self.produce(ordinal).await {
                Ok(Produced::Enqueued) => {}
                Ok(Produced::Discarded) => return StopReason::Cancelled,
                Err(e) => {
                    error!(ordinal, error = %e, "Error in generation worker");
                    if !self.pause(self.options.error_backoff()).await {
                        return StopReason::Cancelled;
                    }
                }
            }
        }
    }

    /// Generate the turn at `ordinal` and enqueue it.
    async fn produce(&self, ordinal: u32) -> Result<Produced, GeneratorError> {
        let transcript = self.transcript.borrow().clone();
        let snapshot = GenerationSnapshot::for_ordinal(&transcript, ordinal);

        info!(
            ordinal,
            turn = snapshot.turn_index,
            debater = %snapshot.role,
            kind = %snapshot.kind,
            applied = snapshot.entries.len(),
            "Generating turn in background"
        );

        let turn = AssertUnwindSafe(self.generate(&snapshot))
            .catch_unwind()
            .await
            .map_err(|payload| GeneratorError::Panicked {
                ordinal,
                message: panic_message(payload.as_ref()),
            })?;

        if self.cancel.is_cancelled() {
            debug!(ordinal, "Discarding generated turn after cancellation");
            return Ok(Produced::Discarded);
        }

        let response_length = turn.content().len();
        let audio_size = turn.audio().len();
        self.shared.queue.push(turn);
        self.shared
            .next_ordinal
            .store(ordinal.saturating_add(1), Ordering::Release);

        info!(
            ordinal,
            turn = snapshot.turn_index,
            debater = %snapshot.role,
            queue_size = self.shared.queue.len(),
            response_length,
            audio_size,
            "Turn generated successfully in background"
        );
        Ok(Produced::Enqueued)
    }

    /// Text then audio for one turn. Port failures are replaced, not raised.
    async fn generate(&self, snapshot: &GenerationSnapshot) -> GeneratedTurn {
        let reply = match self.request_text(snapshot).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    ordinal = snapshot.ordinal,
                    debater = %snapshot.role,
                    error = %e,
                    "Text generation failed; using fallback response"
                );
                ResponderReply::new(
                    fallback_response(snapshot),
                    TokenUsage::zero(snapshot.config.model.clone()),
                )
            }
        };

        let voice = snapshot.config.voice_for(snapshot.role);
        let audio = match self
            .synthesizer
            .synthesize(&reply.text, voice, snapshot.config.speech_speed)
            .await
        {
            Ok(audio) => audio,
            Err(e) => {
                warn!(
                    ordinal = snapshot.ordinal,
                    voice,
                    error = %e,
                    "Speech synthesis failed; turn will be silent"
                );
                Bytes::new()
            }
        };

        GeneratedTurn::new(
            snapshot.role,
            snapshot.turn_index,
            snapshot.ordinal,
            reply.text,
            audio,
            reply.usage,
        )
    }

    async fn request_text(
        &self,
        snapshot: &GenerationSnapshot,
    ) -> Result<ResponderReply, ResponderError> {
        let reply = self.responder.generate(snapshot).await?;
        if reply.text.trim().is_empty() {
            return Err(ResponderError::EmptyResponse);
        }
        Ok(reply)
    }

    /// Sleep for `duration` unless cancelled first. Returns false on cancel.
    async fn pause(&self, duration: Duration) -> bool {
        tokio::select! {
            () = tokio::time::sleep(duration) => true,
            () = self.cancel.cancelled() => false,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
