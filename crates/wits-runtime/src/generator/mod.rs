//! Background generator: produces turns ahead of presentation.
//!
//! # Concurrency Model
//!
//! - One worker task per generator, spawned by [`BackgroundGenerator::start`].
//! - The worker owns the "next turn to generate" counter; it advances only
//!   after a successful enqueue, so no turn is generated twice or skipped.
//! - Port calls happen outside every lock. The ready queue lock is held for a
//!   push, or for a pop plus the coordinator's in-memory apply; the transcript
//!   is read by cloning an `Arc` out of a `watch` channel.
//! - `stop` cancels a [`CancellationToken`] and waits (bounded) for the
//!   worker. A call already in flight finishes; its result is discarded.

mod options;
mod worker;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use wits_core::{AiResponder, AudioSynthesizer, GeneratedTurn, Transcript};

use crate::error::GeneratorError;
use crate::queue::ReadyQueue;

pub use options::GeneratorOptions;
use worker::Worker;

/// Lifecycle of a generator. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorState {
    /// Constructed, not started.
    Idle,
    /// Worker is producing turns.
    Running,
    /// Stopped by request or after the final turn was generated.
    Stopped,
}

/// Point-in-time view of the generator for observability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorStatus {
    pub state: GeneratorState,
    /// Generated turns waiting to be presented.
    pub buffered: usize,
    pub running: bool,
    /// Position in the exchange of the next turn to generate.
    pub next_ordinal: u32,
    /// Per-side index of the next turn to generate.
    pub next_turn_index: u32,
    pub lookahead_depth: usize,
}

/// State shared between the generator handle and its worker task.
struct Shared {
    queue: ReadyQueue,
    state: Mutex<GeneratorState>,
    next_ordinal: AtomicU32,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, GeneratorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state(&self) -> GeneratorState {
        *self.lock_state()
    }

    fn set_state(&self, state: GeneratorState) {
        *self.lock_state() = state;
    }

    fn next_ordinal(&self) -> u32 {
        self.next_ordinal.load(Ordering::Acquire)
    }
}

/// Keeps a bounded number of future turns generated ahead of presentation.
pub struct BackgroundGenerator {
    shared: Arc<Shared>,
    responder: Arc<dyn AiResponder>,
    synthesizer: Arc<dyn AudioSynthesizer>,
    transcript: watch::Receiver<Arc<Transcript>>,
    options: GeneratorOptions,
    cancel: CancellationToken,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl BackgroundGenerator {
    /// Create an idle generator.
    ///
    /// `transcript` must be fed by the owner of the ledger after every
    /// applied turn.
    pub fn new(
        responder: Arc<dyn AiResponder>,
        synthesizer: Arc<dyn AudioSynthesizer>,
        transcript: watch::Receiver<Arc<Transcript>>,
        options: GeneratorOptions,
    ) -> Self {
        let applied = u32::try_from(transcript.borrow().len()).unwrap_or(u32::MAX);

        info!(
            lookahead_depth = options.lookahead_depth(),
            "Background generator initialized"
        );

        Self {
            shared: Arc::new(Shared {
                queue: ReadyQueue::new(),
                state: Mutex::new(GeneratorState::Idle),
                next_ordinal: AtomicU32::new(applied.saturating_add(1)),
            }),
            responder,
            synthesizer,
            transcript,
            options,
            cancel: CancellationToken::new(),
            worker: Mutex::new(None),
        }
    }

    /// Spawn the worker on the current Tokio runtime.
    ///
    /// Calling this while running, or after the generator has stopped, only
    /// logs a warning.
    pub fn start(&self) -> Result<(), GeneratorError> {
        let runtime = Handle::try_current().map_err(|_| GeneratorError::NoRuntime)?;

        {
            let mut state = self.shared.lock_state();
            match *state {
                GeneratorState::Running => {
                    warn!("Background generation already active");
                    return Ok(());
                }
                GeneratorState::Stopped => {
                    warn!("Background generation already stopped; start a new session instead");
                    return Ok(());
                }
                GeneratorState::Idle => *state = GeneratorState::Running,
            }
        }

        let worker = Worker {
            shared: Arc::clone(&self.shared),
            responder: Arc::clone(&self.responder),
            synthesizer: Arc::clone(&self.synthesizer),
            transcript: self.transcript.clone(),
            options: self.options.clone(),
            cancel: self.cancel.clone(),
        };
        let handle = runtime.spawn(worker.run());
        *self.lock_worker() = Some(handle);

        info!("Background generation started");
        Ok(())
    }

    /// Request cancellation and wait up to the shutdown timeout for the
    /// worker to exit.
    ///
    /// Never fails: a worker that does not exit in time is left to finish
    /// its in-flight call and then observe the cancellation.
    pub async fn stop(&self) {
        self.cancel.cancel();

        let handle = self.lock_worker().take();
        if let Some(handle) = handle {
            match tokio::time::timeout(self.options.shutdown_timeout(), handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, "Generation worker ended abnormally"),
                Err(_) => warn!(
                    timeout_ms = self.options.shutdown_timeout().as_millis(),
                    "Generation worker did not stop within timeout"
                ),
            }
        }

        self.shared.set_state(GeneratorState::Stopped);
        info!("Background generation stopped");
    }

    /// Generated turns waiting to be presented.
    pub fn buffered_count(&self) -> usize {
        self.shared.queue.len()
    }

    pub fn is_running(&self) -> bool {
        self.shared.state() == GeneratorState::Running
    }

    pub fn state(&self) -> GeneratorState {
        self.shared.state()
    }

    pub const fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn status(&self) -> GeneratorStatus {
        let state = self.shared.state();
        let next_ordinal = self.shared.next_ordinal();
        GeneratorStatus {
            state,
            buffered: self.shared.queue.len(),
            running: state == GeneratorState::Running,
            next_ordinal,
            next_turn_index: next_ordinal.div_ceil(2),
            lookahead_depth: self.options.lookahead_depth(),
        }
    }

    /// Pop the oldest generated turn and hand it to `apply` while the queue
    /// is still locked. Only the coordinator may call this.
    pub(crate) fn take_ready_with<R>(&self, apply: impl FnOnce(GeneratedTurn) -> R) -> Option<R> {
        self.shared.queue.pop_with(apply)
    }

    #[cfg(test)]
    pub(crate) fn push_ready(&self, turn: GeneratedTurn) {
        self.shared.queue.push(turn);
    }

    fn lock_worker(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for BackgroundGenerator {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for BackgroundGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackgroundGenerator")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
