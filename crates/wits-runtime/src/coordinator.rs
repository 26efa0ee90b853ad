//! Presentation coordinator: the consumer side of the pipeline.
//!
//! The coordinator is the only writer of the [`TurnLedger`]. Each call to
//! [`advance`](PresentationCoordinator::advance) moves at most one generated
//! turn from the ready queue into the ledger and then publishes the new
//! transcript, so the generator never sees a half-applied turn.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use wits_core::{GeneratedTurn, Transcript, TurnLedger};

use crate::generator::{BackgroundGenerator, GeneratorStatus};

/// Point-in-time view of presentation progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationStatus {
    pub has_current_presentation: bool,
    pub has_ready_content: bool,
    /// Turns applied so far.
    pub ledger_len: usize,
    pub complete: bool,
    pub generator: GeneratorStatus,
}

/// Drains generated turns into the ledger, one per request.
#[derive(Debug)]
pub struct PresentationCoordinator {
    ledger: TurnLedger,
    generator: Arc<BackgroundGenerator>,
    transcript_tx: watch::Sender<Arc<Transcript>>,
    current: Option<GeneratedTurn>,
}

impl PresentationCoordinator {
    pub(crate) fn new(
        ledger: TurnLedger,
        generator: Arc<BackgroundGenerator>,
        transcript_tx: watch::Sender<Arc<Transcript>>,
    ) -> Self {
        Self {
            ledger,
            generator,
            transcript_tx,
            current: None,
        }
    }

    /// Apply the next generated turn, if one is ready.
    ///
    /// Returns `None` when nothing is buffered yet or the debate is already
    /// complete. Neither case is an error and neither touches the ledger.
    pub fn advance(&mut self) -> Option<GeneratedTurn> {
        if self.ledger.is_complete() {
            debug!("Debate complete; nothing to advance");
            return None;
        }

        let ledger = &mut self.ledger;
        let transcript_tx = &self.transcript_tx;

        // Apply and publish while the queue is locked, so the worker never
        // sees the freed slot before the transcript that includes the turn.
        let (turn, applied) = self.generator.take_ready_with(|turn| {
            let applied = ledger
                .apply(turn.content(), None, Some(turn.usage().clone()))
                .map(|entry| (entry.role, entry.turn_index, entry.kind));
            if applied.is_ok() {
                transcript_tx.send_replace(Arc::new(ledger.transcript()));
            }
            (turn, applied)
        })?;

        let (role, turn_index, kind) = match applied {
            Ok(position) => position,
            Err(e) => {
                warn!(ordinal = turn.ordinal(), error = %e, "Dropping generated turn");
                return None;
            }
        };

        if role != turn.role() || turn_index != turn.turn_index() {
            warn!(
                ordinal = turn.ordinal(),
                expected_turn = turn_index,
                generated_turn = turn.turn_index(),
                "Generated turn does not match ledger position"
            );
        }

        self.current = Some(turn.clone());

        info!(
            turn = turn_index,
            debater = %role,
            kind = %kind,
            applied = self.ledger.len(),
            buffered = self.generator.buffered_count(),
            complete = self.ledger.is_complete(),
            "Turn presented"
        );

        Some(turn)
    }

    /// Audio of the most recently applied turn.
    pub fn current_audio(&self) -> Option<Bytes> {
        self.current.as_ref().map(|turn| turn.audio().clone())
    }

    /// The most recently applied turn.
    pub const fn current_presentation(&self) -> Option<&GeneratedTurn> {
        self.current.as_ref()
    }

    /// Forget the current presentation. The ledger is not touched.
    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn has_ready_content(&self) -> bool {
        self.generator.buffered_count() > 0
    }

    pub fn is_complete(&self) -> bool {
        self.ledger.is_complete()
    }

    pub fn status(&self) -> PresentationStatus {
        PresentationStatus {
            has_current_presentation: self.current.is_some(),
            has_ready_content: self.has_ready_content(),
            ledger_len: self.ledger.len(),
            complete: self.ledger.is_complete(),
            generator: self.generator.status(),
        }
    }

    pub const fn ledger(&self) -> &TurnLedger {
        &self.ledger
    }

    /// Receive every transcript published after an applied turn.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Transcript>> {
        self.transcript_tx.subscribe()
    }

    pub const fn generator(&self) -> &Arc<BackgroundGenerator> {
        &self.generator
    }
}
