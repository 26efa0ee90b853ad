//! A debate session: one ledger, one generator, one coordinator.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::watch;
use tracing::info;
use wits_core::{AiResponder, AudioSynthesizer, GeneratedTurn, SessionConfig, TurnLedger};

use crate::coordinator::{PresentationCoordinator, PresentationStatus};
use crate::error::SessionError;
use crate::generator::{BackgroundGenerator, GeneratorOptions};

/// Wires the generator and the coordinator around a single transcript
/// channel.
///
/// A session runs once. To restart, drop it and build a new one; dropping a
/// session cancels its worker.
#[derive(Debug)]
pub struct DebateSession {
    config: Arc<SessionConfig>,
    generator: Arc<BackgroundGenerator>,
    coordinator: PresentationCoordinator,
}

impl DebateSession {
    /// Validate `config` and build an idle session.
    pub fn new(
        config: SessionConfig,
        responder: Arc<dyn AiResponder>,
        synthesizer: Arc<dyn AudioSynthesizer>,
        options: GeneratorOptions,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let config = Arc::new(config);

        let ledger = TurnLedger::new(Arc::clone(&config));
        let (transcript_tx, transcript_rx) = watch::channel(Arc::new(ledger.transcript()));

        let generator = Arc::new(BackgroundGenerator::new(
            responder,
            synthesizer,
            transcript_rx,
            options,
        ));
        let coordinator =
            PresentationCoordinator::new(ledger, Arc::clone(&generator), transcript_tx);

        info!(
            topic = %config.topic,
            turns_per_side = config.turns_per_side,
            model = %config.model,
            "Debate session created"
        );

        Ok(Self {
            config,
            generator,
            coordinator,
        })
    }

    /// Begin generating turns in the background.
    pub fn start(&self) -> Result<(), SessionError> {
        self.generator.start()?;
        Ok(())
    }

    /// Stop background generation. Buffered turns remain available.
    pub async fn shutdown(&self) {
        self.generator.stop().await;
    }

    pub fn advance(&mut self) -> Option<GeneratedTurn> {
        self.coordinator.advance()
    }

    pub fn has_ready_content(&self) -> bool {
        self.coordinator.has_ready_content()
    }

    pub fn current_audio(&self) -> Option<Bytes> {
        self.coordinator.current_audio()
    }

    pub fn status(&self) -> PresentationStatus {
        self.coordinator.status()
    }

    pub fn is_complete(&self) -> bool {
        self.coordinator.is_complete()
    }

    pub const fn ledger(&self) -> &TurnLedger {
        self.coordinator.ledger()
    }

    pub const fn config(&self) -> &Arc<SessionConfig> {
        &self.config
    }

    pub const fn coordinator(&self) -> &PresentationCoordinator {
        &self.coordinator
    }

    pub const fn coordinator_mut(&mut self) -> &mut PresentationCoordinator {
        &mut self.coordinator
    }

    pub const fn generator(&self) -> &Arc<BackgroundGenerator> {
        &self.generator
    }
}
