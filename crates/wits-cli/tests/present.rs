//! End-to-end presentation with stub ports.
//!
//! Runs `handlers::run::present` in auto mode against responders that answer
//! instantly, and checks what reaches the terminal and the audio directory.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use wits_cli::handlers::run::{PresentOptions, present};
use wits_core::{
    AiResponder, AudioSynthesizer, GenerationSnapshot, ResponderError, ResponderReply,
    SessionConfig, SynthesisError, TokenUsage,
};
use wits_runtime::{DebateSession, GeneratorOptions};

struct NumberedResponder;

#[async_trait]
impl AiResponder for NumberedResponder {
    async fn generate(
        &self,
        snapshot: &GenerationSnapshot,
    ) -> Result<ResponderReply, ResponderError> {
        Ok(ResponderReply::new(
            format!("Argument number {}.", snapshot.ordinal),
            TokenUsage::new(1000, 200, snapshot.config.model.clone()),
        ))
    }
}

/// Silent for the second turn, otherwise echoes the voice.
struct VoiceSynthesizer;

#[async_trait]
impl AudioSynthesizer for VoiceSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str, _speed: f32) -> Result<Bytes, SynthesisError> {
        if text.contains("number 2.") {
            return Err(SynthesisError::Failed("offline".to_string()));
        }
        Ok(Bytes::from(format!("{voice}:{text}")))
    }
}

fn session() -> DebateSession {
    DebateSession::new(
        SessionConfig::new("Homework", "Homework helps", "Homework hurts").with_turns_per_side(4),
        Arc::new(NumberedResponder),
        Arc::new(VoiceSynthesizer),
        GeneratorOptions::new().with_poll_interval(Duration::from_millis(5)),
    )
    .unwrap()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn auto_mode_presents_every_turn_and_writes_audio() {
    let dir = tempfile::tempdir().unwrap();
    let audio_dir = dir.path().join("audio");
    let options = PresentOptions {
        auto: true,
        audio_dir: Some(audio_dir.clone()),
        audio_format: "mp3".to_string(),
        poll_interval: Duration::from_millis(5),
    };

    let mut session = session();
    let mut out = Vec::new();
    let totals = tokio::time::timeout(
        Duration::from_secs(10),
        present(&mut session, &mut out, &options),
    )
    .await
    .expect("presentation finished")
    .unwrap();
    session.shutdown().await;

    assert_eq!(totals.input_tokens, 8000);
    assert_eq!(totals.output_tokens, 1600);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Topic: Homework"));
    assert!(text.contains("Debater A | Opening statement | turn 1 of 4"));
    assert!(text.contains("Debater B | Closing argument | turn 4 of 4"));
    assert!(text.contains("(no audio)"));
    assert!(text.contains("Debate complete."));
    assert!(text.contains("9600 total"));
    assert!(!text.contains("Press Enter"));

    let first = text.find("Argument number 1.").unwrap();
    let last = text.find("Argument number 8.").unwrap();
    assert!(first < last);

    let audio = std::fs::read(audio_dir.join("turn-01-a.mp3")).unwrap();
    assert_eq!(audio, b"alloy:Argument number 1.");
    let audio = std::fs::read(audio_dir.join("turn-08-b.mp3")).unwrap();
    assert_eq!(audio, b"echo:Argument number 8.");
    assert!(!audio_dir.join("turn-02-b.mp3").exists());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn presenting_without_audio_dir_writes_nothing() {
    let options = PresentOptions {
        auto: true,
        audio_dir: None,
        audio_format: "mp3".to_string(),
        poll_interval: Duration::from_millis(5),
    };

    let mut session = session();
    let mut out = Vec::new();
    tokio_test::assert_ok!(present(&mut session, &mut out, &options).await);
    session.shutdown().await;

    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("Audio:"));
    assert_eq!(session.ledger().len(), 8);
}
