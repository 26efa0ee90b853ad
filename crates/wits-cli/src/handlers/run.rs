//! `wits run`: stage a debate and present it turn by turn.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};
use wits_core::{GeneratedTurn, SessionConfig, Settings, TokenTotals, validate_settings};
use wits_openai::{ChatResponder, OpenAiClient, OpenAiConfig, SpeechSynthesizer};
use wits_runtime::{DebateSession, GeneratorOptions, GeneratorState};

use crate::commands::RunArgs;
use crate::error::CliError;
use crate::presentation::{audio_file_name, separator, turn_heading, usage_summary};

/// How often the presenter polls for the next turn.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Presentation behaviour for [`present`].
#[derive(Debug, Clone)]
pub struct PresentOptions {
    /// Advance without waiting for Enter.
    pub auto: bool,
    pub audio_dir: Option<PathBuf>,
    /// Extension for written audio files.
    pub audio_format: String,
    pub poll_interval: Duration,
}

impl PresentOptions {
    pub fn from_args(args: &RunArgs, settings: &Settings) -> Self {
        Self {
            auto: args.auto,
            audio_dir: args.audio_dir.clone(),
            audio_format: settings.audio_format.clone(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

pub async fn execute(args: RunArgs, settings: &Settings) -> Result<(), CliError> {
    let config = prepare_config(&args, settings)?;

    let client = Arc::new(OpenAiClient::new(
        OpenAiConfig::from_env()?.with_settings(settings),
    )?);
    let responder = Arc::new(ChatResponder::new(Arc::clone(&client)));
    let synthesizer = Arc::new(
        SpeechSynthesizer::new(client).with_voices(settings.available_voices.clone()),
    );

    let options = GeneratorOptions::new().with_lookahead_depth(args.lookahead);
    let mut session = DebateSession::new(config, responder, synthesizer, options)?;

    let present_options = PresentOptions::from_args(&args, settings);
    let mut stdout = std::io::stdout();
    let result = present(&mut session, &mut stdout, &present_options).await;

    session.shutdown().await;
    result.map(|_| ())
}

/// Validate `settings`, then build the session config and check its voices.
fn prepare_config(args: &RunArgs, settings: &Settings) -> Result<SessionConfig, CliError> {
    validate_settings(settings)?;

    let config = args.session_config(settings);
    for voice in [&config.voice_a, &config.voice_b] {
        if !settings.is_known_voice(voice) {
            return Err(CliError::Arguments(format!(
                "Unknown voice '{voice}'. Run `wits voices` to list them."
            )));
        }
    }
    Ok(config)
}

/// Start `session` and present every turn to `out`.
///
/// Returns the final token totals.
pub async fn present<W: Write>(
    session: &mut DebateSession,
    out: &mut W,
    options: &PresentOptions,
) -> Result<TokenTotals, CliError> {
    if let Some(dir) = &options.audio_dir {
        std::fs::create_dir_all(dir)?;
    }

    let config = Arc::clone(session.config());
    writeln!(out, "{}", separator())?;
    writeln!(out, "Topic: {}", config.topic)?;
    writeln!(out, "Debater A ({}): {}", config.voice_a, config.position_a)?;
    writeln!(out, "Debater B ({}): {}", config.voice_b, config.position_b)?;
    writeln!(
        out,
        "{} turns per debater, model {}",
        config.turns_per_side, config.model
    )?;
    writeln!(out, "{}", separator())?;

    session.start()?;

    while !session.is_complete() {
        let Some(turn) = wait_for_turn(session, options.poll_interval).await else {
            warn!("Generation stopped before the debate completed");
            return Err(CliError::Session(
                "Generation stopped before the debate completed".to_string(),
            ));
        };

        show_turn(session, &turn, out, options)?;

        if !session.is_complete() && !options.auto {
            write!(out, "Press Enter for the next turn...")?;
            out.flush()?;
            wait_for_enter().await?;
        }
    }

    let totals = session.ledger().totals();
    writeln!(out, "{}", separator())?;
    writeln!(out, "Debate complete.")?;
    writeln!(out, "{}", usage_summary(&totals, &config.model))?;
    Ok(totals)
}

/// Poll `advance` until a turn is ready, showing a spinner meanwhile.
///
/// Returns `None` if the generator stopped with nothing left to present.
async fn wait_for_turn(session: &mut DebateSession, poll_interval: Duration) -> Option<GeneratedTurn> {
    if let Some(turn) = session.advance() {
        return Some(turn);
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    let ledger = session.ledger();
    spinner.set_message(format!(
        "Waiting for {} (turn {})...",
        ledger.current_role().display_name(),
        ledger.current_turn()
    ));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let turn = loop {
        if let Some(turn) = session.advance() {
            break Some(turn);
        }
        if session.generator().state() == GeneratorState::Stopped && !session.has_ready_content() {
            break None;
        }
        tokio::time::sleep(poll_interval).await;
    };

    spinner.finish_and_clear();
    turn
}

fn show_turn<W: Write>(
    session: &DebateSession,
    turn: &GeneratedTurn,
    out: &mut W,
    options: &PresentOptions,
) -> Result<(), CliError> {
    let turns_per_side = session.config().turns_per_side;
    writeln!(out)?;
    if let Some(entry) = session.ledger().last() {
        writeln!(out, "{}", turn_heading(entry, turns_per_side))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", turn.content())?;

    if turn.is_silent() {
        writeln!(out, "(no audio)")?;
    } else if let Some(dir) = &options.audio_dir {
        let path = dir.join(audio_file_name(
            turn.ordinal(),
            turn.role(),
            &options.audio_format,
        ));
        std::fs::write(&path, turn.audio())?;
        debug!(path = %path.display(), bytes = turn.audio().len(), "Wrote turn audio");
        writeln!(out, "Audio: {}", path.display())?;
    }
    Ok(())
}

async fn wait_for_enter() -> Result<(), CliError> {
    tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|_| ())
    })
    .await
    .map_err(|e| CliError::Io(e.to_string()))??;
    Ok(())
}
