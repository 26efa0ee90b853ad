//! Turn classification, applied ledger entries and generated turns.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::Role;
use super::usage::TokenUsage;

/// Classification of a turn within the debate structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    Opening,
    Rebuttal,
    Closing,
}

impl TurnKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::Rebuttal => "rebuttal",
            Self::Closing => "closing",
        }
    }
}

impl fmt::Display for TurnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a per-side turn index.
///
/// Indices 1 and 2 are openings, the last two indices (`turns_per_side - 1`
/// and above) are closings, everything in between is a rebuttal. Opening
/// wins when the two ranges overlap.
pub const fn classify(turn_index: u32, turns_per_side: u32) -> TurnKind {
    if turn_index <= 2 {
        TurnKind::Opening
    } else if turn_index >= turns_per_side.saturating_sub(1) {
        TurnKind::Closing
    } else {
        TurnKind::Rebuttal
    }
}

/// A turn that has been applied to the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnEntry {
    pub role: Role,
    pub content: String,
    pub kind: TurnKind,
    /// 1-based per-side index; A's k-th and B's k-th turn both carry k.
    pub turn_index: u32,
    pub created_at: DateTime<Utc>,
    /// Playback length once known.
    pub audio_duration: Option<Duration>,
    pub usage: Option<TokenUsage>,
}

/// A fully generated turn (text + audio) waiting to be applied.
///
/// Immutable once created. Produced by the background generator, consumed
/// exactly once by the presentation coordinator.
#[derive(Debug, Clone)]
pub struct GeneratedTurn {
    role: Role,
    turn_index: u32,
    ordinal: u32,
    content: String,
    audio: Bytes,
    usage: TokenUsage,
    generated_at: DateTime<Utc>,
}

impl GeneratedTurn {
    pub fn new(
        role: Role,
        turn_index: u32,
        ordinal: u32,
        content: impl Into<String>,
        audio: Bytes,
        usage: TokenUsage,
    ) -> Self {
        Self {
            role,
            turn_index,
            ordinal,
            content: content.into(),
            audio,
            usage,
            generated_at: Utc::now(),
        }
    }

    pub const fn role(&self) -> Role {
        self.role
    }

    pub const fn turn_index(&self) -> u32 {
        self.turn_index
    }

    /// 1-based position in the whole exchange.
    pub const fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Encoded audio; empty when synthesis failed.
    pub const fn audio(&self) -> &Bytes {
        &self.audio
    }

    pub const fn usage(&self) -> &TokenUsage {
        &self.usage
    }

    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// True when synthesis produced no audio.
    pub fn is_silent(&self) -> bool {
        self.audio.is_empty()
    }
}
