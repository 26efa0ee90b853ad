//! Read-only views of the ledger handed to other components.

use std::sync::Arc;

use super::config::SessionConfig;
use super::role::Role;
use super::turn::{TurnEntry, TurnKind, classify};
use super::usage::TokenTotals;

/// Applied state of a ledger at one point in time.
///
/// Published by the ledger's owner after every append; readers never see a
/// half-applied turn.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub config: Arc<SessionConfig>,
    pub entries: Vec<TurnEntry>,
    pub totals: TokenTotals,
    pub complete: bool,
}

impl Transcript {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything a responder needs to write one turn.
///
/// Built from the *applied* transcript only. Turns that are generated but
/// not yet presented are not part of the context.
#[derive(Debug, Clone)]
pub struct GenerationSnapshot {
    pub config: Arc<SessionConfig>,
    /// Entries applied so far.
    pub entries: Vec<TurnEntry>,
    /// Side that speaks in the turn being generated.
    pub role: Role,
    /// Per-side index of the turn being generated.
    pub turn_index: u32,
    pub kind: TurnKind,
    /// Position of the turn in the whole exchange (1-based).
    pub ordinal: u32,
    /// Token totals at the applied point.
    pub totals: TokenTotals,
}

impl GenerationSnapshot {
    /// Snapshot for generating the turn at `ordinal`.
    pub fn for_ordinal(transcript: &Transcript, ordinal: u32) -> Self {
        let role = Role::for_ordinal(ordinal);
        let turn_index = ordinal.div_ceil(2);
        Self {
            config: Arc::clone(&transcript.config),
            entries: transcript.entries.clone(),
            role,
            turn_index,
            kind: classify(turn_index, transcript.config.turns_per_side),
            ordinal,
            totals: transcript.totals,
        }
    }

    /// Position defended by the speaking side.
    pub fn position(&self) -> &str {
        self.config.position_for(self.role)
    }

    /// Position defended by the other side.
    pub fn opponent_position(&self) -> &str {
        self.config.opponent_position_for(self.role)
    }

    /// Applied transcript as `"Debater A: ...\n\nDebater B: ..."`.
    pub fn history_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}: {}", entry.role.display_name(), entry.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
