//! The append-only turn ledger.
//!
//! The ledger is the authoritative record of applied turns. It derives whose
//! turn it is and whether the session has finished from the entries it holds.
//!
//! # Invariants
//!
//! - Entries strictly alternate role, starting with [`Role::first`].
//! - `complete` becomes true exactly when the entry count reaches
//!   [`SessionConfig::total_turns`]; `active` turns false in the same call
//!   and no entry is ever appended afterwards.
//! - `current_turn` increments once per B → A wrap.
//! - Cumulative token totals equal the sum of the entries' usage records.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::debug;

use super::config::SessionConfig;
use super::role::Role;
use super::snapshot::Transcript;
use super::turn::{TurnEntry, TurnKind, classify};
use super::usage::{TokenTotals, TokenUsage};

/// Errors raised by ledger mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// An append was attempted after the final turn.
    #[error("Ledger is complete after {entries} turns; no further turns can be applied")]
    AlreadyComplete { entries: usize },
}

/// Ordered record of applied turns plus derived session state.
#[derive(Debug, Clone)]
pub struct TurnLedger {
    config: Arc<SessionConfig>,
    entries: Vec<TurnEntry>,
    current_turn: u32,
    current_role: Role,
    active: bool,
    complete: bool,
    totals: TokenTotals,
}

impl TurnLedger {
    /// Start a fresh ledger: turn 1, side A, active.
    ///
    /// A config with no turns yields a ledger that is complete from the start.
    pub fn new(config: Arc<SessionConfig>) -> Self {
        let capacity = config.total_turns() as usize;
        let complete = capacity == 0;
        Self {
            config,
            entries: Vec::with_capacity(capacity),
            current_turn: 1,
            current_role: Role::first(),
            active: !complete,
            complete,
            totals: TokenTotals::default(),
        }
    }

    /// Append the next turn.
    ///
    /// The entry takes the ledger's current role and turn index. Callers must
    /// check [`is_complete`](Self::is_complete) first; appending to a finished
    /// ledger is rejected.
    pub fn apply(
        &mut self,
        content: impl Into<String>,
        audio_duration: Option<Duration>,
        usage: Option<TokenUsage>,
    ) -> Result<&TurnEntry, LedgerError> {
        if self.complete {
            return Err(LedgerError::AlreadyComplete {
                entries: self.entries.len(),
            });
        }

        if let Some(usage) = usage.as_ref() {
            self.totals.record(usage);
        }

        let entry = TurnEntry {
            role: self.current_role,
            content: content.into(),
            kind: self.current_kind(),
            turn_index: self.current_turn,
            created_at: Utc::now(),
            audio_duration,
            usage,
        };
        self.entries.push(entry);

        self.switch_role();

        if self.entries.len() >= self.config.total_turns() as usize {
            self.complete = true;
            self.active = false;
            debug!(entries = self.entries.len(), "Ledger complete");
        }

        Ok(&self.entries[self.entries.len() - 1])
    }

    fn switch_role(&mut self) {
        self.current_role = self.current_role.other();
        if self.current_role == Role::first() {
            self.current_turn += 1;
        }
    }

    pub fn config(&self) -> &Arc<SessionConfig> {
        &self.config
    }

    pub fn entries(&self) -> &[TurnEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recently applied entry.
    pub fn last(&self) -> Option<&TurnEntry> {
        self.entries.last()
    }

    /// Entries contributed by one side, in order.
    pub fn entries_for(&self, role: Role) -> impl Iterator<Item = &TurnEntry> {
        self.entries.iter().filter(move |entry| entry.role == role)
    }

    pub const fn current_turn(&self) -> u32 {
        self.current_turn
    }

    pub const fn current_role(&self) -> Role {
        self.current_role
    }

    /// Classification of the turn that would be appended next.
    pub fn current_kind(&self) -> TurnKind {
        classify(self.current_turn, self.config.turns_per_side)
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    pub const fn totals(&self) -> TokenTotals {
        self.totals
    }

    /// Entries a finished ledger holds.
    pub fn total_turns(&self) -> u32 {
        self.config.total_turns()
    }

    /// Entries still to be applied before completion.
    pub fn remaining_turns(&self) -> usize {
        (self.config.total_turns() as usize).saturating_sub(self.entries.len())
    }

    /// Immutable copy of the applied state, published to readers.
    pub fn transcript(&self) -> Transcript {
        Transcript {
            config: Arc::clone(&self.config),
            entries: self.entries.clone(),
            totals: self.totals,
            complete: self.complete,
        }
    }
}
