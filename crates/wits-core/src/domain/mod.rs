//! Domain types for a staged two-party debate.
//!
//! These are pure data types with no infrastructure concerns. The only
//! mutable aggregate is [`TurnLedger`], and its single mutator is
//! [`TurnLedger::apply`].

mod config;
mod ledger;
mod role;
mod snapshot;
mod turn;
mod usage;

pub use config::{
    ConfigError, DEFAULT_TEMPERATURE, DEFAULT_TURNS_PER_SIDE, DebateFormat, MAX_SPEECH_SPEED,
    MAX_TEMPERATURE, MAX_TURNS_PER_SIDE, MIN_SPEECH_SPEED, MIN_TEMPERATURE, MIN_TURNS_PER_SIDE,
    SessionConfig,
};
pub use ledger::{LedgerError, TurnLedger};
pub use role::Role;
pub use snapshot::{GenerationSnapshot, Transcript};
pub use turn::{GeneratedTurn, TurnEntry, TurnKind, classify};
pub use usage::{TokenTotals, TokenUsage};
