//! Token usage accounting.

use serde::{Deserialize, Serialize};

/// Token usage reported for a single generated turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    /// Model that produced the turn.
    pub model: String,
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64, model: impl Into<String>) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: input_tokens + output_tokens,
            model: model.into(),
        }
    }

    /// Zero-valued usage, recorded when a turn falls back to placeholder text.
    pub fn zero(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// True when no tokens were consumed.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.input_tokens == 0 && self.output_tokens == 0 && self.total_tokens == 0
    }
}

/// Cumulative token counters across applied turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTotals {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

impl TokenTotals {
    /// Add one turn's usage to the running totals.
    pub const fn record(&mut self, usage: &TokenUsage) {
        self.input_tokens = self.input_tokens.saturating_add(usage.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(usage.output_tokens);
        self.total_tokens = self.total_tokens.saturating_add(usage.total_tokens);
    }
}
