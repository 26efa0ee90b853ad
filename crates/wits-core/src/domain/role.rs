//! Debater roles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two sides of the exchange.
///
/// Side A always speaks first; the sides then strictly alternate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "debater_a")]
    A,
    #[serde(rename = "debater_b")]
    B,
}

impl Role {
    /// The role that opens the exchange.
    #[must_use]
    pub const fn first() -> Self {
        Self::A
    }

    /// The opposing role.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Role speaking at a 1-based position in the whole exchange.
    ///
    /// Odd ordinals belong to A, even ordinals to B.
    #[must_use]
    pub const fn for_ordinal(ordinal: u32) -> Self {
        if ordinal % 2 == 1 { Self::A } else { Self::B }
    }

    /// Human-readable name used in transcripts and prompts.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::A => "Debater A",
            Self::B => "Debater B",
        }
    }

    /// Short lowercase label (`"a"` / `"b"`), used in file names.
    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
