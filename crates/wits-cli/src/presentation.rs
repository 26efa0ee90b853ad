//! Terminal formatting for debate output.

use wits_core::{Role, TokenTotals, TurnEntry, TurnKind};
use wits_openai::pricing::{chat_cost, format_cost};

/// Width of separator lines.
pub const SEPARATOR_WIDTH: usize = 72;

/// Horizontal separator line.
pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

const fn kind_label(kind: TurnKind) -> &'static str {
    match kind {
        TurnKind::Opening => "Opening statement",
        TurnKind::Rebuttal => "Rebuttal",
        TurnKind::Closing => "Closing argument",
    }
}

/// Heading printed above a presented turn.
///
/// ```rust
/// use std::sync::Arc;
/// use wits_cli::presentation::turn_heading;
/// use wits_core::{SessionConfig, TurnLedger};
///
/// let mut ledger = TurnLedger::new(Arc::new(SessionConfig::new("t", "a", "b")));
/// let entry = ledger.apply("Hello", None, None).unwrap().clone();
/// assert_eq!(turn_heading(&entry, 8), "Debater A | Opening statement | turn 1 of 8");
/// ```
pub fn turn_heading(entry: &TurnEntry, turns_per_side: u32) -> String {
    format!(
        "{} | {} | turn {} of {}",
        entry.role.display_name(),
        kind_label(entry.kind),
        entry.turn_index,
        turns_per_side
    )
}

/// File name for a turn's audio, e.g. `turn-03-a.mp3`.
pub fn audio_file_name(ordinal: u32, role: Role, extension: &str) -> String {
    format!("turn-{ordinal:02}-{}.{extension}", role.short_label())
}

/// Closing token usage report.
pub fn usage_summary(totals: &TokenTotals, model: &str) -> String {
    let cost = chat_cost(model, totals.input_tokens, totals.output_tokens)
        .map_or_else(|| "unknown".to_string(), format_cost);
    format!(
        "Token usage ({model}): {} input, {} output, {} total | estimated chat cost {cost}",
        totals.input_tokens, totals.output_tokens, totals.total_tokens
    )
}
