//! Deterministic placeholder statements.
//!
//! Used when the responder fails so that every turn still has content
//! appropriate to its side and classification.

use crate::domain::{GenerationSnapshot, TurnKind};

/// Placeholder text for the turn described by `snapshot`.
pub fn fallback_response(snapshot: &GenerationSnapshot) -> String {
    let name = snapshot.role.display_name();
    let position = snapshot.position();
    let topic = &snapshot.config.topic;

    match snapshot.kind {
        TurnKind::Opening => format!(
            "I'm {name}, and I strongly believe that {position}. Throughout this debate, \
             I will demonstrate why this position is not only logical but necessary for \
             our understanding of {topic}."
        ),
        TurnKind::Rebuttal => format!(
            "While my opponent raises some points, I must respectfully disagree. The \
             evidence clearly supports {position}, and I believe the arguments presented \
             so far strengthen my position."
        ),
        TurnKind::Closing => format!(
            "In conclusion, I have demonstrated that {position} is the most reasonable and \
             well-supported position on {topic}. I believe the arguments presented today \
             clearly favor my stance."
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{Role, SessionConfig, TurnLedger};

    fn snapshot(ordinal: u32) -> GenerationSnapshot {
        let config = SessionConfig::new(
            "space exploration",
            "we should colonize Mars",
            "we should fix Earth first",
        )
        .with_turns_per_side(8);
        let ledger = TurnLedger::new(Arc::new(config));
        GenerationSnapshot::for_ordinal(&ledger.transcript(), ordinal)
    }

    #[test]
    fn test_opening_names_speaker_and_topic() {
        let text = fallback_response(&snapshot(2));
        assert!(text.starts_with("I'm Debater B"));
        assert!(text.contains("we should fix Earth first"));
        assert!(text.contains("space exploration"));
    }

    #[test]
    fn test_rebuttal_uses_own_position() {
        let snap = snapshot(5);
        assert_eq!(snap.role, Role::A);
        let text = fallback_response(&snap);
        assert!(text.starts_with("While my opponent"));
        assert!(text.contains("we should colonize Mars"));
    }

    #[test]
    fn test_closing() {
        let text = fallback_response(&snapshot(16));
        assert!(text.starts_with("In conclusion"));
        assert!(text.contains("space exploration"));
    }

    #[test]
    fn test_is_deterministic() {
        assert_eq!(fallback_response(&snapshot(7)), fallback_response(&snapshot(7)));
    }
}
