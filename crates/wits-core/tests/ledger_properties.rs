//! Whole-session properties of the turn ledger, checked for every allowed
//! session length.

use std::sync::Arc;

use wits_core::{Role, SessionConfig, TokenTotals, TokenUsage, TurnKind, TurnLedger, classify};

fn config(turns_per_side: u32) -> Arc<SessionConfig> {
    Arc::new(
        SessionConfig::new("Topic", "Position A", "Position B").with_turns_per_side(turns_per_side),
    )
}

#[test]
fn drained_ledger_has_two_n_alternating_entries() {
    for n in 4..=20 {
        let mut ledger = TurnLedger::new(config(n));
        let mut completions = 0;

        while !ledger.is_complete() {
            ledger.apply("x", None, None).unwrap();
            if ledger.is_complete() {
                completions += 1;
            }
        }

        assert_eq!(ledger.len(), (2 * n) as usize, "n = {n}");
        assert_eq!(completions, 1);
        assert_eq!(ledger.entries()[0].role, Role::first());
        for pair in ledger.entries().windows(2) {
            assert_ne!(pair[0].role, pair[1].role, "n = {n}");
        }
    }
}

#[test]
fn turn_index_is_shared_per_side() {
    let mut ledger = TurnLedger::new(config(6));
    while !ledger.is_complete() {
        ledger.apply("x", None, None).unwrap();
    }

    for (position, entry) in ledger.entries().iter().enumerate() {
        let expected = u32::try_from(position / 2).unwrap() + 1;
        assert_eq!(entry.turn_index, expected);
        assert_eq!(entry.kind, classify(expected, 6));
    }
}

#[test]
fn classification_for_eight_turns() {
    for index in 1..=2 {
        assert_eq!(classify(index, 8), TurnKind::Opening);
    }
    for index in 3..=6 {
        assert_eq!(classify(index, 8), TurnKind::Rebuttal);
    }
    for index in 7..=8 {
        assert_eq!(classify(index, 8), TurnKind::Closing);
    }
}

#[test]
fn totals_track_usage_across_session() {
    let mut ledger = TurnLedger::new(config(4));
    let mut expected = TokenTotals::default();

    let mut k = 0_u64;
    while !ledger.is_complete() {
        k += 1;
        let usage = TokenUsage::new(k * 10, k, "gpt-4o");
        expected.record(&usage);
        ledger.apply(format!("turn-{k}"), None, Some(usage)).unwrap();
        assert_eq!(ledger.totals(), expected);
    }

    assert!(ledger.apply("extra", None, None).is_err());
    assert_eq!(ledger.totals(), expected);
}
