//! # claimguard-ledger
//!
//! Append-only, SHA-256 hash-chained store of scored claims.
//!
//! ## Overview
//!
//! Every finalized claim result is wrapped in a `LedgerEvent` that links to
//! the previous event via its SHA-256 hash. Tampering with any event, even
//! a single byte, breaks the chain and is detected by `verify_chain`.
//!
//! Two `ResultSink` implementations are provided:
//!
//! - [`InMemoryClaimLedger`] — events in memory; clones share one chain.
//! - [`FileClaimLedger`] — events as JSON Lines, verified on open.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use claimguard_ledger::InMemoryClaimLedger;
//!
//! let ledger = InMemoryClaimLedger::new("claims");
//! let processor = ClaimProcessor::new(aggregator, model, Box::new(ledger.clone()));
//! processor.process(&claim, &tables)?;
//!
//! assert!(ledger.verify_integrity());
//! let log = ledger.export_log()?;
//! ```

pub mod chain;
pub mod event;
pub mod file;
pub mod memory;

pub use chain::{hash_entry, verify_chain};
pub use event::{LedgerEvent, LedgerExport};
pub use file::FileClaimLedger;
pub use memory::InMemoryClaimLedger;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::Utc;

    use claimguard_contracts::{
        claim::ClaimId,
        error::ClaimError,
        result::{ClaimEntry, ClaimScoreResult, ClaimSummary, Decision, ScoreSource, SubjectScores},
    };
    use claimguard_core::traits::ResultSink;

    use super::{FileClaimLedger, InMemoryClaimLedger, LedgerEvent};

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Build a minimal `ClaimEntry` with a distinguishable claim id.
    fn make_entry(claim_id: &str, total_score: u32) -> ClaimEntry {
        ClaimEntry {
            claim_id: ClaimId::new(claim_id),
            recorded_at: Utc::now(),
            summary: ClaimSummary::default(),
            result: ClaimScoreResult {
                subject_scores: SubjectScores {
                    patient: 0,
                    facility: 0,
                    model: total_score,
                },
                total_score,
                flags: vec![],
                auto_reject: false,
                decision: Decision::Accepted,
                decision_reason: format!("Auto accept (score: {total_score} < 10)"),
                model_source: ScoreSource::Injected,
            },
        }
    }

    /// A unique scratch path for file-ledger tests.
    fn scratch_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "claimguard-ledger-{}-{}.jsonl",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        path
    }

    // ── In-memory ledger ──────────────────────────────────────────────────────

    /// Writing three entries and verifying produces a valid chain.
    #[test]
    fn test_hash_chain_integrity() {
        let ledger = InMemoryClaimLedger::new("ledger-integrity");
        ledger.append(&make_entry("CLM-1", 1)).unwrap();
        ledger.append(&make_entry("CLM-2", 2)).unwrap();
        ledger.append(&make_entry("CLM-3", 3)).unwrap();

        assert_eq!(ledger.len(), 3);
        assert!(ledger.verify_integrity(), "chain must be valid after sequential appends");
    }

    /// Mutating any stored result breaks the chain.
    #[test]
    fn test_tamper_detection() {
        let ledger = InMemoryClaimLedger::new("ledger-tamper");
        ledger.append(&make_entry("CLM-A", 5)).unwrap();
        ledger.append(&make_entry("CLM-B", 6)).unwrap();
        ledger.append(&make_entry("CLM-C", 7)).unwrap();

        {
            let mut state = ledger.state.lock().unwrap();
            state.events[0].entry.result.decision = Decision::Rejected;
        }

        assert!(
            !ledger.verify_integrity(),
            "chain must detect tampering with a stored entry"
        );
    }

    /// Dropping an event from the middle breaks the sequence.
    #[test]
    fn test_removed_event_is_detected() {
        let ledger = InMemoryClaimLedger::new("ledger-gap");
        for i in 0..3 {
            ledger.append(&make_entry(&format!("CLM-{i}"), i)).unwrap();
        }

        let mut events = ledger.export_log().unwrap().events;
        events.remove(1);
        assert!(!super::verify_chain(&events));
    }

    /// The first event's `prev_hash` must equal `LedgerEvent::GENESIS_HASH`.
    #[test]
    fn test_genesis_hash() {
        let ledger = InMemoryClaimLedger::new("ledger-genesis");
        ledger.append(&make_entry("CLM-1", 1)).unwrap();

        let log = ledger.export_log().unwrap();
        assert_eq!(log.events.len(), 1);
        assert_eq!(log.events[0].prev_hash, LedgerEvent::GENESIS_HASH);
        assert_eq!(log.events[0].sequence, 0);
    }

    /// `export_log()` contains every entry in order and commits to the last.
    #[test]
    fn test_export_log() {
        let ledger = InMemoryClaimLedger::new("ledger-export");
        ledger.append(&make_entry("CLM-alpha", 1)).unwrap();
        ledger.append(&make_entry("CLM-beta", 2)).unwrap();

        let log = ledger.export_log().unwrap();
        assert_eq!(log.ledger_id, "ledger-export");
        let ids: Vec<&str> = log.events.iter().map(|e| e.entry.claim_id.0.as_str()).collect();
        assert_eq!(ids, vec!["CLM-alpha", "CLM-beta"]);
        assert_eq!(log.terminal_hash, log.events[1].this_hash);
        assert!(super::verify_chain(&log.events));
    }

    /// Clones append to, and observe, the same chain.
    #[test]
    fn test_clones_share_chain() {
        let ledger = InMemoryClaimLedger::new("ledger-shared");
        let sink: Box<dyn ResultSink> = Box::new(ledger.clone());
        sink.append(&make_entry("CLM-1", 1)).unwrap();

        assert_eq!(ledger.len(), 1);
        assert!(ledger.verify_integrity());
    }

    /// An empty chain is valid.
    #[test]
    fn test_verify_empty() {
        let ledger = InMemoryClaimLedger::new("ledger-empty");
        assert!(ledger.is_empty());
        assert!(ledger.verify_integrity());
        assert!(ledger.export_log().unwrap().terminal_hash.is_empty());
        assert!(super::verify_chain(&[]));
    }

    // ── File ledger ───────────────────────────────────────────────────────────

    /// Reopening a ledger file continues its chain.
    #[test]
    fn test_file_ledger_resumes_chain() {
        let path = scratch_path("resume");
        {
            let ledger = FileClaimLedger::open("claims", &path).unwrap();
            ledger.append(&make_entry("CLM-1", 1)).unwrap();
            ledger.append(&make_entry("CLM-2", 2)).unwrap();
        }

        let ledger = FileClaimLedger::open("claims", &path).unwrap();
        ledger.append(&make_entry("CLM-3", 3)).unwrap();

        let log = ledger.export_log().unwrap();
        assert_eq!(log.events.len(), 3);
        assert_eq!(log.events[2].sequence, 2);
        assert!(ledger.verify_integrity());
        std::fs::remove_file(&path).unwrap();
    }

    /// A file edited on disk is refused on open.
    #[test]
    fn test_file_ledger_rejects_tampered_file() {
        let path = scratch_path("tamper");
        {
            let ledger = FileClaimLedger::open("claims", &path).unwrap();
            ledger.append(&make_entry("CLM-1", 1)).unwrap();
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, contents.replace("\"ACCEPTED\"", "\"REJECTED\"")).unwrap();

        let result = FileClaimLedger::open("claims", &path);
        assert!(matches!(result, Err(ClaimError::LedgerWriteFailed { .. })));
        std::fs::remove_file(&path).unwrap();
    }

    /// A file written under another ledger id is refused on open.
    #[test]
    fn test_file_ledger_rejects_foreign_ledger() {
        let path = scratch_path("foreign");
        {
            let ledger = FileClaimLedger::open("claims-a", &path).unwrap();
            ledger.append(&make_entry("CLM-1", 1)).unwrap();
        }

        match FileClaimLedger::open("claims-b", &path) {
            Err(ClaimError::LedgerWriteFailed { reason }) => assert!(reason.contains("claims-a")),
            other => panic!("expected LedgerWriteFailed, got {:?}", other.map(|l| l.path().to_path_buf())),
        }
        std::fs::remove_file(&path).unwrap();
    }
}
