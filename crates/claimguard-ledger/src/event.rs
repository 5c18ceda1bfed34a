//! Ledger event and export types.
//!
//! `LedgerEvent` is a single entry in the hash chain. It wraps a
//! `ClaimEntry` with sequence numbering and the SHA-256 hashes that make
//! tampering detectable. `LedgerExport` is a snapshot of the whole chain.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use claimguard_contracts::result::ClaimEntry;

/// A single entry in the SHA-256 hash chain of scored claims.
///
/// Each event commits to the previous event via `prev_hash`. Modifying any
/// field, including those of the embedded `entry`, invalidates `this_hash`
/// and every subsequent `prev_hash`, which `verify_chain` detects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The ledger this event belongs to.
    pub ledger_id: String,

    /// The finalized claim result.
    pub entry: ClaimEntry,

    /// SHA-256 hash (hex) of the previous event, or `GENESIS_HASH` for the
    /// first event.
    pub prev_hash: String,

    /// SHA-256 hash (hex) over (ledger_id, sequence, prev_hash, entry JSON).
    pub this_hash: String,
}

impl LedgerEvent {
    /// The `prev_hash` of the first event in every chain: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A snapshot of a ledger.
///
/// `terminal_hash` is the `this_hash` of the last event and commits to the
/// entire chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerExport {
    pub ledger_id: String,

    /// All events in chain order (sequence 0 first).
    pub events: Vec<LedgerEvent>,

    pub exported_at: DateTime<Utc>,

    /// Empty string if the ledger is empty.
    pub terminal_hash: String,
}
