//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. ledger_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. compact JSON of the claim entry

use sha2::{Digest, Sha256};

use claimguard_contracts::{
    error::{ClaimError, ClaimResult},
    result::ClaimEntry,
};

use crate::event::LedgerEvent;

/// Compute the SHA-256 hash for a single ledger event.
///
/// Returns a lowercase 64-character hex string.
pub fn hash_entry(
    ledger_id: &str,
    sequence: u64,
    entry: &ClaimEntry,
    prev_hash: &str,
) -> ClaimResult<String> {
    let entry_json = serde_json::to_vec(entry).map_err(|e| ClaimError::LedgerWriteFailed {
        reason: format!("claim entry {} is not serializable: {}", entry.claim_id, e),
    })?;

    let mut hasher = Sha256::new();
    hasher.update(ledger_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&entry_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify the integrity of a hash chain.
///
/// Valid when, for every event in order:
///
/// 1. **Sequence** — `sequence` equals its position in the slice.
/// 2. **Prev-hash linkage** — `prev_hash` equals the preceding event's
///    `this_hash` (or `GENESIS_HASH` for event 0).
/// 3. **Hash correctness** — `this_hash` matches the value recomputed from
///    the event's own fields.
///
/// An empty chain is valid.
pub fn verify_chain(events: &[LedgerEvent]) -> bool {
    let mut expected_prev = LedgerEvent::GENESIS_HASH;

    for (position, event) in events.iter().enumerate() {
        if event.sequence != position as u64 || event.prev_hash != expected_prev {
            return false;
        }

        match hash_entry(&event.ledger_id, event.sequence, &event.entry, &event.prev_hash) {
            Ok(recomputed) if recomputed == event.this_hash => {}
            _ => return false,
        }

        expected_prev = event.this_hash.as_str();
    }

    true
}
