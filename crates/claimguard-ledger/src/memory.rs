//! In-memory implementation of `ResultSink`.
//!
//! `InMemoryClaimLedger` keeps all events in a `Vec` behind an
//! `Arc<Mutex<_>>`. Clones share the same chain, so one handle can be given
//! to the `ClaimProcessor` while another is kept for export and
//! verification.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::debug;

use claimguard_contracts::{
    error::{ClaimError, ClaimResult},
    result::ClaimEntry,
};
use claimguard_core::traits::ResultSink;

use crate::{
    chain::{hash_entry, verify_chain},
    event::{LedgerEvent, LedgerExport},
};

// ── Chain state ──────────────────────────────────────────────────────────────

/// The mutable interior shared by the ledger implementations.
#[derive(Debug)]
pub(crate) struct ChainState {
    /// All events written so far, in append order.
    pub(crate) events: Vec<LedgerEvent>,

    /// The `this_hash` of the last event, or `GENESIS_HASH` when empty.
    pub(crate) last_hash: String,
}

impl ChainState {
    pub(crate) fn new() -> Self {
        Self {
            events: Vec::new(),
            last_hash: LedgerEvent::GENESIS_HASH.to_string(),
        }
    }

    /// Resume from events already on record.
    pub(crate) fn from_events(events: Vec<LedgerEvent>) -> Self {
        let last_hash = events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_else(|| LedgerEvent::GENESIS_HASH.to_string());
        Self { events, last_hash }
    }

    /// Build the next event for `entry` without appending it.
    pub(crate) fn next_event(&self, ledger_id: &str, entry: &ClaimEntry) -> ClaimResult<LedgerEvent> {
        let sequence = self.events.len() as u64;
        let prev_hash = self.last_hash.clone();
        let this_hash = hash_entry(ledger_id, sequence, entry, &prev_hash)?;
        Ok(LedgerEvent {
            sequence,
            ledger_id: ledger_id.to_string(),
            entry: entry.clone(),
            prev_hash,
            this_hash,
        })
    }

    pub(crate) fn push(&mut self, event: LedgerEvent) {
        self.last_hash = event.this_hash.clone();
        self.events.push(event);
    }

    pub(crate) fn export(&self, ledger_id: &str) -> LedgerExport {
        let terminal_hash = self
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();
        LedgerExport {
            ledger_id: ledger_id.to_string(),
            events: self.events.clone(),
            exported_at: Utc::now(),
            terminal_hash,
        }
    }
}

pub(crate) fn lock(state: &Mutex<ChainState>) -> ClaimResult<MutexGuard<'_, ChainState>> {
    state.lock().map_err(|e| ClaimError::LedgerWriteFailed {
        reason: format!("ledger state lock poisoned: {}", e),
    })
}

// ── Public ledger ────────────────────────────────────────────────────────────

/// An in-memory, append-only claim ledger backed by a SHA-256 hash chain.
#[derive(Clone)]
pub struct InMemoryClaimLedger {
    ledger_id: String,
    pub(crate) state: Arc<Mutex<ChainState>>,
}

impl InMemoryClaimLedger {
    pub fn new(ledger_id: impl Into<String>) -> Self {
        Self {
            ledger_id: ledger_id.into(),
            state: Arc::new(Mutex::new(ChainState::new())),
        }
    }

    pub fn ledger_id(&self) -> &str {
        &self.ledger_id
    }

    /// Snapshot all events written so far.
    pub fn export_log(&self) -> ClaimResult<LedgerExport> {
        Ok(lock(&self.state)?.export(&self.ledger_id))
    }

    /// Check prev-hash linkage and hash correctness of every event.
    ///
    /// A poisoned lock counts as a failed check.
    pub fn verify_integrity(&self) -> bool {
        match lock(&self.state) {
            Ok(state) => verify_chain(&state.events),
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.state).map(|s| s.events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ResultSink for InMemoryClaimLedger {
    fn append(&self, entry: &ClaimEntry) -> ClaimResult<()> {
        let mut state = lock(&self.state)?;
        let event = state.next_event(&self.ledger_id, entry)?;
        debug!(
            ledger_id = %self.ledger_id,
            sequence = event.sequence,
            claim_id = %entry.claim_id,
            this_hash = %event.this_hash,
            "claim appended to ledger"
        );
        state.push(event);
        Ok(())
    }
}
