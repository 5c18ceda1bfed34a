//! JSON Lines ledger file.
//!
//! One `LedgerEvent` per line. Opening an existing file reads and verifies
//! the whole chain before any new event is accepted; new events are
//! appended and flushed one at a time, so a crash loses at most the event
//! being written.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info, warn};

use claimguard_contracts::{
    error::{ClaimError, ClaimResult},
    result::ClaimEntry,
};
use claimguard_core::traits::ResultSink;

use crate::{
    chain::verify_chain,
    event::{LedgerEvent, LedgerExport},
    memory::{lock, ChainState},
};

pub struct FileClaimLedger {
    ledger_id: String,
    path: PathBuf,
    state: Mutex<ChainState>,
}

impl FileClaimLedger {
    /// Open `path`, creating it when absent.
    ///
    /// # Errors
    ///
    /// `ClaimError::LedgerWriteFailed` when the file cannot be read, a line
    /// is not a ledger event, an event belongs to another ledger, or the
    /// stored chain fails verification.
    pub fn open(ledger_id: impl Into<String>, path: impl Into<PathBuf>) -> ClaimResult<Self> {
        let ledger_id = ledger_id.into();
        let path = path.into();
        let events = if path.exists() {
            read_events(&path)?
        } else {
            Vec::new()
        };

        if let Some(foreign) = events.iter().find(|e| e.ledger_id != ledger_id) {
            return Err(ClaimError::LedgerWriteFailed {
                reason: format!(
                    "'{}' belongs to ledger '{}', not '{}'",
                    path.display(),
                    foreign.ledger_id,
                    ledger_id
                ),
            });
        }
        if !verify_chain(&events) {
            warn!(path = %path.display(), "stored ledger chain is broken");
            return Err(ClaimError::LedgerWriteFailed {
                reason: format!("hash chain in '{}' failed verification", path.display()),
            });
        }

        info!(
            ledger_id = %ledger_id,
            path = %path.display(),
            events = events.len(),
            "ledger file opened"
        );
        Ok(Self {
            ledger_id,
            path,
            state: Mutex::new(ChainState::from_events(events)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn export_log(&self) -> ClaimResult<LedgerExport> {
        Ok(lock(&self.state)?.export(&self.ledger_id))
    }

    /// Re-read the file and verify the chain it holds.
    pub fn verify_integrity(&self) -> bool {
        match read_events(&self.path) {
            Ok(events) => verify_chain(&events),
            Err(_) => false,
        }
    }
}

impl ResultSink for FileClaimLedger {
    fn append(&self, entry: &ClaimEntry) -> ClaimResult<()> {
        let mut state = lock(&self.state)?;
        let event = state.next_event(&self.ledger_id, entry)?;

        let mut line = serde_json::to_string(&event).map_err(|e| write_failed(&self.path, e))?;
        line.push('\n');
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| write_failed(&self.path, e))?;
        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .map_err(|e| write_failed(&self.path, e))?;

        debug!(
            ledger_id = %self.ledger_id,
            sequence = event.sequence,
            claim_id = %entry.claim_id,
            "claim appended to ledger file"
        );
        state.push(event);
        Ok(())
    }
}

fn read_events(path: &Path) -> ClaimResult<Vec<LedgerEvent>> {
    let file = File::open(path).map_err(|e| write_failed(path, e))?;
    let mut events = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| write_failed(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line).map_err(|e| ClaimError::LedgerWriteFailed {
            reason: format!("'{}' line {}: {}", path.display(), index + 1, e),
        })?;
        events.push(event);
    }
    Ok(events)
}

fn write_failed(path: &Path, e: impl std::fmt::Display) -> ClaimError {
    ClaimError::LedgerWriteFailed {
        reason: format!("'{}': {}", path.display(), e),
    }
}
