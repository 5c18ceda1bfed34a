//! The claim processor: runs one extracted claim end to end.
//!
//!   Model → Patient checklist → Facility checklist → Decision → Record
//!
//! The processor owns the model collaborator and the results store. A claim
//! is published to the store only after the decision is final, and the
//! value returned to the caller is exactly the value that was recorded.

use chrono::Utc;
use tracing::{debug, info, warn};

use claimguard_contracts::{
    claim::ExtractedClaim,
    error::ClaimResult,
    result::{ClaimEntry, ClaimScoreResult, ClaimSummary},
    subject::LookupTables,
};

use crate::{
    aggregator::ScoreAggregator,
    traits::{ModelInference, ResultSink},
};

/// Drives the scoring of one claim at a time.
pub struct ClaimProcessor {
    aggregator: ScoreAggregator,
    model: Box<dyn ModelInference>,
    sink: Box<dyn ResultSink>,
}

impl ClaimProcessor {
    pub fn new(
        aggregator: ScoreAggregator,
        model: Box<dyn ModelInference>,
        sink: Box<dyn ResultSink>,
    ) -> Self {
        Self {
            aggregator,
            model,
            sink,
        }
    }

    /// Score `claim` against `tables` and append the result to the store.
    ///
    /// # Errors
    ///
    /// Returns `Err` when the model is unavailable (wrap it in a fallback to
    /// avoid this), when a check is misconfigured, or when the store rejects
    /// the entry. In every error case nothing is published.
    pub fn process(
        &self,
        claim: &ExtractedClaim,
        tables: &LookupTables,
    ) -> ClaimResult<ClaimScoreResult> {
        debug!(claim_id = %claim.claim_id, "processing claim");

        let model = self.model.predict(&claim.medical)?;
        debug!(
            claim_id = %claim.claim_id,
            score = model.score,
            probability = model.probability,
            source = ?model.source,
            "model score obtained"
        );

        let result = self
            .aggregator
            .score_claim(tables, &claim.patient, &claim.facility, &model)?;

        let entry = ClaimEntry {
            claim_id: claim.claim_id.clone(),
            recorded_at: Utc::now(),
            summary: ClaimSummary::new(claim, &result),
            result: result.clone(),
        };
        if let Err(e) = self.sink.append(&entry) {
            warn!(claim_id = %claim.claim_id, error = %e, "failed to record claim result");
            return Err(e);
        }

        info!(
            claim_id = %claim.claim_id,
            decision = ?result.decision,
            total_score = result.total_score,
            "claim recorded"
        );
        Ok(result)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
