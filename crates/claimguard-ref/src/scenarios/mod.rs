//! End-to-end claim scoring scenarios.
//!
//! Each scenario feeds one sample claim from [`crate::mock_data`] through the
//! real pipeline: `ClaimExtractor` → model → `ScoreAggregator` with the
//! `ThresholdPolicy` → `InMemoryClaimLedger`, then prints the flags, the
//! decision and the ledger integrity status.
//!
//! Model scores are injected with `FixedModel` so every run is repeatable.

pub mod clean_claim;
pub mod duplicate_contact;
pub mod missing_identity;
pub mod unregistered_facility;

use serde_json::Value;
use tracing::info;

use claimguard_contracts::{error::ClaimResult, result::ClaimScoreResult};
use claimguard_core::{ClaimProcessor, ScoreAggregator};
use claimguard_intake::ClaimExtractor;
use claimguard_ledger::InMemoryClaimLedger;
use claimguard_model::FixedModel;
use claimguard_policy::ThresholdPolicy;

use crate::{mock_data, reference_config};

/// Outcome of one scenario run: the recorded result and the ledger it went to.
pub struct ScenarioRun {
    pub result: ClaimScoreResult,
    pub ledger: InMemoryClaimLedger,
}

/// Score `raw` against the reference tables with an injected model score.
pub fn score_reference_claim(raw: &Value, model_score: u32) -> ClaimResult<ScenarioRun> {
    let config = reference_config()?;
    let claim = ClaimExtractor::new()?.extract(raw)?;

    let ledger = InMemoryClaimLedger::new(format!("scenario-{}", claim.claim_id));
    let processor = ClaimProcessor::new(
        ScoreAggregator::new(&config, Box::new(ThresholdPolicy::from_config(&config))),
        Box::new(FixedModel::new(model_score)?),
        Box::new(ledger.clone()),
    );

    let result = processor.process(&claim, &mock_data::lookup_tables())?;
    info!(claim_id = %claim.claim_id, decision = ?result.decision, "scenario claim scored");
    Ok(ScenarioRun { result, ledger })
}

/// Print flags, scores, decision and ledger status for a finished run.
pub fn print_run(run: &ScenarioRun) {
    let result = &run.result;

    println!("  Flags:");
    for flag in &result.flags {
        println!(
            "    [{}] {:<8} {:<32} score {:>3}  {}",
            if flag.passed() { "PASS" } else { "FAIL" },
            flag.flag_type().as_str(),
            flag.name(),
            flag.score(),
            flag.message()
        );
    }
    println!();
    println!(
        "  Subject scores:         patient {} / facility {} / model {}",
        result.subject_scores.patient, result.subject_scores.facility, result.subject_scores.model
    );
    println!("  Total score:            {}", result.total_score);
    println!("  Auto reject:            {}", result.auto_reject);
    println!("  Decision:               {:?}", result.decision);
    println!("  Reason:                 {}", result.decision_reason);
    println!();
    println!(
        "  Ledger integrity:       {} ({} entr{} recorded)",
        if run.ledger.verify_integrity() { "VERIFIED" } else { "FAILED" },
        run.ledger.len(),
        if run.ledger.len() == 1 { "y" } else { "ies" }
    );
}

/// Run every scenario in order.
pub fn run_all() -> ClaimResult<()> {
    clean_claim::run_scenario()?;
    missing_identity::run_scenario()?;
    unregistered_facility::run_scenario()?;
    duplicate_contact::run_scenario()?;
    Ok(())
}
