//! Scenario 2: Missing Identity
//!
//! The clean claim with its identity number removed. The identity check is
//! crucial, so the patient checklist stops there and the claim is rejected
//! without a total being computed. The facility checklist still runs and its
//! flags are still reported.
//!
//! Expected: "Identity Number Missing" fails with score 100, total = 0,
//! decision REJECTED.

use claimguard_contracts::error::ClaimResult;

use super::{print_run, score_reference_claim, ScenarioRun};
use crate::mock_data;

pub const MODEL_SCORE: u32 = 5;

pub fn score() -> ClaimResult<ScenarioRun> {
    score_reference_claim(&mock_data::claim_without_identity(), MODEL_SCORE)
}

/// Run Scenario 2 and print the outcome.
pub fn run_scenario() -> ClaimResult<()> {
    println!("=== Scenario 2: Missing Identity ===");
    println!();
    println!("  Patient:  no identity number (card number present)");
    println!("  Facility: org-example-001 (registered, no fraud history)");
    println!("  Model:    {MODEL_SCORE}/100");
    println!();

    let run = score()?;
    print_run(&run);

    println!();
    println!("  Scenario 2 complete.");
    println!();
    Ok(())
}
