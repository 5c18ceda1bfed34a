//! Scenario 1: Clean Claim
//!
//! A patient with a valid identity number and insurance card, unique contact
//! details, treated at a registered facility with no fraud history. The model
//! reports a low score of 5.
//!
//! Expected: every check passes, total = 5, decision ACCEPTED.

use claimguard_contracts::error::ClaimResult;

use super::{print_run, score_reference_claim, ScenarioRun};
use crate::mock_data;

/// Model score injected for this scenario.
pub const MODEL_SCORE: u32 = 5;

/// Score the clean sample claim.
pub fn score() -> ClaimResult<ScenarioRun> {
    score_reference_claim(&mock_data::clean_claim(), MODEL_SCORE)
}

/// Run Scenario 1 and print the outcome.
pub fn run_scenario() -> ClaimResult<()> {
    println!("=== Scenario 1: Clean Claim ===");
    println!();
    println!("  Patient:  valid identity number and card, unique phone and address");
    println!("  Facility: org-example-001 (registered, no fraud history)");
    println!("  Model:    {MODEL_SCORE}/100");
    println!();

    let run = score()?;
    print_run(&run);

    println!();
    println!("  Scenario 1 complete.");
    println!();
    Ok(())
}
