//! Scenario 3: Unregistered Facility
//!
//! A clean patient at a facility that is missing from the registry. Facility
//! registration is crucial, so the claim is rejected whatever the model says.
//! The scenario repeats the claim with model scores 0, 50 and 100.
//!
//! Expected: "Facility Not Registered" fails, decision REJECTED for every
//! model score.

use claimguard_contracts::error::ClaimResult;

use super::{print_run, score_reference_claim, ScenarioRun};
use crate::mock_data;

/// Model scores the claim is replayed with.
pub const MODEL_SCORES: [u32; 3] = [0, 50, 100];

pub fn score(model_score: u32) -> ClaimResult<ScenarioRun> {
    score_reference_claim(&mock_data::claim_from_unregistered_facility(), model_score)
}

/// Run Scenario 3 and print the outcome for each model score.
pub fn run_scenario() -> ClaimResult<()> {
    println!("=== Scenario 3: Unregistered Facility ===");
    println!();
    println!("  Patient:  valid identity number and card, unique phone and address");
    println!("  Facility: {} (not in registry)", mock_data::UNREGISTERED_FACILITY_ID);
    println!();

    for (i, model_score) in MODEL_SCORES.iter().enumerate() {
        let label = (b'A' + i as u8) as char;
        println!("  --- Sub-case {label}: model {model_score}/100 ---");
        println!();
        let run = score(*model_score)?;
        print_run(&run);
        println!();
    }

    println!("  Scenario 3 complete.");
    println!();
    Ok(())
}
