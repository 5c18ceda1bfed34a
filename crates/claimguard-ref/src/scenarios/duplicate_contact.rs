//! Scenario 4: Duplicate Contact
//!
//! The patient's phone number is registered by four other patients and their
//! address by six. Both duplicate checks fail with scores inside their tiers.
//!
//! Sub-case A: registered facility, no history.
//!   Expected: phone 10 + address 2 + model 5 = 17, decision NEEDS_REVIEW.
//!
//! Sub-case B: same patient at org-example-002, which has a moderate violation.
//!   Expected: 17 + history 50 = 67, decision REJECTED on score.

use serde_json::json;

use claimguard_contracts::error::ClaimResult;

use super::{print_run, score_reference_claim, ScenarioRun};
use crate::mock_data;

pub const MODEL_SCORE: u32 = 5;

/// Sub-case A.
pub fn score() -> ClaimResult<ScenarioRun> {
    score_reference_claim(&mock_data::claim_with_shared_contact(), MODEL_SCORE)
}

/// Sub-case B.
pub fn score_at_flagged_facility() -> ClaimResult<ScenarioRun> {
    let mut raw = mock_data::claim_from_flagged_facility();
    raw["patient"]["telecom"] = json!([{ "system": "phone", "value": mock_data::SHARED_PHONE }]);
    raw["patient"]["address"] = json!([{ "text": mock_data::SHARED_ADDRESS }]);
    score_reference_claim(&raw, MODEL_SCORE)
}

/// Run Scenario 4 and print both sub-cases.
pub fn run_scenario() -> ClaimResult<()> {
    println!("=== Scenario 4: Duplicate Contact ===");
    println!();
    println!("  Patient:  phone {} (4 patients)", mock_data::SHARED_PHONE);
    println!("            address \"{}\" (6 patients)", mock_data::SHARED_ADDRESS);
    println!("  Model:    {MODEL_SCORE}/100");
    println!();

    println!("  --- Sub-case A: org-example-001 (no fraud history) ---");
    println!();
    print_run(&score()?);
    println!();

    println!(
        "  --- Sub-case B: {} (moderate violation) ---",
        mock_data::FLAGGED_FACILITY_ID
    );
    println!();
    print_run(&score_at_flagged_facility()?);
    println!();

    println!("  Scenario 4 complete.");
    println!();
    Ok(())
}
