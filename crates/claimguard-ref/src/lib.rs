//! # claimguard-ref
//!
//! Reference data and end-to-end scenarios for the ClaimGuard fraud scoring
//! engine.
//!
//! Each scenario pushes one sample claim through the full pipeline
//! (extraction, model, checklists, decision, ledger) and prints the outcome:
//!
//! 1. **Clean Claim** — valid patient at a registered facility with no
//!    history, auto-accepted.
//! 2. **Missing Identity** — no identity number on the patient, auto-rejected
//!    by a crucial flag with a total of zero.
//! 3. **Unregistered Facility** — facility absent from the registry, rejected
//!    whatever the model says.
//! 4. **Duplicate Contact** — phone number and address shared with other
//!    patients, routed to manual review.
//!
//! All data is hardcoded and fictional.

pub mod mock_data;
pub mod scenarios;

use claimguard_contracts::{config::ScoringConfig, error::ClaimResult};

/// Scoring configuration shipped with the reference runtime.
pub const REFERENCE_CONFIG: &str = include_str!("../config/scoring.toml");

/// Parse [`REFERENCE_CONFIG`].
pub fn reference_config() -> ClaimResult<ScoringConfig> {
    claimguard_policy::config::from_toml_str(REFERENCE_CONFIG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_config_matches_defaults() {
        assert_eq!(reference_config().unwrap(), ScoringConfig::default());
    }
}
