//! A model that always returns the same, caller-supplied score.

use claimguard_contracts::{error::ClaimResult, medical::MedicalData, result::ModelScore};
use claimguard_core::traits::ModelInference;

#[derive(Debug, Clone)]
pub struct FixedModel {
    score: ModelScore,
}

impl FixedModel {
    /// Fails with `ScoreOutOfRange` when `score` exceeds 100.
    pub fn new(score: u32) -> ClaimResult<Self> {
        Ok(Self {
            score: ModelScore::injected(score)?,
        })
    }
}

impl ModelInference for FixedModel {
    fn predict(&self, _medical: &MedicalData) -> ClaimResult<ModelScore> {
        Ok(self.score.clone())
    }
}
