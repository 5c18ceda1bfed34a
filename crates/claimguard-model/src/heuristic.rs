//! Heuristic fallback scorer.
//!
//! Used when no trained model is available. Draws a uniform random score
//! inside a band chosen from the diagnosis severity and billed amount:
//!
//! | condition                            | band     |
//! |--------------------------------------|----------|
//! | mild diagnosis, amount > 2,000,000   | [60, 90) |
//! | severe diagnosis, amount < 1,000,000 | [40, 70) |
//! | otherwise                            | [10, 40) |
//!
//! Results are non-deterministic unless the model is seeded.

use std::ops::Range;
use std::sync::Mutex;

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

use claimguard_contracts::{
    error::{ClaimError, ClaimResult},
    medical::{DiagnosisSeverity, MedicalData},
    result::{ModelScore, ScoreSource},
};
use claimguard_core::traits::ModelInference;

use crate::features::MILD_AMOUNT_LIMIT;

/// Amount below which a severe diagnosis is suspicious.
pub const SEVERE_AMOUNT_FLOOR: u64 = 1_000_000;

pub struct HeuristicModel {
    rng: Mutex<StdRng>,
}

impl HeuristicModel {
    /// Seeded from the operating system.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Reproducible draws for tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// The band a claim's score is drawn from.
    pub fn band(medical: &MedicalData) -> Range<u32> {
        match medical.diagnosis.severity {
            DiagnosisSeverity::Mild if medical.claim_amount > MILD_AMOUNT_LIMIT => 60..90,
            DiagnosisSeverity::Severe if medical.claim_amount < SEVERE_AMOUNT_FLOOR => 40..70,
            _ => 10..40,
        }
    }
}

impl Default for HeuristicModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelInference for HeuristicModel {
    fn predict(&self, medical: &MedicalData) -> ClaimResult<ModelScore> {
        let band = Self::band(medical);
        let score = {
            let mut rng = self.rng.lock().map_err(|_| ClaimError::ModelUnavailable {
                reason: "heuristic random source poisoned".to_string(),
            })?;
            rng.random_range(band.clone())
        };
        debug!(score, band_start = band.start, band_end = band.end, "heuristic score drawn");

        ModelScore::new(
            score,
            f64::from(score) / 100.0,
            format!("Heuristic fraud score (no trained model): {score}/100"),
            ScoreSource::HeuristicFallback,
        )
    }
}
