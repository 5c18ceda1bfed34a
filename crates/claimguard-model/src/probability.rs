//! Mapping from a fraud probability to a 0–100 model score.

use claimguard_contracts::{
    error::ClaimResult,
    result::{ModelScore, ScoreSource, MAX_MODEL_SCORE},
};

/// `score = floor(p × 100)`, with a risk message by band.
///
/// Probabilities outside `[0, 1]` (and NaN) are clamped first.
pub fn score_from_probability(probability: f64) -> ClaimResult<ModelScore> {
    let p = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    let score = ((p * 100.0).floor() as u32).min(MAX_MODEL_SCORE);
    ModelScore::new(score, p, risk_message(score), ScoreSource::Model)
}

fn risk_message(score: u32) -> &'static str {
    match score {
        0..=29 => "Low fraud risk based on model analysis",
        30..=59 => "Moderate fraud risk based on model analysis",
        _ => "High fraud risk based on model analysis",
    }
}
