//! Scoring outcomes: per-subject checklist results, model scores, and the
//! finalized per-claim result.
//!
//! `ClaimScoreResult` is what the aggregator returns for each claim.
//! `ClaimEntry` is what gets appended to the results store, one per claim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    claim::{ClaimId, ExtractedClaim},
    error::{ClaimError, ClaimResult},
    flag::{FlagResult, FlagType, ScoreRange},
};

/// Name of the pseudo-flag carrying the model's score.
pub const MODEL_FLAG_NAME: &str = "AI Fraud Detection";

/// Name used instead of `MODEL_FLAG_NAME` when the heuristic fallback scored the claim.
pub const HEURISTIC_FLAG_NAME: &str = "AI Fraud Detection (Heuristic)";

/// Upper bound of a model score.
pub const MAX_MODEL_SCORE: u32 = 100;

/// Terminal decision for a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Accepted,
    NeedsReview,
    Rejected,
}

/// A decision together with its human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionVerdict {
    pub decision: Decision,
    pub reason: String,
}

/// Where a model score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// A trained model's probability, mapped to 0–100.
    Model,
    /// Random draw inside heuristic bands; non-deterministic.
    HeuristicFallback,
    /// Supplied by the caller (tests, operator override).
    Injected,
}

/// Output of the model-inference collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    pub score: u32,
    pub probability: f64,
    pub message: String,
    pub source: ScoreSource,
}

impl ModelScore {
    /// Build a model score, rejecting values outside 0–100 / 0.0–1.0.
    pub fn new(
        score: u32,
        probability: f64,
        message: impl Into<String>,
        source: ScoreSource,
    ) -> ClaimResult<Self> {
        if score > MAX_MODEL_SCORE || !(0.0..=1.0).contains(&probability) {
            return Err(ClaimError::ScoreOutOfRange {
                flag_type: FlagType::Flex,
                name: MODEL_FLAG_NAME.to_string(),
                score,
                min: 0,
                max: MAX_MODEL_SCORE,
            });
        }
        Ok(Self {
            score,
            probability,
            message: message.into(),
            source,
        })
    }

    /// A caller-supplied score with probability `score / 100`.
    pub fn injected(score: u32) -> ClaimResult<Self> {
        Self::new(
            score,
            f64::from(score.min(MAX_MODEL_SCORE)) / 100.0,
            format!("Injected fraud score: {score}/100"),
            ScoreSource::Injected,
        )
    }

    pub fn flag_name(&self) -> &'static str {
        match self.source {
            ScoreSource::HeuristicFallback => HEURISTIC_FLAG_NAME,
            ScoreSource::Model | ScoreSource::Injected => MODEL_FLAG_NAME,
        }
    }

    /// Package the score as the trailing `flex` pseudo-flag of a claim.
    pub fn to_flag(&self) -> ClaimResult<FlagResult> {
        FlagResult::scored(
            FlagType::Flex,
            self.score,
            ScoreRange::new(1, MAX_MODEL_SCORE),
            self.flag_name(),
            self.message.clone(),
        )
    }
}

/// Aggregated result of one subject's checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistOutcome {
    /// Sum of non-crucial scores. Always 0 when `auto_reject` is set.
    pub total_score: u32,
    /// Every flag that fired, in evaluation order.
    pub flags: Vec<FlagResult>,
    /// True when any crucial check failed.
    pub auto_reject: bool,
}

/// Per-source score breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectScores {
    pub patient: u32,
    pub facility: u32,
    pub model: u32,
}

/// The finalized scoring result for one claim.
///
/// Built once by the aggregator and never modified afterwards. Carries no
/// timestamp, so identical inputs produce an identical value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimScoreResult {
    pub subject_scores: SubjectScores,
    /// Left at 0 when the claim was auto-rejected.
    pub total_score: u32,
    /// Patient flags, then facility flags, then the model pseudo-flag.
    pub flags: Vec<FlagResult>,
    pub auto_reject: bool,
    pub decision: Decision,
    pub decision_reason: String,
    pub model_source: ScoreSource,
}

impl ClaimScoreResult {
    pub fn requires_review(&self) -> bool {
        self.decision == Decision::NeedsReview
    }
}

/// Human-readable facts about a scored claim, kept next to its result so a
/// reviewer can read a ledger entry without the raw claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub patient_name: Option<String>,
    pub facility_name: Option<String>,
    /// Diagnosis display text.
    pub diagnosis: Option<String>,
    pub claim_amount: u64,
    pub requires_review: bool,
}

impl ClaimSummary {
    pub fn new(claim: &ExtractedClaim, result: &ClaimScoreResult) -> Self {
        Self {
            patient_name: claim.patient.display_name.clone(),
            facility_name: claim.facility.display_name.clone(),
            diagnosis: claim.medical.diagnosis.display.clone(),
            claim_amount: claim.medical.claim_amount,
            requires_review: result.requires_review(),
        }
    }
}

/// An immutable record of one scored claim, appended to the results store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimEntry {
    pub claim_id: ClaimId,
    pub recorded_at: DateTime<Utc>,
    pub summary: ClaimSummary,
    pub result: ClaimScoreResult,
}
