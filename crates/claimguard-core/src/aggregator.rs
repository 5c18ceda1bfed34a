//! The score aggregator: combines both subjects' checklists and the model
//! score into one finalized `ClaimScoreResult`.
//!
//! Pipeline:
//!
//!   patient checklist → facility checklist → [auto-reject?] → sum → policy
//!
//! Both checklists always run: a crucial failure on the patient stops the
//! patient's own non-crucial checks but never the facility's, so a rejected
//! claim still reports every facility flag. When either subject raised
//! auto-reject, no total is computed and the decision policy is told so.

use tracing::{debug, info};

use claimguard_contracts::{
    config::ScoringConfig,
    error::ClaimResult,
    flag::FlagResult,
    result::{ChecklistOutcome, ClaimScoreResult, ModelScore, SubjectScores},
    subject::{FacilitySubject, LookupTables, PatientSubject},
};

use crate::{checklist::Checklist, traits::DecisionPolicy};

/// Scores one claim at a time against a fixed configuration.
pub struct ScoreAggregator {
    patient: Checklist<PatientSubject>,
    facility: Checklist<FacilitySubject>,
    policy: Box<dyn DecisionPolicy>,
}

impl ScoreAggregator {
    /// Build the standard patient and facility checklists from `config`.
    pub fn new(config: &ScoringConfig, policy: Box<dyn DecisionPolicy>) -> Self {
        Self::with_checklists(Checklist::patient(config), Checklist::facility(config), policy)
    }

    /// Use caller-supplied checklists.
    pub fn with_checklists(
        patient: Checklist<PatientSubject>,
        facility: Checklist<FacilitySubject>,
        policy: Box<dyn DecisionPolicy>,
    ) -> Self {
        Self {
            patient,
            facility,
            policy,
        }
    }

    /// Score a claim.
    ///
    /// `tables` are only read. Calling this twice with identical inputs
    /// yields identical results.
    ///
    /// # Errors
    ///
    /// Only configuration faults (a rule score outside its tier's range)
    /// are errors. Invalid subject data is reported through flags.
    pub fn score_claim(
        &self,
        tables: &LookupTables,
        patient: &PatientSubject,
        facility: &FacilitySubject,
        model: &ModelScore,
    ) -> ClaimResult<ClaimScoreResult> {
        let patient_outcome = self.patient.run(patient, tables)?;
        debug!(
            score = patient_outcome.total_score,
            auto_reject = patient_outcome.auto_reject,
            flags = patient_outcome.flags.len(),
            "patient checklist complete"
        );

        let facility_outcome = self.facility.run(facility, tables)?;
        debug!(
            score = facility_outcome.total_score,
            auto_reject = facility_outcome.auto_reject,
            flags = facility_outcome.flags.len(),
            "facility checklist complete"
        );

        let auto_reject = patient_outcome.auto_reject || facility_outcome.auto_reject;
        let total_score = if auto_reject {
            0
        } else {
            patient_outcome
                .total_score
                .saturating_add(facility_outcome.total_score)
                .saturating_add(model.score)
        };

        let verdict = self.policy.decide(total_score, auto_reject);
        info!(
            total_score,
            auto_reject,
            decision = ?verdict.decision,
            model_source = ?model.source,
            "claim scored"
        );

        let subject_scores = SubjectScores {
            patient: patient_outcome.total_score,
            facility: facility_outcome.total_score,
            model: model.score,
        };
        let flags = collect_flags(patient_outcome, facility_outcome, model)?;

        Ok(ClaimScoreResult {
            subject_scores,
            total_score,
            flags,
            auto_reject,
            decision: verdict.decision,
            decision_reason: verdict.reason,
            model_source: model.source,
        })
    }
}

/// Patient flags, then facility flags, then the model pseudo-flag.
fn collect_flags(
    patient: ChecklistOutcome,
    facility: ChecklistOutcome,
    model: &ModelScore,
) -> ClaimResult<Vec<FlagResult>> {
    let mut flags = patient.flags;
    flags.extend(facility.flags);
    flags.push(model.to_flag()?);
    Ok(flags)
}

// ── Tests ────────────────────────────────────────────────────────────────────
