//! The checklist runner: an ordered list of rule checks for one subject.
//!
//! Evaluation contract:
//!
//!   crucial checks (all of them) → [any failed? stop] → non-crucial checks
//!
//! 1. Every crucial check runs, in registration order, so each crucial
//!    violation is reported.
//! 2. If any crucial check failed, `auto_reject` is set and the remaining
//!    checks for this subject are skipped; `total_score` stays 0.
//! 3. Otherwise the non-crucial checks run in registration order and their
//!    scores are summed.
//!
//! Only flags that fired (score > 0 or passed = false) are kept.

use tracing::debug;

use claimguard_contracts::{
    config::ScoringConfig,
    error::ClaimResult,
    flag::FlagType,
    result::ChecklistOutcome,
    subject::{FacilitySubject, LookupTables, PatientSubject},
};

use crate::{
    checks::{
        CardNumberCheck, DuplicateAddressCheck, DuplicatePhoneCheck, FacilityRegistrationCheck,
        FraudHistoryCheck, IdentityNumberCheck,
    },
    traits::RuleCheck,
};

/// An ordered set of rule checks for subject type `S`.
pub struct Checklist<S> {
    subject: &'static str,
    checks: Vec<Box<dyn RuleCheck<S>>>,
}

impl<S> Checklist<S> {
    /// An empty checklist. `subject` labels log lines ("patient", "facility").
    pub fn new(subject: &'static str) -> Self {
        Self {
            subject,
            checks: Vec::new(),
        }
    }

    /// Append a check. Crucial checks are always evaluated before the rest,
    /// whatever order they were added in.
    pub fn with_check(mut self, check: impl RuleCheck<S> + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run the checklist against one subject.
    ///
    /// # Errors
    ///
    /// Propagates `ClaimError::ScoreOutOfRange` from a misconfigured check.
    /// Rule violations are never errors.
    pub fn run(&self, subject: &S, tables: &LookupTables) -> ClaimResult<ChecklistOutcome> {
        let mut outcome = ChecklistOutcome::default();

        for check in self.checks.iter().filter(|c| c.flag_type() == FlagType::Crucial) {
            let flag = check.check(subject, tables)?;
            if flag.is_crucial_failure() {
                debug!(
                    subject = self.subject,
                    check = check.id(),
                    reason = flag.message(),
                    "crucial check failed"
                );
                outcome.auto_reject = true;
            }
            if flag.is_reportable() {
                outcome.flags.push(flag);
            }
        }

        if outcome.auto_reject {
            debug!(
                subject = self.subject,
                "auto-reject certain, skipping remaining checks"
            );
            return Ok(outcome);
        }

        for check in self.checks.iter().filter(|c| c.flag_type() != FlagType::Crucial) {
            let flag = check.check(subject, tables)?;
            if flag.score() > 0 {
                debug!(
                    subject = self.subject,
                    check = check.id(),
                    score = flag.score(),
                    "check contributed score"
                );
                outcome.total_score = outcome.total_score.saturating_add(flag.score());
            }
            if flag.is_reportable() {
                outcome.flags.push(flag);
            }
        }

        Ok(outcome)
    }
}

impl Checklist<PatientSubject> {
    /// Identity number, insurance card, duplicate phone, duplicate address.
    pub fn patient(config: &ScoringConfig) -> Self {
        Checklist::new("patient")
            .with_check(IdentityNumberCheck::new(config.identity))
            .with_check(CardNumberCheck::new(config.identity))
            .with_check(DuplicatePhoneCheck::new(
                config.duplicates.phone,
                config.ranges.medium,
            ))
            .with_check(DuplicateAddressCheck::new(
                config.duplicates.address,
                config.ranges.low,
            ))
    }
}

impl Checklist<FacilitySubject> {
    /// Registry membership, then fraud history.
    pub fn facility(config: &ScoringConfig) -> Self {
        Checklist::new("facility")
            .with_check(FacilityRegistrationCheck)
            .with_check(FraudHistoryCheck::new(config.history, config.ranges.flex))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
