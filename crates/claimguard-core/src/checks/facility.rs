//! Facility rule checks: registry membership (crucial) and recorded fraud
//! history (flex).

use claimguard_contracts::{
    config::HistoryScores,
    error::ClaimResult,
    flag::{FlagResult, FlagType, ScoreRange},
    subject::{FacilitySubject, LookupTables},
};

use crate::traits::RuleCheck;

/// Crucial: the facility must appear in the registry.
///
/// A claim with no facility identifier at all fails the same way.
#[derive(Debug, Clone, Default)]
pub struct FacilityRegistrationCheck;

impl RuleCheck<FacilitySubject> for FacilityRegistrationCheck {
    fn id(&self) -> &'static str {
        "facility-registration"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::Crucial
    }

    fn check(&self, subject: &FacilitySubject, tables: &LookupTables) -> ClaimResult<FlagResult> {
        let Some(id) = subject.id.as_deref() else {
            return Ok(FlagResult::crucial_failure(
                "Facility Identifier Missing",
                "facility identifier not found in claim data",
            ));
        };

        if !tables.is_registered(id) {
            return Ok(FlagResult::crucial_failure(
                "Facility Not Registered",
                format!("facility {id} is not registered"),
            ));
        }

        Ok(FlagResult::pass(
            FlagType::Crucial,
            "Facility Registered",
            "facility is registered",
        ))
    }
}

/// Flex: score the facility's recorded violation severity.
///
/// No recorded history is a pass with score 0, not a failure.
#[derive(Debug, Clone)]
pub struct FraudHistoryCheck {
    scores: HistoryScores,
    range: ScoreRange,
}

impl FraudHistoryCheck {
    pub fn new(scores: HistoryScores, range: ScoreRange) -> Self {
        Self { scores, range }
    }
}

impl RuleCheck<FacilitySubject> for FraudHistoryCheck {
    fn id(&self) -> &'static str {
        "fraud-history"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::Flex
    }

    fn check(&self, subject: &FacilitySubject, tables: &LookupTables) -> ClaimResult<FlagResult> {
        let violation = subject.id.as_deref().and_then(|id| tables.violation_for(id));
        let Some(violation) = violation else {
            return Ok(FlagResult::pass(
                FlagType::Flex,
                "No Fraud History",
                "facility has no recorded fraud history",
            ));
        };

        let score = self.scores.for_severity(violation.severity);
        let label = violation.severity.label();
        if score == 0 {
            return Ok(FlagResult::pass(
                FlagType::Flex,
                "No Fraud History",
                format!("facility history recorded as {}", label.to_lowercase()),
            ));
        }

        FlagResult::scored(
            FlagType::Flex,
            score,
            self.range,
            format!("Fraud History: {label}"),
            format!(
                "facility has a recorded {}: {}",
                label.to_lowercase(),
                violation.description
            ),
        )
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use claimguard_contracts::{
        config::ScoringConfig,
        subject::{FacilityRecord, ViolationRecord, ViolationSeverity},
    };

    use super::*;

    fn facility(id: &str) -> FacilitySubject {
        FacilitySubject {
            id: Some(id.to_string()),
            display_name: None,
        }
    }

    fn tables(severity: Option<ViolationSeverity>) -> LookupTables {
        LookupTables {
            patients: vec![],
            facilities: vec![FacilityRecord {
                id: "org-002".to_string(),
                name: Some("RS Harapan Kita".to_string()),
            }],
            violations: severity
                .map(|severity| ViolationRecord {
                    facility_id: "org-002".to_string(),
                    severity,
                    description: "duplicate claims in January".to_string(),
                })
                .into_iter()
                .collect(),
        }
    }

    fn history_check() -> FraudHistoryCheck {
        let cfg = ScoringConfig::default();
        FraudHistoryCheck::new(cfg.history, cfg.ranges.flex)
    }

    #[test]
    fn registered_facility_passes() {
        let flag = FacilityRegistrationCheck
            .check(&facility("org-002"), &tables(None))
            .unwrap();
        assert!(flag.passed());
    }

    #[test]
    fn unregistered_facility_is_a_crucial_failure() {
        let flag = FacilityRegistrationCheck
            .check(&facility("org-999"), &tables(None))
            .unwrap();
        assert!(flag.is_crucial_failure());
        assert!(flag.message().contains("org-999"));
    }

    #[test]
    fn missing_facility_identifier_is_a_crucial_failure() {
        let flag = FacilityRegistrationCheck
            .check(&FacilitySubject::default(), &tables(None))
            .unwrap();
        assert!(flag.is_crucial_failure());
        assert_eq!(flag.name(), "Facility Identifier Missing");
    }

    #[test]
    fn empty_registry_rejects_every_facility() {
        let flag = FacilityRegistrationCheck
            .check(&facility("org-002"), &LookupTables::default())
            .unwrap();
        assert!(flag.is_crucial_failure());
    }

    #[test]
    fn absent_history_scores_zero() {
        let flag = history_check().check(&facility("org-002"), &tables(None)).unwrap();
        assert!(flag.passed());
        assert_eq!(flag.score(), 0);
    }

    #[test]
    fn history_severity_maps_to_fixed_scores() {
        let cases = [
            (ViolationSeverity::NoHistory, 0),
            (ViolationSeverity::MinorViolation, 20),
            (ViolationSeverity::ModerateViolation, 50),
            (ViolationSeverity::SevereViolation, 80),
            (ViolationSeverity::Blacklisted, 100),
        ];
        for (severity, expected) in cases {
            let flag = history_check()
                .check(&facility("org-002"), &tables(Some(severity)))
                .unwrap();
            assert_eq!(flag.score(), expected, "severity {:?}", severity);
            assert_eq!(flag.passed(), expected == 0);
            assert_eq!(flag.flag_type(), FlagType::Flex);
        }
    }

    #[test]
    fn history_flag_names_the_severity() {
        let flag = history_check()
            .check(&facility("org-002"), &tables(Some(ViolationSeverity::ModerateViolation)))
            .unwrap();
        assert_eq!(flag.name(), "Fraud History: Moderate Violation");
        assert!(flag.message().contains("duplicate claims in January"));
    }
}
