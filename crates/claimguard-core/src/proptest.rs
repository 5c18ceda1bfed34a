//! Property-based tests for the core crate.
//!
//! These tests use proptest to verify invariants around:
//! - Identity number validation (length, digits, region code)
//! - Duplicate-contact scoring (threshold, monotonicity, cap)
//! - Auto-reject zeroing the claim total

use crate::aggregator::ScoreAggregator;
use crate::checklist::Checklist;
use crate::traits::{DecisionPolicy, RuleCheck};
use crate::checks::IdentityNumberCheck;
use claimguard_contracts::config::ScoringConfig;
use claimguard_contracts::flag::CRUCIAL_FAILURE_SCORE;
use claimguard_contracts::result::{Decision, DecisionVerdict, ModelScore};
use claimguard_contracts::subject::{
    FacilityRecord, FacilitySubject, IdentifierValue, LookupTables, PatientRecord, PatientSubject,
};
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Strategy for well-formed identity numbers: region 11..=94 plus 14 digits.
fn arb_valid_identity() -> impl Strategy<Value = String> {
    (11u32..=94, prop::string::string_regex("[0-9]{14}").unwrap())
        .prop_map(|(region, rest)| format!("{region:02}{rest}"))
}

/// Strategy for identity numbers that break exactly one rule.
fn arb_invalid_identity() -> impl Strategy<Value = String> {
    prop_oneof![
        // Wrong length
        prop::string::string_regex("[0-9]{0,15}").unwrap(),
        prop::string::string_regex("[0-9]{17,24}").unwrap(),
        // Non-digit character somewhere in a 16-char value
        (
            arb_valid_identity(),
            0usize..16,
            prop::sample::select(vec!['A', 'x', ' ', '.', '/', '-']),
        )
            .prop_map(|(identity, pos, c)| {
                identity
                    .chars()
                    .enumerate()
                    .map(|(i, d)| if i == pos { c } else { d })
                    .collect::<String>()
            }),
        // Region code outside [11, 94]
        (
            prop_oneof![0u32..=10, 95u32..=99],
            prop::string::string_regex("[0-9]{14}").unwrap()
        )
            .prop_map(|(region, rest)| format!("{region:02}{rest}")),
    ]
}

fn patient_with_identity(identity: String) -> PatientSubject {
    PatientSubject {
        identity_number: Some(IdentifierValue::Text(identity)),
        card_number: Some(IdentifierValue::text("1234567890123")),
        phone: Some("081234567890".to_string()),
        address: Some("Jl. Merdeka No. 10".to_string()),
        display_name: None,
    }
}

struct Threshold;

impl DecisionPolicy for Threshold {
    fn decide(&self, total_score: u32, auto_reject: bool) -> DecisionVerdict {
        let decision = if auto_reject || total_score > 60 {
            Decision::Rejected
        } else if total_score < 10 {
            Decision::Accepted
        } else {
            Decision::NeedsReview
        };
        DecisionVerdict { decision, reason: String::new() }
    }
}

// ============================================================================
// Identity number properties
// ============================================================================

proptest! {
    #[test]
    fn well_formed_identity_numbers_pass(identity in arb_valid_identity()) {
        let check = IdentityNumberCheck::new(ScoringConfig::default().identity);
        let flag = check
            .check(&patient_with_identity(identity), &LookupTables::default())
            .unwrap();
        prop_assert!(flag.passed());
        prop_assert_eq!(flag.score(), 0);
    }

    #[test]
    fn malformed_identity_numbers_force_rejection(identity in arb_invalid_identity()) {
        let outcome = Checklist::patient(&ScoringConfig::default())
            .run(&patient_with_identity(identity), &LookupTables::default())
            .unwrap();
        prop_assert!(outcome.auto_reject);
        prop_assert_eq!(outcome.total_score, 0);
        prop_assert_eq!(outcome.flags.len(), 1);
        prop_assert_eq!(outcome.flags[0].score(), CRUCIAL_FAILURE_SCORE);
    }
}

// ============================================================================
// Duplicate-contact scoring properties
// ============================================================================

proptest! {
    #[test]
    fn phone_score_is_monotonic_and_capped(count in 0usize..200) {
        let rule = ScoringConfig::default().duplicates.phone;
        let score = rule.score(count);
        prop_assert!(score <= 30);
        prop_assert!(rule.score(count + 1) >= score);
        if count < 3 {
            prop_assert_eq!(score, 0);
        } else {
            prop_assert!(score >= 5);
        }
    }

    #[test]
    fn address_score_is_monotonic_and_capped(count in 0usize..200) {
        let rule = ScoringConfig::default().duplicates.address;
        let score = rule.score(count);
        prop_assert!(score <= 10);
        prop_assert!(rule.score(count + 1) >= score);
        if count < 5 {
            prop_assert_eq!(score, 0);
        } else {
            prop_assert!(score >= 1);
        }
    }

    #[test]
    fn patient_score_never_exceeds_contact_caps(phones in 0usize..60, addresses in 0usize..60) {
        let mut patients = vec![
            PatientRecord { phone: Some("081234567890".to_string()), address: None };
            phones
        ];
        patients.extend(vec![
            PatientRecord { phone: None, address: Some("jl. merdeka no. 10".to_string()) };
            addresses
        ]);
        let tables = LookupTables { patients, ..LookupTables::default() };

        let outcome = Checklist::patient(&ScoringConfig::default())
            .run(&patient_with_identity("3201234567890123".to_string()), &tables)
            .unwrap();
        prop_assert!(!outcome.auto_reject);
        prop_assert!(outcome.total_score <= 40);
    }
}

// ============================================================================
// Aggregation properties
// ============================================================================

proptest! {
    #[test]
    fn auto_reject_always_zeroes_total(model in 0u32..=100, registered in any::<bool>()) {
        let aggregator = ScoreAggregator::new(&ScoringConfig::default(), Box::new(Threshold));
        let tables = LookupTables {
            facilities: if registered {
                vec![FacilityRecord { id: "org-001".to_string(), name: None }]
            } else {
                vec![]
            },
            ..LookupTables::default()
        };
        let facility = FacilitySubject { id: Some("org-001".to_string()), display_name: None };
        let result = aggregator
            .score_claim(
                &tables,
                &patient_with_identity("3201234567890123".to_string()),
                &facility,
                &ModelScore::injected(model).unwrap(),
            )
            .unwrap();

        if registered {
            prop_assert!(!result.auto_reject);
            prop_assert_eq!(result.total_score, model);
        } else {
            prop_assert!(result.auto_reject);
            prop_assert_eq!(result.total_score, 0);
            prop_assert_eq!(result.decision, Decision::Rejected);
        }
    }
}
