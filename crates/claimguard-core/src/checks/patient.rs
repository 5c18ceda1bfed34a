//! Patient rule checks.
//!
//! Two crucial identity checks (identity number, insurance card) and two
//! duplicate-contact checks that count matching registrations in the
//! patient history table.

use claimguard_contracts::{
    config::{DuplicateRule, IdentityRules},
    error::ClaimResult,
    flag::{FlagResult, FlagType, ScoreRange},
    subject::{IdentifierValue, LookupTables, PatientSubject},
};

use crate::traits::RuleCheck;

/// Check that `value` is exactly `expected_len` ASCII digits.
///
/// Returns the failure message on mismatch.
fn check_digits(value: &str, expected_len: usize, label: &str) -> Result<(), String> {
    let len = value.chars().count();
    if len != expected_len {
        return Err(format!("{label} must be {expected_len} digits, found {len}"));
    }
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("{label} must contain digits only"));
    }
    Ok(())
}

/// Lowercase and collapse runs of whitespace.
pub fn normalize_address(address: &str) -> String {
    address
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Identity number ──────────────────────────────────────────────────────────

/// Crucial: the national identity number must be present, 16 digits, and
/// start with a region code in `[11, 94]`.
#[derive(Debug, Clone)]
pub struct IdentityNumberCheck {
    rules: IdentityRules,
}

impl IdentityNumberCheck {
    pub fn new(rules: IdentityRules) -> Self {
        Self { rules }
    }

    fn validate(&self, value: &str) -> Result<(), String> {
        check_digits(value, self.rules.identity_number_length, "identity number")?;
        let region = value
            .get(..2)
            .and_then(|code| code.parse::<u32>().ok())
            .ok_or_else(|| "identity number has no region code".to_string())?;
        if !(self.rules.region_code_min..=self.rules.region_code_max).contains(&region) {
            return Err(format!("invalid region code: {region:02}"));
        }
        Ok(())
    }
}

impl RuleCheck<PatientSubject> for IdentityNumberCheck {
    fn id(&self) -> &'static str {
        "identity-number"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::Crucial
    }

    fn check(&self, subject: &PatientSubject, _tables: &LookupTables) -> ClaimResult<FlagResult> {
        let outcome = match &subject.identity_number {
            None => {
                return Ok(FlagResult::crucial_failure(
                    "Identity Number Missing",
                    "identity number not found in patient data",
                ))
            }
            Some(IdentifierValue::NonText(raw)) => {
                Err(format!("identity number must be text, found {raw}"))
            }
            Some(IdentifierValue::Text(value)) => self.validate(value),
        };

        Ok(match outcome {
            Ok(()) => FlagResult::pass(FlagType::Crucial, "Identity Number Valid", "identity number valid"),
            Err(message) => FlagResult::crucial_failure("Identity Number Invalid", message),
        })
    }
}

// ── Insurance card ───────────────────────────────────────────────────────────

/// Crucial: the insurance card number must be present and 13 digits.
#[derive(Debug, Clone)]
pub struct CardNumberCheck {
    rules: IdentityRules,
}

impl CardNumberCheck {
    pub fn new(rules: IdentityRules) -> Self {
        Self { rules }
    }
}

impl RuleCheck<PatientSubject> for CardNumberCheck {
    fn id(&self) -> &'static str {
        "card-number"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::Crucial
    }

    fn check(&self, subject: &PatientSubject, _tables: &LookupTables) -> ClaimResult<FlagResult> {
        let outcome = match &subject.card_number {
            None => {
                return Ok(FlagResult::crucial_failure(
                    "Insurance Card Missing",
                    "insurance card number not found in patient data",
                ))
            }
            Some(IdentifierValue::NonText(raw)) => {
                Err(format!("insurance card number must be text, found {raw}"))
            }
            Some(IdentifierValue::Text(value)) => {
                check_digits(value, self.rules.card_number_length, "insurance card number")
            }
        };

        Ok(match outcome {
            Ok(()) => FlagResult::pass(FlagType::Crucial, "Insurance Card Valid", "insurance card number valid"),
            Err(message) => FlagResult::crucial_failure("Insurance Card Invalid", message),
        })
    }
}

// ── Duplicate phone ──────────────────────────────────────────────────────────

/// Medium: the same phone number registered by several patients.
#[derive(Debug, Clone)]
pub struct DuplicatePhoneCheck {
    rule: DuplicateRule,
    range: ScoreRange,
}

impl DuplicatePhoneCheck {
    pub fn new(rule: DuplicateRule, range: ScoreRange) -> Self {
        Self { rule, range }
    }
}

impl RuleCheck<PatientSubject> for DuplicatePhoneCheck {
    fn id(&self) -> &'static str {
        "duplicate-phone"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::Medium
    }

    fn check(&self, subject: &PatientSubject, tables: &LookupTables) -> ClaimResult<FlagResult> {
        let Some(phone) = subject.phone.as_deref() else {
            return Ok(FlagResult::pass(FlagType::Medium, "Unique Phone Number", "no phone number given"));
        };

        let count = tables
            .patients
            .iter()
            .filter(|p| p.phone.as_deref() == Some(phone))
            .count();

        let score = self.rule.score(count);
        if score == 0 {
            return Ok(FlagResult::pass(FlagType::Medium, "Unique Phone Number", "phone number not shared"));
        }
        FlagResult::scored(
            FlagType::Medium,
            score,
            self.range,
            "Duplicate Phone Number",
            format!("phone number used by {count} different patients"),
        )
    }
}

// ── Duplicate address ────────────────────────────────────────────────────────

/// Low: the same (normalized) address registered by several patients.
#[derive(Debug, Clone)]
pub struct DuplicateAddressCheck {
    rule: DuplicateRule,
    range: ScoreRange,
}

impl DuplicateAddressCheck {
    pub fn new(rule: DuplicateRule, range: ScoreRange) -> Self {
        Self { rule, range }
    }
}

impl RuleCheck<PatientSubject> for DuplicateAddressCheck {
    fn id(&self) -> &'static str {
        "duplicate-address"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::Low
    }

    fn check(&self, subject: &PatientSubject, tables: &LookupTables) -> ClaimResult<FlagResult> {
        let normalized = subject
            .address
            .as_deref()
            .map(normalize_address)
            .unwrap_or_default();
        if normalized.is_empty() {
            return Ok(FlagResult::pass(FlagType::Low, "Unique Address", "no address given"));
        }

        let count = tables
            .patients
            .iter()
            .filter_map(|p| p.address.as_deref())
            .filter(|a| normalize_address(a) == normalized)
            .count();

        let score = self.rule.score(count);
        if score == 0 {
            return Ok(FlagResult::pass(FlagType::Low, "Unique Address", "address not shared"));
        }
        FlagResult::scored(
            FlagType::Low,
            score,
            self.range,
            "Duplicate Address",
            format!("address used by {count} different patients"),
        )
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use claimguard_contracts::{
        config::ScoringConfig,
        flag::CRUCIAL_FAILURE_SCORE,
        subject::{IdentifierValue, LookupTables, PatientRecord, PatientSubject},
    };

    use super::*;

    fn patient(identity: &str) -> PatientSubject {
        PatientSubject {
            identity_number: Some(IdentifierValue::text(identity)),
            card_number: Some(IdentifierValue::text("1234567890123")),
            phone: Some("081234567890".to_string()),
            address: Some("Jl. Merdeka No. 10, Jakarta".to_string()),
            display_name: None,
        }
    }

    fn history(phone: &str, address: &str, n: usize) -> LookupTables {
        LookupTables {
            patients: (0..n)
                .map(|_| PatientRecord {
                    phone: Some(phone.to_string()),
                    address: Some(address.to_string()),
                })
                .collect(),
            ..LookupTables::default()
        }
    }

    fn identity_check() -> IdentityNumberCheck {
        IdentityNumberCheck::new(ScoringConfig::default().identity)
    }

    // ── Identity number ───────────────────────────────────────────────────────

    #[test]
    fn valid_identity_number_passes() {
        let flag = identity_check()
            .check(&patient("3201234567890123"), &LookupTables::default())
            .unwrap();
        assert!(flag.passed());
        assert_eq!(flag.score(), 0);
    }

    #[test]
    fn identity_number_region_bounds_are_inclusive() {
        let check = identity_check();
        let tables = LookupTables::default();
        assert!(check.check(&patient("1101234567890123"), &tables).unwrap().passed());
        assert!(check.check(&patient("9401234567890123"), &tables).unwrap().passed());
        assert!(!check.check(&patient("1001234567890123"), &tables).unwrap().passed());
        assert!(!check.check(&patient("9501234567890123"), &tables).unwrap().passed());
    }

    #[test]
    fn short_identity_number_fails_with_length_message() {
        let flag = identity_check()
            .check(&patient("320123"), &LookupTables::default())
            .unwrap();
        assert!(flag.is_crucial_failure());
        assert_eq!(flag.score(), CRUCIAL_FAILURE_SCORE);
        assert!(flag.message().contains("16 digits"), "got: {}", flag.message());
    }

    #[test]
    fn non_digit_identity_number_fails() {
        let flag = identity_check()
            .check(&patient("32012345678901AB"), &LookupTables::default())
            .unwrap();
        assert!(flag.is_crucial_failure());
        assert!(flag.message().contains("digits only"));
    }

    #[test]
    fn non_text_identity_number_fails() {
        let subject = PatientSubject {
            identity_number: Some(IdentifierValue::NonText("3201234567890123".to_string())),
            ..patient("")
        };
        let flag = identity_check().check(&subject, &LookupTables::default()).unwrap();
        assert!(flag.is_crucial_failure());
        assert!(flag.message().contains("must be text"));
    }

    #[test]
    fn missing_identity_number_is_a_crucial_failure() {
        let subject = PatientSubject { identity_number: None, ..patient("") };
        let flag = identity_check().check(&subject, &LookupTables::default()).unwrap();
        assert!(flag.is_crucial_failure());
        assert_eq!(flag.name(), "Identity Number Missing");
        assert_eq!(flag.score(), CRUCIAL_FAILURE_SCORE);
    }

    // ── Insurance card ────────────────────────────────────────────────────────

    #[test]
    fn card_number_must_have_thirteen_digits() {
        let check = CardNumberCheck::new(ScoringConfig::default().identity);
        let tables = LookupTables::default();

        let valid = patient("3201234567890123");
        assert!(check.check(&valid, &tables).unwrap().passed());

        let short = PatientSubject {
            card_number: Some(IdentifierValue::text("123456789012")),
            ..valid.clone()
        };
        assert!(check.check(&short, &tables).unwrap().is_crucial_failure());

        let missing = PatientSubject { card_number: None, ..valid };
        let flag = check.check(&missing, &tables).unwrap();
        assert_eq!(flag.name(), "Insurance Card Missing");
    }

    #[test]
    fn non_digit_card_number_fails() {
        let subject = PatientSubject {
            card_number: Some(IdentifierValue::text("12345678901X3")),
            ..patient("3201234567890123")
        };
        let flag = CardNumberCheck::new(ScoringConfig::default().identity)
            .check(&subject, &LookupTables::default())
            .unwrap();
        assert!(flag.is_crucial_failure());
        assert_eq!(flag.name(), "Insurance Card Invalid");
        assert_eq!(flag.score(), CRUCIAL_FAILURE_SCORE);
        assert!(flag.message().contains("digits only"), "got: {}", flag.message());
    }

    #[test]
    fn non_text_card_number_fails() {
        let subject = PatientSubject {
            card_number: Some(IdentifierValue::NonText("1234567890123".to_string())),
            ..patient("3201234567890123")
        };
        let flag = CardNumberCheck::new(ScoringConfig::default().identity)
            .check(&subject, &LookupTables::default())
            .unwrap();
        assert!(flag.is_crucial_failure());
        assert!(flag.message().contains("must be text"));
    }

    // ── Duplicate phone ───────────────────────────────────────────────────────

    #[test]
    fn phone_below_threshold_scores_zero() {
        let cfg = ScoringConfig::default();
        let check = DuplicatePhoneCheck::new(cfg.duplicates.phone, cfg.ranges.medium);
        let flag = check
            .check(&patient("3201234567890123"), &history("081234567890", "x", 2))
            .unwrap();
        assert!(flag.passed());
        assert_eq!(flag.score(), 0);
    }

    #[test]
    fn phone_at_threshold_scores_base() {
        let cfg = ScoringConfig::default();
        let check = DuplicatePhoneCheck::new(cfg.duplicates.phone, cfg.ranges.medium);
        let flag = check
            .check(&patient("3201234567890123"), &history("081234567890", "x", 3))
            .unwrap();
        assert!(!flag.passed());
        assert_eq!(flag.score(), 5);
        assert_eq!(flag.flag_type(), FlagType::Medium);
        assert!(flag.message().contains('3'));
    }

    #[test]
    fn phone_score_is_capped() {
        let cfg = ScoringConfig::default();
        let check = DuplicatePhoneCheck::new(cfg.duplicates.phone, cfg.ranges.medium);
        let flag = check
            .check(&patient("3201234567890123"), &history("081234567890", "x", 40))
            .unwrap();
        assert_eq!(flag.score(), 30);
    }

    #[test]
    fn phone_rule_exceeding_range_is_an_error() {
        let cfg = ScoringConfig::default();
        let rule = DuplicateRule { threshold: 1, base_score: 50, step: 0, cap: 50 };
        let check = DuplicatePhoneCheck::new(rule, cfg.ranges.medium);
        let result = check.check(&patient("3201234567890123"), &history("081234567890", "x", 1));
        assert!(result.is_err());
    }

    // ── Duplicate address ─────────────────────────────────────────────────────

    #[test]
    fn address_matching_ignores_case_and_spacing() {
        let cfg = ScoringConfig::default();
        let check = DuplicateAddressCheck::new(cfg.duplicates.address, cfg.ranges.low);
        let tables = history("x", "  JL. MERDEKA   No. 10,\tJakarta ", 6);
        let flag = check.check(&patient("3201234567890123"), &tables).unwrap();
        assert_eq!(flag.score(), 2);
        assert_eq!(flag.flag_type(), FlagType::Low);
    }

    #[test]
    fn empty_address_never_matches() {
        let cfg = ScoringConfig::default();
        let check = DuplicateAddressCheck::new(cfg.duplicates.address, cfg.ranges.low);
        let subject = PatientSubject { address: Some("   ".to_string()), ..patient("") };
        let flag = check.check(&subject, &history("x", "", 10)).unwrap();
        assert!(flag.passed());
    }

    #[test]
    fn normalize_address_collapses_whitespace() {
        assert_eq!(normalize_address("  A  b\n C "), "a b c");
    }
}
