//! Subjects under check and the lookup tables they are checked against.
//!
//! Subjects are extracted once from the incoming claim and never mutated.
//! Lookup tables are read-only for the duration of a scoring call; an empty
//! table means "no history known", never an error.

use serde::{Deserialize, Serialize};

/// A raw identifier as found in the claim.
///
/// Extraction keeps non-text values (e.g. a JSON number where a string was
/// expected) so the validity rule can flag them instead of the extractor
/// discarding them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierValue {
    Text(String),
    /// Rendered form of a value that was present but not text.
    NonText(String),
}

impl IdentifierValue {
    pub fn text(value: impl Into<String>) -> Self {
        IdentifierValue::Text(value.into())
    }
}

/// Patient facts checked by the patient checklist.
///
/// `None` means the field was structurally absent from the claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientSubject {
    pub identity_number: Option<IdentifierValue>,
    pub card_number: Option<IdentifierValue>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub display_name: Option<String>,
}

/// Facility facts checked by the facility checklist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilitySubject {
    pub id: Option<String>,
    pub display_name: Option<String>,
}

/// A prior patient registration used for duplicate counting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// A registered facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Severity of a facility's recorded violation.
///
/// Unrecognized tier names read as `MinorViolation`, the same score a record
/// without a severity gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ViolationSeverity {
    NoHistory,
    #[default]
    MinorViolation,
    ModerateViolation,
    SevereViolation,
    Blacklisted,
}

impl From<String> for ViolationSeverity {
    fn from(tier: String) -> Self {
        match tier.as_str() {
            "no_history" => ViolationSeverity::NoHistory,
            "moderate_violation" => ViolationSeverity::ModerateViolation,
            "severe_violation" => ViolationSeverity::SevereViolation,
            "blacklisted" => ViolationSeverity::Blacklisted,
            _ => ViolationSeverity::MinorViolation,
        }
    }
}

impl ViolationSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            ViolationSeverity::NoHistory => "No History",
            ViolationSeverity::MinorViolation => "Minor Violation",
            ViolationSeverity::ModerateViolation => "Moderate Violation",
            ViolationSeverity::SevereViolation => "Severe Violation",
            ViolationSeverity::Blacklisted => "Blacklisted",
        }
    }
}

/// A recorded violation for a facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViolationRecord {
    pub facility_id: String,
    #[serde(default)]
    pub severity: ViolationSeverity,
    #[serde(default)]
    pub description: String,
}

/// All reference data a scoring call reads.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupTables {
    #[serde(default)]
    pub patients: Vec<PatientRecord>,
    #[serde(default)]
    pub facilities: Vec<FacilityRecord>,
    #[serde(default)]
    pub violations: Vec<ViolationRecord>,
}

impl LookupTables {
    pub fn is_registered(&self, facility_id: &str) -> bool {
        self.facilities.iter().any(|f| f.id == facility_id)
    }

    /// First recorded violation for the facility, if any.
    pub fn violation_for(&self, facility_id: &str) -> Option<&ViolationRecord> {
        self.violations.iter().find(|v| v.facility_id == facility_id)
    }
}
