//! Schema-validated claim extractor.
//!
//! `ClaimExtractor` accepts the raw JSON claim submitted by a facility:
//!
//! ```json
//! {
//!   "claim_id": "CLM-20240101-1234",
//!   "patient": {
//!     "identifier": [{ "system": ".../sid/nik", "value": "3201234567890123" }],
//!     "name": [{ "text": "Siti Rahayu" }],
//!     "telecom": [{ "system": "phone", "value": "081234567890" }],
//!     "address": [{ "text": "Jl. Sudirman No. 1, Jakarta" }]
//!   },
//!   "faskes": { "id": "org-example-001", "name": "RSUP Dr. Cipto Mangunkusumo" },
//!   "medical_data": { "diagnosis": { "severity": "mild" }, "claim_amount": 450000 }
//! }
//! ```
//!
//! The facility section is read from `faskes`, or from `facility` when
//! `faskes` is absent.
//!
//! Extraction runs in two phases:
//!
//! 1. **Structural** — the document is validated against a fixed JSON Schema.
//!    All violations are collected before returning so operators see the
//!    full set in one pass.
//! 2. **Extraction** — subject fields are resolved. Absent or empty values
//!    become `None`; identifier values of the wrong JSON type are kept as
//!    `IdentifierValue::NonText` so the rule checks can flag them.

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use claimguard_contracts::{
    claim::{ClaimId, ExtractedClaim},
    error::{ClaimError, ClaimResult},
    medical::MedicalData,
    subject::{FacilitySubject, IdentifierValue, PatientSubject},
};

/// Pulls the scoring subjects out of a raw claim document.
pub struct ClaimExtractor {
    validator: jsonschema::Validator,
}

impl ClaimExtractor {
    /// Compile the claim schema.
    ///
    /// Returns `ClaimError::ConfigError` if the schema document itself does
    /// not compile.
    pub fn new() -> ClaimResult<Self> {
        let validator =
            jsonschema::validator_for(&claim_schema()).map_err(|e| ClaimError::ConfigError {
                reason: format!("invalid claim schema: {e}"),
            })?;
        Ok(Self { validator })
    }

    /// Validate `raw` and extract its subjects.
    ///
    /// # Errors
    ///
    /// `ClaimError::MalformedClaim` when the document violates the claim
    /// schema or its medical section cannot be read.
    pub fn extract(&self, raw: &Value) -> ClaimResult<ExtractedClaim> {
        let violations: Vec<String> = self
            .validator
            .iter_errors(raw)
            .map(|error| format!("JSON Schema violation at {}: {}", error.instance_path, error))
            .collect();
        if !violations.is_empty() {
            for message in &violations {
                warn!(%message, "claim structure invalid");
            }
            return Err(ClaimError::MalformedClaim {
                reason: violations.join("; "),
            });
        }

        let claim_id = resolve_str(raw.get("claim_id"))
            .map(ClaimId::new)
            .unwrap_or_else(ClaimId::generate);

        let patient = raw.get("patient").map(extract_patient).unwrap_or_default();
        let facility = raw
            .get("faskes")
            .or_else(|| raw.get("facility"))
            .map(extract_facility)
            .unwrap_or_default();
        let medical = match raw.get("medical_data") {
            Some(section) => read_medical(section)?,
            None => MedicalData::default(),
        };

        debug!(
            claim_id = %claim_id,
            has_identity_number = patient.identity_number.is_some(),
            has_card_number = patient.card_number.is_some(),
            facility_id = facility.id.as_deref().unwrap_or("<none>"),
            "claim extracted"
        );

        Ok(ExtractedClaim {
            claim_id,
            patient,
            facility,
            medical,
        })
    }
}

// ── Subject extraction ───────────────────────────────────────────────────────

fn read_medical(section: &Value) -> ClaimResult<MedicalData> {
    MedicalData::deserialize(section).map_err(|e| ClaimError::MalformedClaim {
        reason: format!("unreadable medical_data: {e}"),
    })
}

fn extract_patient(section: &Value) -> PatientSubject {
    let mut subject = PatientSubject::default();

    for identifier in array(section, "identifier") {
        let system = identifier
            .get("system")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_lowercase();
        let slot = if system.contains("nik") {
            &mut subject.identity_number
        } else if system.contains("kartu") || system.contains("jkn") {
            &mut subject.card_number
        } else {
            continue;
        };
        // First matching entry wins.
        if slot.is_none() {
            *slot = resolve_identifier(identifier.get("value"));
        }
    }

    subject.phone = array(section, "telecom")
        .find(|t| t.get("system").and_then(Value::as_str) == Some("phone"))
        .and_then(|t| resolve_str(t.get("value")));
    subject.address = array(section, "address")
        .next()
        .and_then(|a| resolve_str(a.get("text")));
    subject.display_name = array(section, "name")
        .next()
        .and_then(|n| resolve_str(n.get("text")));

    subject
}

fn extract_facility(section: &Value) -> FacilitySubject {
    FacilitySubject {
        id: resolve_str(section.get("id")),
        display_name: resolve_str(section.get("name")),
    }
}

// ── Value helpers ────────────────────────────────────────────────────────────

/// Elements of the array at `key`, or nothing when absent.
fn array<'v>(section: &'v Value, key: &str) -> impl Iterator<Item = &'v Value> {
    section
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

/// A non-empty string value. Null, missing and `""` are all absent.
fn resolve_str(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// An identifier value. Non-string JSON values are kept in rendered form.
fn resolve_identifier(value: Option<&Value>) -> Option<IdentifierValue> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(IdentifierValue::Text(s.clone())),
        other => Some(IdentifierValue::NonText(other.to_string())),
    }
}

/// Structure-only schema for an incoming claim.
///
/// Identifier values are deliberately untyped: a number where a string was
/// expected is a rule violation, not a malformed claim.
fn claim_schema() -> Value {
    let text_entries = json!({
        "type": "array",
        "items": {
            "type": "object",
            "properties": { "text": { "type": ["string", "null"] } }
        }
    });
    let facility = json!({
        "type": "object",
        "properties": {
            "id": { "type": ["string", "null"] },
            "name": { "type": ["string", "null"] }
        }
    });
    let numbers = json!({
        "type": "object",
        "additionalProperties": { "type": "number" }
    });

    json!({
        "type": "object",
        "required": ["patient"],
        "anyOf": [
            { "required": ["faskes"] },
            { "required": ["facility"] }
        ],
        "properties": {
            "claim_id": { "type": ["string", "null"] },
            "patient": {
                "type": "object",
                "properties": {
                    "identifier": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": { "system": { "type": "string" } }
                        }
                    },
                    "telecom": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "system": { "type": "string" },
                                "value": { "type": ["string", "null"] }
                            }
                        }
                    },
                    "name": text_entries.clone(),
                    "address": text_entries
                }
            },
            "faskes": facility.clone(),
            "facility": facility,
            "medical_data": {
                "type": "object",
                "properties": {
                    "diagnosis": {
                        "type": "object",
                        "properties": {
                            "code": { "type": ["string", "null"] },
                            "display": { "type": ["string", "null"] },
                            "severity": { "enum": ["mild", "moderate", "severe"] }
                        }
                    },
                    "vital_signs": numbers,
                    "lab_results": numbers,
                    "claim_amount": { "type": "integer", "minimum": 0 }
                }
            }
        }
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
