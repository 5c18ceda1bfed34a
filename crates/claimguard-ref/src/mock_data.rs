//! Simulated reference tables and sample claims.
//!
//! Stand-ins for the facility registry, the fraud-history register and the
//! patient master index of a production deployment. All records are
//! fictional.

use serde_json::{json, Value};

use claimguard_contracts::subject::{
    FacilityRecord, LookupTables, PatientRecord, ViolationRecord, ViolationSeverity,
};

/// Facility with a recorded moderate violation.
pub const FLAGGED_FACILITY_ID: &str = "org-example-002";

/// Facility that appears in no registry.
pub const UNREGISTERED_FACILITY_ID: &str = "org-example-404";

/// Phone number registered by four other patients.
pub const SHARED_PHONE: &str = "081299990000";

/// Address registered by six other patients.
pub const SHARED_ADDRESS: &str = "Jl. Melati No. 7, Bekasi";

// ── Facility registry ────────────────────────────────────────────────────────

const FACILITIES: [(&str, &str); 10] = [
    ("org-example-001", "RSUD Cengkareng"),
    ("org-example-002", "RS Harapan Kita"),
    ("org-example-003", "RSUD Cipondoh"),
    ("org-example-004", "RS Widya"),
    ("org-example-005", "RSUD Amanah"),
    ("org-example-006", "RSUD Jaya Wijaya"),
    ("org-example-007", "RS Pondok Cabe"),
    ("org-example-008", "RS Ananda"),
    ("org-example-009", "RSUD Horeg55"),
    ("org-example-010", "RSUD Sehat Selalu"),
];

/// The ten registered facilities.
pub fn facility_registry() -> Vec<FacilityRecord> {
    FACILITIES
        .iter()
        .map(|(id, name)| FacilityRecord {
            id: id.to_string(),
            name: Some(name.to_string()),
        })
        .collect()
}

// ── Fraud history ────────────────────────────────────────────────────────────

pub fn fraud_history() -> Vec<ViolationRecord> {
    vec![ViolationRecord {
        facility_id: FLAGGED_FACILITY_ID.to_string(),
        severity: ViolationSeverity::ModerateViolation,
        description: "Duplicate claims found in January 2024".to_string(),
    }]
}

// ── Patient history ──────────────────────────────────────────────────────────

/// Previously registered patients.
///
/// [`SHARED_PHONE`] appears four times and [`SHARED_ADDRESS`] six times
/// (with varying case and spacing), enough to trip both duplicate rules.
pub fn patient_history() -> Vec<PatientRecord> {
    let record = |phone: &str, address: &str| PatientRecord {
        phone: Some(phone.to_string()),
        address: Some(address.to_string()),
    };
    vec![
        record("081234500001", "Jl. Kenanga No. 12, Depok"),
        record("081234500002", "Jl. Mawar No. 3, Bogor"),
        record("081234500003", "Jl. Anggrek No. 21, Tangerang"),
        record(SHARED_PHONE, SHARED_ADDRESS),
        record(SHARED_PHONE, "jl. melati no. 7, bekasi"),
        record(SHARED_PHONE, "JL. MELATI NO. 7,  BEKASI"),
        record(SHARED_PHONE, "Jl. Cempaka No. 9, Bandung"),
        record("081234500004", SHARED_ADDRESS),
        record("081234500005", SHARED_ADDRESS),
        record("081234500006", " Jl. Melati No. 7, Bekasi "),
    ]
}

/// Registry, fraud history and patient history combined.
pub fn lookup_tables() -> LookupTables {
    LookupTables {
        patients: patient_history(),
        facilities: facility_registry(),
        violations: fraud_history(),
    }
}

// ── Sample claims ────────────────────────────────────────────────────────────

/// A well-formed claim from a patient with unique contact details at the
/// first registered facility.
pub fn clean_claim() -> Value {
    json!({
        "claim_id": "CLM-REF-0001",
        "patient": {
            "resourceType": "Patient",
            "identifier": [
                { "system": "https://fhir.bpjs.go.id/sid/nik", "value": "3201234567890123" },
                { "system": "https://fhir.bpjs.go.id/sid/no-kartu-jkn", "value": "0001234567890" }
            ],
            "name": [{ "text": "Siti Rahayu" }],
            "telecom": [{ "system": "phone", "value": "081377712345" }],
            "address": [{ "text": "Jl. Sudirman No. 1, Jakarta" }]
        },
        "faskes": {
            "resourceType": "Organization",
            "id": "org-example-001",
            "name": "RSUD Cengkareng"
        },
        "medical_data": {
            "diagnosis": { "code": "J06.9", "display": "Acute upper respiratory infection", "severity": "mild" },
            "vital_signs": { "systolic_bp": 118, "diastolic_bp": 78, "pulse": 82, "temperature": 37.2 },
            "lab_results": { "hemoglobin": 13.8 },
            "claim_amount": 450000
        }
    })
}

/// [`clean_claim`] with the identity number removed.
pub fn claim_without_identity() -> Value {
    let mut claim = clean_claim();
    claim["claim_id"] = json!("CLM-REF-0002");
    claim["patient"]["identifier"] = json!([
        { "system": "https://fhir.bpjs.go.id/sid/no-kartu-jkn", "value": "0001234567890" }
    ]);
    claim
}

/// [`clean_claim`] submitted by a facility missing from the registry.
pub fn claim_from_unregistered_facility() -> Value {
    let mut claim = clean_claim();
    claim["claim_id"] = json!("CLM-REF-0003");
    claim["faskes"] = json!({
        "resourceType": "Organization",
        "id": UNREGISTERED_FACILITY_ID,
        "name": "Klinik Tanpa Izin"
    });
    claim
}

/// [`clean_claim`] with a phone number and address used by other patients.
pub fn claim_with_shared_contact() -> Value {
    let mut claim = clean_claim();
    claim["claim_id"] = json!("CLM-REF-0004");
    claim["patient"]["telecom"] = json!([{ "system": "phone", "value": SHARED_PHONE }]);
    claim["patient"]["address"] = json!([{ "text": SHARED_ADDRESS }]);
    claim
}

/// [`clean_claim`] submitted by the facility with a recorded violation.
pub fn claim_from_flagged_facility() -> Value {
    let mut claim = clean_claim();
    claim["claim_id"] = json!("CLM-REF-0005");
    claim["faskes"] = json!({
        "resourceType": "Organization",
        "id": FLAGGED_FACILITY_ID,
        "name": "RS Harapan Kita"
    });
    claim
}
