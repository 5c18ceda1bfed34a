//! Claim identity and the extracted claim envelope.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    medical::MedicalData,
    subject::{FacilitySubject, PatientSubject},
};

/// Stable identifier for one reimbursement request.
///
/// Taken from the claim when present. Claims submitted without one get a
/// generated UUID so every ledger entry is addressable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimId(pub String);

impl ClaimId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a new, unique claim ID.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the scoring pipeline needs from one raw claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedClaim {
    pub claim_id: ClaimId,
    pub patient: PatientSubject,
    pub facility: FacilitySubject,
    pub medical: MedicalData,
}
