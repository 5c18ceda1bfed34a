//! Medical and billing data consumed by the model-inference collaborator.
//!
//! Every field has a clinically normal default so a sparse claim still
//! produces a complete feature vector.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosisSeverity {
    #[default]
    Mild,
    Moderate,
    Severe,
}

impl DiagnosisSeverity {
    /// Ordinal used as a model feature (mild = 1 .. severe = 3).
    pub fn ordinal(&self) -> u8 {
        match self {
            DiagnosisSeverity::Mild => 1,
            DiagnosisSeverity::Moderate => 2,
            DiagnosisSeverity::Severe => 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub severity: DiagnosisSeverity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VitalSigns {
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
    pub temperature: f64,
    pub pulse: f64,
    pub respiratory_rate: f64,
}

impl Default for VitalSigns {
    fn default() -> Self {
        Self {
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            temperature: 36.5,
            pulse: 75.0,
            respiratory_rate: 18.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabResults {
    pub hemoglobin: f64,
    pub leukocyte: f64,
    pub platelet: f64,
    pub hematocrit: f64,
}

impl Default for LabResults {
    fn default() -> Self {
        Self {
            hemoglobin: 14.0,
            leukocyte: 7000.0,
            platelet: 250_000.0,
            hematocrit: 42.0,
        }
    }
}

/// The medical section of a claim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalData {
    pub diagnosis: Diagnosis,
    pub vital_signs: VitalSigns,
    pub lab_results: LabResults,
    /// Billed amount in whole rupiah.
    pub claim_amount: u64,
}
