//! Feature extraction for the fraud model.
//!
//! The feature vector is the raw medical values plus derived clinical
//! indicators and two consistency signals:
//!
//! - `amount_severity_mismatch`: mild diagnosis billed above 2,000,000.
//! - `vitals_severity_mismatch`: severe diagnosis with neither fever nor
//!   tachycardia.

use serde::{Deserialize, Serialize};

use claimguard_contracts::medical::{DiagnosisSeverity, MedicalData};

/// Claim amount above which a mild diagnosis is suspicious.
pub const MILD_AMOUNT_LIMIT: u64 = 2_000_000;

/// Systolic/diastolic ratio used when diastolic pressure is not positive.
const DEFAULT_BP_RATIO: f64 = 1.5;

/// Names of every feature, in vector order.
pub const FEATURE_NAMES: [&str; 20] = [
    "diagnosis_severity",
    "systolic_bp",
    "diastolic_bp",
    "temperature",
    "pulse",
    "respiratory_rate",
    "hemoglobin",
    "leukocyte",
    "platelet",
    "hematocrit",
    "claim_amount",
    "bp_ratio",
    "fever",
    "tachycardia",
    "tachypnea",
    "anemia",
    "leukopenia",
    "thrombocytopenia",
    "amount_severity_mismatch",
    "vitals_severity_mismatch",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimFeatures {
    pub diagnosis_severity: u8,
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
    pub temperature: f64,
    pub pulse: f64,
    pub respiratory_rate: f64,
    pub hemoglobin: f64,
    pub leukocyte: f64,
    pub platelet: f64,
    pub hematocrit: f64,
    pub claim_amount: f64,
    pub bp_ratio: f64,
    pub fever: bool,
    pub tachycardia: bool,
    pub tachypnea: bool,
    pub anemia: bool,
    pub leukopenia: bool,
    pub thrombocytopenia: bool,
    pub amount_severity_mismatch: bool,
    pub vitals_severity_mismatch: bool,
}

impl ClaimFeatures {
    /// The features as numbers, ordered as [`FEATURE_NAMES`].
    pub fn to_vector(&self) -> [f64; 20] {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        [
            f64::from(self.diagnosis_severity),
            self.systolic_bp,
            self.diastolic_bp,
            self.temperature,
            self.pulse,
            self.respiratory_rate,
            self.hemoglobin,
            self.leukocyte,
            self.platelet,
            self.hematocrit,
            self.claim_amount,
            self.bp_ratio,
            flag(self.fever),
            flag(self.tachycardia),
            flag(self.tachypnea),
            flag(self.anemia),
            flag(self.leukopenia),
            flag(self.thrombocytopenia),
            flag(self.amount_severity_mismatch),
            flag(self.vitals_severity_mismatch),
        ]
    }
}

pub fn extract_features(medical: &MedicalData) -> ClaimFeatures {
    let severity = medical.diagnosis.severity;
    let vitals = &medical.vital_signs;
    let labs = &medical.lab_results;

    let bp_ratio = if vitals.diastolic_bp > 0.0 {
        vitals.systolic_bp / vitals.diastolic_bp
    } else {
        DEFAULT_BP_RATIO
    };
    let fever = vitals.temperature > 37.5;
    let tachycardia = vitals.pulse > 100.0;

    ClaimFeatures {
        diagnosis_severity: severity.ordinal(),
        systolic_bp: vitals.systolic_bp,
        diastolic_bp: vitals.diastolic_bp,
        temperature: vitals.temperature,
        pulse: vitals.pulse,
        respiratory_rate: vitals.respiratory_rate,
        hemoglobin: labs.hemoglobin,
        leukocyte: labs.leukocyte,
        platelet: labs.platelet,
        hematocrit: labs.hematocrit,
        claim_amount: medical.claim_amount as f64,
        bp_ratio,
        fever,
        tachycardia,
        tachypnea: vitals.respiratory_rate > 20.0,
        anemia: labs.hemoglobin < 13.0,
        leukopenia: labs.leukocyte < 4000.0,
        thrombocytopenia: labs.platelet < 150_000.0,
        amount_severity_mismatch: severity == DiagnosisSeverity::Mild
            && medical.claim_amount > MILD_AMOUNT_LIMIT,
        vitals_severity_mismatch: severity == DiagnosisSeverity::Severe && !fever && !tachycardia,
    }
}

#[cfg(test)]
mod tests {
    use claimguard_contracts::medical::{Diagnosis, DiagnosisSeverity, MedicalData};

    use super::*;

    fn medical(severity: DiagnosisSeverity, amount: u64) -> MedicalData {
        MedicalData {
            diagnosis: Diagnosis {
                severity,
                ..Diagnosis::default()
            },
            claim_amount: amount,
            ..MedicalData::default()
        }
    }

    #[test]
    fn normal_values_raise_no_indicators() {
        let f = extract_features(&MedicalData::default());
        assert_eq!(f.diagnosis_severity, 1);
        assert!((f.bp_ratio - 1.5).abs() < 1e-9);
        assert!(!f.fever && !f.tachycardia && !f.tachypnea);
        assert!(!f.anemia && !f.leukopenia && !f.thrombocytopenia);
        assert!(!f.amount_severity_mismatch && !f.vitals_severity_mismatch);
    }

    #[test]
    fn abnormal_values_raise_indicators() {
        let mut m = medical(DiagnosisSeverity::Moderate, 0);
        m.vital_signs.temperature = 38.5;
        m.vital_signs.pulse = 110.0;
        m.vital_signs.respiratory_rate = 24.0;
        m.lab_results.hemoglobin = 11.0;
        m.lab_results.leukocyte = 3200.0;
        m.lab_results.platelet = 95_000.0;

        let f = extract_features(&m);
        assert!(f.fever && f.tachycardia && f.tachypnea);
        assert!(f.anemia && f.leukopenia && f.thrombocytopenia);
    }

    #[test]
    fn indicator_thresholds_are_strict() {
        let mut m = MedicalData::default();
        m.vital_signs.temperature = 37.5;
        m.vital_signs.pulse = 100.0;
        m.lab_results.hemoglobin = 13.0;
        let f = extract_features(&m);
        assert!(!f.fever && !f.tachycardia && !f.anemia);
    }

    #[test]
    fn zero_diastolic_uses_default_ratio() {
        let mut m = MedicalData::default();
        m.vital_signs.diastolic_bp = 0.0;
        assert_eq!(extract_features(&m).bp_ratio, 1.5);
    }

    #[test]
    fn mild_diagnosis_with_large_amount_is_a_mismatch() {
        assert!(extract_features(&medical(DiagnosisSeverity::Mild, 2_000_001)).amount_severity_mismatch);
        assert!(!extract_features(&medical(DiagnosisSeverity::Mild, 2_000_000)).amount_severity_mismatch);
        assert!(!extract_features(&medical(DiagnosisSeverity::Severe, 9_000_000)).amount_severity_mismatch);
    }

    #[test]
    fn severe_diagnosis_with_normal_vitals_is_a_mismatch() {
        assert!(extract_features(&medical(DiagnosisSeverity::Severe, 0)).vitals_severity_mismatch);

        let mut febrile = medical(DiagnosisSeverity::Severe, 0);
        febrile.vital_signs.temperature = 39.0;
        assert!(!extract_features(&febrile).vitals_severity_mismatch);
    }

    #[test]
    fn vector_matches_feature_names() {
        let f = extract_features(&medical(DiagnosisSeverity::Severe, 1_500_000));
        let v = f.to_vector();
        assert_eq!(v.len(), FEATURE_NAMES.len());
        assert_eq!(v[0], 3.0);
        assert_eq!(v[10], 1_500_000.0);
        assert_eq!(v[19], 1.0);
    }
}
