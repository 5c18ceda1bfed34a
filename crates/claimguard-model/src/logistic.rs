//! A trained logistic-regression fraud model.
//!
//! Weights are read from a JSON document keyed by feature name:
//!
//! ```json
//! {
//!   "bias": -3.0,
//!   "weights": { "amount_severity_mismatch": 2.4, "vitals_severity_mismatch": 1.8 }
//! }
//! ```
//!
//! Features without a weight contribute nothing. A missing weights file is
//! `ModelUnavailable`, so a [`ModelFile`] composes with [`FallbackModel`]; a
//! file that exists but cannot be used is a `ConfigError`.
//!
//! [`FallbackModel`]: crate::FallbackModel

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use claimguard_contracts::{
    error::{ClaimError, ClaimResult},
    medical::MedicalData,
    result::ModelScore,
};
use claimguard_core::traits::ModelInference;

use crate::features::{extract_features, FEATURE_NAMES};
use crate::probability::score_from_probability;

/// On-disk form of the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelWeights {
    #[serde(default)]
    pub bias: f64,
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
}

#[derive(Debug, Clone)]
pub struct LogisticModel {
    bias: f64,
    coefficients: [f64; 20],
}

impl LogisticModel {
    /// Build from weights, rejecting names that are not model features.
    pub fn from_weights(weights: &ModelWeights) -> ClaimResult<Self> {
        let mut coefficients = [0.0; 20];
        for (name, weight) in &weights.weights {
            let index = FEATURE_NAMES
                .iter()
                .position(|f| *f == name.as_str())
                .ok_or_else(|| ClaimError::ConfigError {
                    reason: format!("unknown model feature '{name}'"),
                })?;
            if !weight.is_finite() {
                return Err(ClaimError::ConfigError {
                    reason: format!("weight for '{name}' is not finite"),
                });
            }
            coefficients[index] = *weight;
        }
        Ok(Self {
            bias: weights.bias,
            coefficients,
        })
    }

    /// Load weights from a JSON file.
    pub fn from_file(path: &Path) -> ClaimResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ClaimError::ModelUnavailable {
                reason: format!("model weights not found at '{}'", path.display()),
            },
            _ => ClaimError::ConfigError {
                reason: format!("failed to read model weights '{}': {}", path.display(), e),
            },
        })?;
        let weights: ModelWeights =
            serde_json::from_str(&contents).map_err(|e| ClaimError::ConfigError {
                reason: format!("failed to parse model weights '{}': {}", path.display(), e),
            })?;
        info!(path = %path.display(), features = weights.weights.len(), "model weights loaded");
        Self::from_weights(&weights)
    }

    /// Fraud probability for `medical`.
    pub fn probability(&self, medical: &MedicalData) -> f64 {
        let features = extract_features(medical).to_vector();
        let z = features
            .iter()
            .zip(self.coefficients.iter())
            .fold(self.bias, |acc, (x, w)| acc + x * w);
        1.0 / (1.0 + (-z).exp())
    }
}

impl ModelInference for LogisticModel {
    fn predict(&self, medical: &MedicalData) -> ClaimResult<ModelScore> {
        let p = self.probability(medical);
        debug!(probability = p, "model probability computed");
        score_from_probability(p)
    }
}

/// A [`LogisticModel`] read from `path` on first use.
///
/// Until the file loads, every prediction reports the load error, so a
/// missing file surfaces as `ModelUnavailable` per claim.
pub struct ModelFile {
    path: PathBuf,
    loaded: OnceLock<LogisticModel>,
}

impl ModelFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: OnceLock::new(),
        }
    }
}

impl ModelInference for ModelFile {
    fn predict(&self, medical: &MedicalData) -> ClaimResult<ModelScore> {
        if let Some(model) = self.loaded.get() {
            return model.predict(medical);
        }
        let model = LogisticModel::from_file(&self.path)?;
        self.loaded.get_or_init(|| model).predict(medical)
    }
}
