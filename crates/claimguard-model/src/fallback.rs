//! Primary-with-fallback model composition.

use tracing::warn;

use claimguard_contracts::{
    error::{ClaimError, ClaimResult},
    medical::MedicalData,
    result::ModelScore,
};
use claimguard_core::traits::ModelInference;

/// Asks `primary` first; when it reports `ModelUnavailable`, asks `fallback`.
///
/// Any other error from the primary is returned unchanged.
pub struct FallbackModel {
    primary: Box<dyn ModelInference>,
    fallback: Box<dyn ModelInference>,
}

impl FallbackModel {
    pub fn new(primary: Box<dyn ModelInference>, fallback: Box<dyn ModelInference>) -> Self {
        Self { primary, fallback }
    }
}

impl ModelInference for FallbackModel {
    fn predict(&self, medical: &MedicalData) -> ClaimResult<ModelScore> {
        match self.primary.predict(medical) {
            Err(ClaimError::ModelUnavailable { reason }) => {
                warn!(%reason, "model unavailable, using heuristic fallback");
                self.fallback.predict(medical)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use claimguard_contracts::result::ScoreSource;

    use super::*;
    use crate::{FixedModel, HeuristicModel};

    struct Unavailable;

    impl ModelInference for Unavailable {
        fn predict(&self, _medical: &MedicalData) -> ClaimResult<ModelScore> {
            Err(ClaimError::ModelUnavailable {
                reason: "model file not found".to_string(),
            })
        }
    }

    struct Broken;

    impl ModelInference for Broken {
        fn predict(&self, _medical: &MedicalData) -> ClaimResult<ModelScore> {
            Err(ClaimError::ConfigError {
                reason: "corrupt weights".to_string(),
            })
        }
    }

    /// Counts how often it is consulted.
    struct Counting {
        calls: Arc<Mutex<u32>>,
    }

    impl ModelInference for Counting {
        fn predict(&self, _medical: &MedicalData) -> ClaimResult<ModelScore> {
            *self.calls.lock().unwrap() += 1;
            ModelScore::injected(50)
        }
    }

    #[test]
    fn available_primary_is_used() {
        let calls = Arc::new(Mutex::new(0));
        let model = FallbackModel::new(
            Box::new(FixedModel::new(12).unwrap()),
            Box::new(Counting { calls: Arc::clone(&calls) }),
        );
        assert_eq!(model.predict(&MedicalData::default()).unwrap().score, 12);
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn unavailable_primary_falls_back() {
        let model = FallbackModel::new(Box::new(Unavailable), Box::new(HeuristicModel::seeded(3)));
        let score = model.predict(&MedicalData::default()).unwrap();
        assert_eq!(score.source, ScoreSource::HeuristicFallback);
        assert!(score.score <= 100);
    }

    #[test]
    fn other_errors_are_not_masked() {
        let calls = Arc::new(Mutex::new(0));
        let model = FallbackModel::new(Box::new(Broken), Box::new(Counting { calls: Arc::clone(&calls) }));
        assert!(matches!(
            model.predict(&MedicalData::default()),
            Err(ClaimError::ConfigError { .. })
        ));
        assert_eq!(*calls.lock().unwrap(), 0);
    }
}
