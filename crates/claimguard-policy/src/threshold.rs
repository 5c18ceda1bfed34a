//! Threshold decision policy.
//!
//! Decision table, evaluated top to bottom:
//!
//! | condition                         | decision       |
//! |-----------------------------------|----------------|
//! | any crucial check failed          | `REJECTED`     |
//! | `total < auto_accept_below`       | `ACCEPTED`     |
//! | `total > auto_reject_above`       | `REJECTED`     |
//! | otherwise                         | `NEEDS_REVIEW` |
//!
//! Both thresholds are exclusive: with the defaults a total of exactly 10
//! or exactly 60 goes to manual review.

use tracing::debug;

use claimguard_contracts::{
    config::{DecisionThresholds, ScoringConfig},
    result::{Decision, DecisionVerdict},
};
use claimguard_core::traits::DecisionPolicy;

/// A `DecisionPolicy` driven by the two configured score thresholds.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdPolicy {
    thresholds: DecisionThresholds,
}

impl ThresholdPolicy {
    pub fn new(thresholds: DecisionThresholds) -> Self {
        Self { thresholds }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.thresholds)
    }
}

impl DecisionPolicy for ThresholdPolicy {
    fn decide(&self, total_score: u32, auto_reject: bool) -> DecisionVerdict {
        let accept = self.thresholds.auto_accept_below;
        let reject = self.thresholds.auto_reject_above;

        let (decision, reason) = if auto_reject {
            (
                Decision::Rejected,
                "Auto reject due to crucial violation".to_string(),
            )
        } else if total_score < accept {
            (
                Decision::Accepted,
                format!("Auto accept (score: {} < {})", total_score, accept),
            )
        } else if total_score > reject {
            (
                Decision::Rejected,
                format!("Auto reject (score: {} > {})", total_score, reject),
            )
        } else {
            (
                Decision::NeedsReview,
                format!(
                    "Manual review required (score: {} in range {}-{})",
                    total_score, accept, reject
                ),
            )
        };

        debug!(total_score, auto_reject, decision = ?decision, "decision made");
        DecisionVerdict { decision, reason }
    }
}
