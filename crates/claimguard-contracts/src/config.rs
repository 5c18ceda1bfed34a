//! Scoring configuration.
//!
//! `ScoringConfig` is an immutable value handed to the checklists and the
//! decision policy at construction time. Every section falls back to the
//! production defaults, so a TOML file only needs the values it overrides:
//!
//! ```toml
//! [thresholds]
//! auto_accept_below = 15
//!
//! [duplicates.phone]
//! threshold = 4
//! base_score = 5
//! step = 5
//! cap = 30
//! ```
//!
//! A duplicate rule table, when present, must be given in full.

use serde::{Deserialize, Serialize};

use crate::{flag::ScoreRange, subject::ViolationSeverity};

/// Score cut-offs used by the decision policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionThresholds {
    /// Totals strictly below this are accepted.
    pub auto_accept_below: u32,
    /// Totals strictly above this are rejected.
    pub auto_reject_above: u32,
}

impl Default for DecisionThresholds {
    fn default() -> Self {
        Self {
            auto_accept_below: 10,
            auto_reject_above: 60,
        }
    }
}

/// Shape constraints for identity and insurance-card numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityRules {
    pub identity_number_length: usize,
    pub card_number_length: usize,
    pub region_code_min: u32,
    pub region_code_max: u32,
}

impl Default for IdentityRules {
    fn default() -> Self {
        Self {
            identity_number_length: 16,
            card_number_length: 13,
            region_code_min: 11,
            region_code_max: 94,
        }
    }
}

/// Linear, capped scoring for a duplicate count.
///
/// `score = min(base_score + step × (count − threshold), cap)` once
/// `count ≥ threshold`, 0 below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateRule {
    pub threshold: usize,
    pub base_score: u32,
    pub step: u32,
    pub cap: u32,
}

impl DuplicateRule {
    pub fn score(&self, count: usize) -> u32 {
        if count < self.threshold {
            return 0;
        }
        let excess = u32::try_from(count - self.threshold).unwrap_or(u32::MAX);
        self.base_score
            .saturating_add(self.step.saturating_mul(excess))
            .min(self.cap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateRules {
    pub phone: DuplicateRule,
    pub address: DuplicateRule,
}

impl Default for DuplicateRules {
    fn default() -> Self {
        Self {
            phone: DuplicateRule {
                threshold: 3,
                base_score: 5,
                step: 5,
                cap: 30,
            },
            address: DuplicateRule {
                threshold: 5,
                base_score: 1,
                step: 1,
                cap: 10,
            },
        }
    }
}

/// Allowed failing-score range per non-crucial tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagScoreRanges {
    pub flex: ScoreRange,
    pub high: ScoreRange,
    pub medium: ScoreRange,
    pub low: ScoreRange,
}

impl Default for FlagScoreRanges {
    fn default() -> Self {
        Self {
            flex: ScoreRange::new(1, 100),
            high: ScoreRange::new(15, 40),
            medium: ScoreRange::new(5, 30),
            low: ScoreRange::new(1, 10),
        }
    }
}

/// Fixed score per facility violation severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryScores {
    pub no_history: u32,
    pub minor_violation: u32,
    pub moderate_violation: u32,
    pub severe_violation: u32,
    pub blacklisted: u32,
}

impl HistoryScores {
    pub fn for_severity(&self, severity: ViolationSeverity) -> u32 {
        match severity {
            ViolationSeverity::NoHistory => self.no_history,
            ViolationSeverity::MinorViolation => self.minor_violation,
            ViolationSeverity::ModerateViolation => self.moderate_violation,
            ViolationSeverity::SevereViolation => self.severe_violation,
            ViolationSeverity::Blacklisted => self.blacklisted,
        }
    }
}

impl Default for HistoryScores {
    fn default() -> Self {
        Self {
            no_history: 0,
            minor_violation: 20,
            moderate_violation: 50,
            severe_violation: 80,
            blacklisted: 100,
        }
    }
}

/// The complete, immutable scoring configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub thresholds: DecisionThresholds,
    pub identity: IdentityRules,
    pub duplicates: DuplicateRules,
    pub ranges: FlagScoreRanges,
    pub history: HistoryScores,
}
