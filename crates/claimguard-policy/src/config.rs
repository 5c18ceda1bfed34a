//! Scoring configuration loading.
//!
//! `ScoringConfig` is deserialized from TOML. Every section is optional and
//! falls back to the production defaults, so an empty document yields
//! `ScoringConfig::default()`.

use std::path::Path;

use tracing::debug;

use claimguard_contracts::{
    config::{DuplicateRule, ScoringConfig},
    error::{ClaimError, ClaimResult},
    flag::ScoreRange,
};

/// Parse `s` as a TOML scoring configuration.
///
/// Returns `ClaimError::ConfigError` if the TOML is malformed or does not
/// match the `ScoringConfig` schema.
pub fn from_toml_str(s: &str) -> ClaimResult<ScoringConfig> {
    let config: ScoringConfig = toml::from_str(s).map_err(|e| ClaimError::ConfigError {
        reason: format!("failed to parse scoring TOML: {}", e),
    })?;
    validate(&config)?;
    debug!(
        auto_accept_below = config.thresholds.auto_accept_below,
        auto_reject_above = config.thresholds.auto_reject_above,
        "scoring configuration loaded"
    );
    Ok(config)
}

/// Read the file at `path` and parse it as a TOML scoring configuration.
pub fn from_file(path: &Path) -> ClaimResult<ScoringConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ClaimError::ConfigError {
        reason: format!("failed to read scoring config '{}': {}", path.display(), e),
    })?;
    from_toml_str(&contents)
}

/// Reject configurations the checks or the decision policy cannot apply.
///
/// Every score a rule can produce must fall inside its tier's range, so a
/// loaded configuration never makes `score_claim` fail with
/// `ScoreOutOfRange`.
fn validate(config: &ScoringConfig) -> ClaimResult<()> {
    let t = config.thresholds;
    if t.auto_accept_below > t.auto_reject_above {
        return Err(ClaimError::ConfigError {
            reason: format!(
                "auto_accept_below ({}) must not exceed auto_reject_above ({})",
                t.auto_accept_below, t.auto_reject_above
            ),
        });
    }
    let r = config.identity;
    if r.region_code_min > r.region_code_max {
        return Err(ClaimError::ConfigError {
            reason: format!(
                "region_code_min ({}) must not exceed region_code_max ({})",
                r.region_code_min, r.region_code_max
            ),
        });
    }
    if r.identity_number_length < 2 {
        return Err(ClaimError::ConfigError {
            reason: format!(
                "identity_number_length ({}) must leave room for the 2-digit region code",
                r.identity_number_length
            ),
        });
    }

    let ranges = config.ranges;
    validate_rule("duplicates.phone", config.duplicates.phone, ranges.medium)?;
    validate_rule("duplicates.address", config.duplicates.address, ranges.low)?;

    let h = config.history;
    for (name, score) in [
        ("no_history", h.no_history),
        ("minor_violation", h.minor_violation),
        ("moderate_violation", h.moderate_violation),
        ("severe_violation", h.severe_violation),
        ("blacklisted", h.blacklisted),
    ] {
        if score != 0 && !ranges.flex.contains(score) {
            return Err(ClaimError::ConfigError {
                reason: format!(
                    "history.{} ({}) is outside the flex range {}..={}",
                    name, score, ranges.flex.min, ranges.flex.max
                ),
            });
        }
    }
    Ok(())
}

/// The smallest score a rule can give is `min(base_score, cap)`, the largest
/// is `cap`.
fn validate_rule(name: &str, rule: DuplicateRule, range: ScoreRange) -> ClaimResult<()> {
    if rule.base_score < range.min || !range.contains(rule.cap) {
        return Err(ClaimError::ConfigError {
            reason: format!(
                "{} scores (base_score {}, cap {}) must lie within {}..={}",
                name, rule.base_score, rule.cap, range.min, range.max
            ),
        });
    }
    Ok(())
}
