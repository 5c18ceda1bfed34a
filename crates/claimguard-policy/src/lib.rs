//! # claimguard-policy
//!
//! TOML scoring configuration and the threshold decision policy.
//!
//! ## Overview
//!
//! [`config::from_toml_str`] and [`config::from_file`] load a
//! [`ScoringConfig`](claimguard_contracts::config::ScoringConfig); every
//! section is optional. [`ThresholdPolicy`] implements the
//! [`DecisionPolicy`](claimguard_core::traits::DecisionPolicy) trait using
//! the configured accept/reject thresholds.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use claimguard_policy::{config, ThresholdPolicy};
//!
//! let config = config::from_file(Path::new("scoring.toml"))?;
//! let policy = ThresholdPolicy::from_config(&config);
//! // Pass `Box::new(policy)` to `claimguard_core::ScoreAggregator::new(...)`.
//! ```

pub mod config;
pub mod threshold;

pub use threshold::ThresholdPolicy;

// ── Tests ─────────────────────────────────────────────────────────────────────
