//! Error types for the ClaimGuard scoring pipeline.
//!
//! Rule violations (an invalid identity number, an unregistered facility) are
//! NOT errors: they are ordinary `FlagResult` values with `passed = false`.
//! `ClaimError` is reserved for faults the engine cannot score around.

use thiserror::Error;

use crate::flag::FlagType;

/// The unified error type for the ClaimGuard crates.
#[derive(Debug, Error)]
pub enum ClaimError {
    /// The raw claim could not be parsed into subjects at all.
    ///
    /// Never converted into a crucial flag: the engine only flags data that
    /// is well-formed but invalid.
    #[error("malformed claim: {reason}")]
    MalformedClaim { reason: String },

    /// A rule produced a score outside the range declared for its flag type.
    #[error("score {score} outside {flag_type} range {min}..={max} for '{name}'")]
    ScoreOutOfRange {
        flag_type: FlagType,
        name: String,
        score: u32,
        min: u32,
        max: u32,
    },

    /// The model-inference collaborator has no usable model.
    #[error("model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The results store could not append a finalized claim result.
    #[error("ledger write failed: {reason}")]
    LedgerWriteFailed { reason: String },
}

/// Convenience alias used throughout the ClaimGuard crates.
pub type ClaimResult<T> = Result<T, ClaimError>;
