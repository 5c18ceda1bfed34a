//! Core trait definitions for the ClaimGuard scoring pipeline.
//!
//! These four traits are the seams between the engine and its collaborators:
//!
//! - `RuleCheck`      — one pure check on one subject fact
//! - `DecisionPolicy` — maps an aggregate score (or auto-reject) to a decision
//! - `ModelInference` — the statistical model collaborator
//! - `ResultSink`     — the append-only claim-results store
//!
//! The aggregator and processor wire them together in a fixed order. A
//! `ResultSink` only ever sees a finalized result.

use claimguard_contracts::{
    error::ClaimResult,
    flag::{FlagResult, FlagType},
    medical::MedicalData,
    result::{ClaimEntry, DecisionVerdict, ModelScore},
    subject::LookupTables,
};

/// A single rule evaluated against subject `S`.
///
/// Implementations must be pure: the same subject and tables always yield
/// the same `FlagResult`. A rule violation is returned as a failing flag,
/// never as an `Err`; errors are reserved for misconfiguration such as a
/// score outside its tier's range.
pub trait RuleCheck<S>: Send + Sync {
    /// Stable identifier used in logs.
    fn id(&self) -> &'static str;

    /// Tier of the flag this check produces.
    fn flag_type(&self) -> FlagType;

    /// Evaluate the check.
    fn check(&self, subject: &S, tables: &LookupTables) -> ClaimResult<FlagResult>;
}

/// Pure threshold logic deciding a claim's outcome.
pub trait DecisionPolicy: Send + Sync {
    /// Decide from the aggregate score, or from the auto-reject signal.
    ///
    /// When `auto_reject` is true, `total_score` is ignored.
    fn decide(&self, total_score: u32, auto_reject: bool) -> DecisionVerdict;
}

/// The model-inference collaborator.
///
/// Must fail closed: an implementation either returns a score in 0–100 or
/// `ClaimError::ModelUnavailable`, which callers may route to a fallback.
pub trait ModelInference: Send + Sync {
    fn predict(&self, medical: &MedicalData) -> ClaimResult<ModelScore>;
}

/// The append-only store of finalized claim results.
pub trait ResultSink: Send + Sync {
    /// Append one finalized entry. Entries are never modified afterwards.
    fn append(&self, entry: &ClaimEntry) -> ClaimResult<()>;
}
