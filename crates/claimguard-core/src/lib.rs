//! # claimguard-core
//!
//! The deterministic scoring runtime for ClaimGuard.
//!
//! This crate provides:
//! - The collaborator traits (`RuleCheck`, `DecisionPolicy`, `ModelInference`, `ResultSink`)
//! - The built-in patient and facility rule checks
//! - The `Checklist` runner and the `ScoreAggregator` that combines them
//! - The `ClaimProcessor` that wires the model, the aggregator and the
//!   results store together in the correct order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use claimguard_core::{ClaimProcessor, ScoreAggregator, traits::{DecisionPolicy, ModelInference, ResultSink}};
//! ```

pub mod aggregator;
pub mod checklist;
pub mod checks;
pub mod processor;
pub mod traits;

#[cfg(test)]
mod proptest;

pub use aggregator::ScoreAggregator;
pub use checklist::Checklist;
pub use processor::ClaimProcessor;
