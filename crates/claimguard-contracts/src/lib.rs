//! # claimguard-contracts
//!
//! Shared types, configuration, and errors for the ClaimGuard fraud scoring
//! engine.
//!
//! All crates in the workspace import from here. No scoring logic lives in
//! this crate — only data definitions, invariant-checking constructors, and
//! error types.

pub mod claim;
pub mod config;
pub mod error;
pub mod flag;
pub mod medical;
pub mod result;
pub mod subject;
