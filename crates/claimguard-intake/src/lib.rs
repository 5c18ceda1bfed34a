//! # claimguard-intake
//!
//! Claim intake for ClaimGuard.
//!
//! This crate provides [`extractor::ClaimExtractor`], which turns a raw JSON
//! claim into an [`ExtractedClaim`](claimguard_contracts::claim::ExtractedClaim)
//! in two phases:
//!
//! 1. **Structural** — JSON Schema validation via the `jsonschema` crate.
//!    Any violation rejects the whole claim with `ClaimError::MalformedClaim`.
//! 2. **Extraction** — the patient, facility and medical subjects are pulled
//!    out of the validated document. Missing identifiers become `None` and
//!    are left for the rule checks to flag.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use claimguard_intake::ClaimExtractor;
//!
//! let extractor = ClaimExtractor::new()?;
//! let claim = extractor.extract(&raw_json)?;
//! ```

pub mod extractor;

pub use extractor::ClaimExtractor;
