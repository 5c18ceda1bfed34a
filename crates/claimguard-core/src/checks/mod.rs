//! The built-in rule checks.
//!
//! Each check implements [`RuleCheck`](crate::traits::RuleCheck) for one
//! subject type and takes its parameters from `ScoringConfig` at
//! construction.

pub mod facility;
pub mod patient;

pub use facility::{FacilityRegistrationCheck, FraudHistoryCheck};
pub use patient::{CardNumberCheck, DuplicateAddressCheck, DuplicatePhoneCheck, IdentityNumberCheck};
